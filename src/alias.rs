//! Alias name normalization and the alias table.
//!
//! Aliases give annotations alternate names. Keys are stored in normalized
//! form so lookups are case- and separator-insensitive; targets are stored
//! exactly as given and normalized lazily during chain resolution.

use std::collections::HashMap;

/// Characters deleted outright during normalization.
///
/// Covers the usual word separators plus both path/namespace separators,
/// so `My-Annotation_Name` and `my/annotation\name` normalize identically.
const SEPARATORS: [char; 5] = ['-', '_', ' ', '/', '\\'];

/// Normalize a name for alias lookup.
///
/// Lower-cases the input and deletes (not replaces) every separator
/// character. Normalization is idempotent.
///
/// # Examples
/// ```
/// use annotation_registry::alias::normalize;
///
/// assert_eq!(normalize("My-Annotation_Name"), "myannotationname");
/// assert_eq!(normalize("my/annotation name"), "myannotationname");
/// ```
#[must_use]
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !SEPARATORS.contains(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Table of alias mappings.
///
/// Maps a normalized alias key to a target string, which is either a
/// registered handler identity or another alias. Append-only: entries are
/// never redefined or removed, which keeps chains acyclic by construction.
/// Target validation is the registry's job; the table only stores.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    /// Create a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a mapping from an already-normalized key to a raw target.
    pub fn insert(&mut self, normalized_key: String, target: String) {
        self.entries.insert(normalized_key, target);
    }

    /// Look up the target for a normalized key.
    #[must_use]
    pub fn target_of(&self, normalized_key: &str) -> Option<&str> {
        self.entries.get(normalized_key).map(String::as_str)
    }

    /// Check whether a normalized key is a known alias.
    #[must_use]
    pub fn contains(&self, normalized_key: &str) -> bool {
        self.entries.contains_key(normalized_key)
    }

    /// Number of aliases in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no aliases are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Handler for comma-separated `key=value` annotation content.

use std::any::Any;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::error::HandlerError;
use crate::handler::AnnotationHandler;

/// Pattern for a single `key=value` pair. Keys are identifiers; values run
/// to the end of the segment and may be empty.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PAIR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(.*?)\s*$").expect("valid regex"));

/// Error raised for malformed `key=value` content.
#[derive(Debug, Error)]
pub enum KeyValueError {
    /// A comma-separated segment did not match `key=value`.
    #[error("Malformed key=value pair: '{0}'")]
    MalformedPair(String),

    /// The same key appeared twice in one annotation.
    #[error("Duplicate key: '{0}'")]
    DuplicateKey(String),
}

/// Handler for annotations carrying `key=value` lists.
///
/// Parses content like `x=1, label=hello` into a string map. Segment
/// values are taken verbatim after trimming surrounding whitespace; the
/// handler imposes no further value grammar.
///
/// Serializes as the parsed map, so downstream tooling can dump the
/// annotation state directly.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct KeyValueHandler {
    values: HashMap<String, String>,
}

impl KeyValueHandler {
    /// Get a parsed value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// All parsed pairs.
    #[must_use]
    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }
}

impl AnnotationHandler for KeyValueHandler {
    fn name(&self) -> &str {
        "KeyValue"
    }

    fn initialize(&mut self, content: &str) -> Result<(), HandlerError> {
        for segment in content.split(',') {
            let caps = PAIR_PATTERN
                .captures(segment)
                .ok_or_else(|| KeyValueError::MalformedPair(segment.trim().to_string()))?;

            let key = caps[1].to_string();
            if self.values.contains_key(&key) {
                return Err(KeyValueError::DuplicateKey(key).into());
            }
            self.values.insert(key, caps[2].to_string());
        }
        Ok(())
    }

    fn boxed_clone(&self) -> Box<dyn AnnotationHandler> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//! Annotation registry mapping handler identities and aliases to prototypes.

use std::collections::HashMap;

use crate::alias::{normalize, AliasTable};
use crate::error::{RegistryError, Result};
use crate::handler::AnnotationHandler;

/// Registry of annotation handler prototypes.
///
/// The registry stores one prototype per handler identity plus a table of
/// alias mappings. Resolution follows alias chains and returns a fresh
/// clone of the matched prototype, so handed-out handlers never share
/// state with the registry or with each other.
///
/// Build-then-use lifecycle: register handlers and aliases during setup,
/// then resolve/dispatch read-only afterwards. The registry is an
/// explicitly constructed value meant to be passed to its callers, not
/// held in global state.
///
/// # Example
///
/// ```
/// use annotation_registry::handlers::KeyValueHandler;
/// use annotation_registry::AnnotationRegistry;
///
/// let mut registry = AnnotationRegistry::new();
/// registry.register::<KeyValueHandler>()?;
/// registry.set_alias("kv", "KeyValue")?;
///
/// assert!(registry.has_handler("KeyValue"));
/// assert!(registry.has_handler("KV"));
/// # Ok::<(), annotation_registry::RegistryError>(())
/// ```
pub struct AnnotationRegistry {
    handlers: HashMap<String, Box<dyn AnnotationHandler>>,
    aliases: AliasTable,
}

impl Default for AnnotationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            aliases: AliasTable::new(),
        }
    }

    /// Register a handler type, constructing its default instance.
    ///
    /// The default instance's [`AnnotationHandler::name`] becomes the
    /// registered identity.
    ///
    /// # Errors
    /// Returns `DuplicateHandler` if the identity is already registered.
    pub fn register<H>(&mut self) -> Result<()>
    where
        H: AnnotationHandler + Default + 'static,
    {
        self.register_instance(Box::new(H::default()))
    }

    /// Register a pre-built handler instance as the prototype.
    ///
    /// # Errors
    /// Returns `DuplicateHandler` if the instance's identity is already
    /// registered.
    pub fn register_instance(&mut self, handler: Box<dyn AnnotationHandler>) -> Result<()> {
        let name = handler.name().to_string();
        if self.handlers.contains_key(&name) {
            return Err(RegistryError::DuplicateHandler(name));
        }

        tracing::debug!(handler = %name, "registered annotation handler");
        self.handlers.insert(name, handler);
        Ok(())
    }

    /// Register a collection of handler instances in iteration order.
    ///
    /// Registration is not transactional: the first failure aborts the
    /// batch, but items processed before it stay registered.
    ///
    /// # Errors
    /// Returns the first `DuplicateHandler` encountered.
    pub fn register_many<I>(&mut self, handlers: I) -> Result<()>
    where
        I: IntoIterator<Item = Box<dyn AnnotationHandler>>,
    {
        for handler in handlers {
            self.register_instance(handler)?;
        }
        Ok(())
    }

    /// Check whether a name refers to a registered handler.
    ///
    /// True on an exact identity match, or when the normalized form of
    /// `name` is a known alias. No partial or prefix matching.
    #[must_use]
    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name) || self.aliases.contains(&normalize(name))
    }

    /// Define an alias for a handler identity or an existing alias.
    ///
    /// The alias key is stored normalized (case- and separator-insensitive);
    /// the target is stored exactly as given and normalized lazily during
    /// resolution. Aliasing to an alias is permitted and produces chains.
    /// Aliases are append-only: redefining one is an error, which keeps
    /// every chain acyclic.
    ///
    /// # Errors
    /// * `EmptyAlias` if the key normalizes to an empty string
    /// * `DuplicateAlias` if the normalized key is already defined
    /// * `UnknownAliasTarget` if the target is neither a registered handler
    ///   identity nor a known alias at the time of the call
    pub fn set_alias(&mut self, alias: &str, target: &str) -> Result<()> {
        let key = normalize(alias);
        if key.is_empty() {
            return Err(RegistryError::EmptyAlias(alias.to_string()));
        }
        if self.aliases.contains(&key) {
            return Err(RegistryError::DuplicateAlias(alias.to_string()));
        }
        if !self.handlers.contains_key(target) && !self.aliases.contains(&normalize(target)) {
            return Err(RegistryError::UnknownAliasTarget {
                alias: alias.to_string(),
                target: target.to_string(),
            });
        }

        tracing::debug!(alias = %key, target = %target, "registered annotation alias");
        self.aliases.insert(key, target.to_string());
        Ok(())
    }

    /// Resolve a handler name or alias to a fresh handler clone.
    ///
    /// Follows the alias chain (normalizing at each hop) until the current
    /// value is a registered identity or has no alias entry, then matches
    /// the registered identity exactly. An identity match always ends the
    /// chase, so a handler whose normalized name is shadowed by an alias
    /// key still resolves to itself; together with the append-only alias
    /// table this guarantees the chase terminates.
    ///
    /// # Errors
    /// Returns `HandlerNotFound` if the chase ends on an unregistered name.
    /// Callers that cannot guarantee registration should guard with
    /// [`Self::has_handler`].
    pub fn resolve(&self, name: &str) -> Result<Box<dyn AnnotationHandler>> {
        let mut current = name.to_string();
        while !self.handlers.contains_key(&current) {
            match self.aliases.target_of(&normalize(&current)) {
                Some(target) => current = target.to_string(),
                None => break,
            }
        }

        self.handlers
            .get(&current)
            .map(|prototype| prototype.boxed_clone())
            .ok_or_else(|| RegistryError::HandlerNotFound(name.to_string()))
    }

    /// Return the identities of all registered handlers.
    #[must_use]
    pub fn registered_names(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Number of defined aliases.
    #[must_use]
    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }
}

impl std::fmt::Debug for AnnotationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationRegistry")
            .field("handlers", &self.registered_names())
            .field("aliases", &self.aliases)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandlerError;
    use std::any::Any;

    #[derive(Debug, Clone, Default)]
    struct FooHandler {
        content: String,
    }

    impl AnnotationHandler for FooHandler {
        fn name(&self) -> &str {
            "Foo"
        }

        fn initialize(&mut self, content: &str) -> std::result::Result<(), HandlerError> {
            self.content = content.to_string();
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

    #[derive(Debug, Clone, Default)]
    struct BarHandler;

    impl AnnotationHandler for BarHandler {
        fn name(&self) -> &str {
            "Bar"
        }

        fn initialize(&mut self, _content: &str) -> std::result::Result<(), HandlerError> {
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

    #[test]
    fn test_register_and_has_handler() {
        let mut registry = AnnotationRegistry::new();
        registry.register::<FooHandler>().unwrap();

        assert!(registry.has_handler("Foo"));
        assert!(!registry.has_handler("Bar"));

        // Unrelated registrations don't disturb earlier ones
        registry.register::<BarHandler>().unwrap();
        assert!(registry.has_handler("Foo"));
    }

    #[test]
    fn test_has_handler_is_exact_for_identities() {
        let mut registry = AnnotationRegistry::new();
        registry.register::<FooHandler>().unwrap();

        // Identities are matched exactly, only aliases are normalized
        assert!(!registry.has_handler("foo"));
        assert!(!registry.has_handler("Fo"));
    }

    #[test]
    fn test_duplicate_registration_by_type() {
        let mut registry = AnnotationRegistry::new();
        registry.register::<FooHandler>().unwrap();

        let result = registry.register::<FooHandler>();
        assert!(matches!(result, Err(RegistryError::DuplicateHandler(name)) if name == "Foo"));
    }

    #[test]
    fn test_duplicate_registration_by_instance() {
        let mut registry = AnnotationRegistry::new();
        registry.register::<FooHandler>().unwrap();

        // Same identity via a pre-built instance fails identically
        let result = registry.register_instance(Box::new(FooHandler::default()));
        assert!(matches!(result, Err(RegistryError::DuplicateHandler(name)) if name == "Foo"));
    }

    #[test]
    fn test_register_many() {
        let mut registry = AnnotationRegistry::new();
        registry
            .register_many([
                Box::new(FooHandler::default()) as Box<dyn AnnotationHandler>,
                Box::new(BarHandler),
            ])
            .unwrap();

        assert!(registry.has_handler("Foo"));
        assert!(registry.has_handler("Bar"));
    }

    #[test]
    fn test_register_many_aborts_but_keeps_prefix() {
        let mut registry = AnnotationRegistry::new();
        registry.register::<BarHandler>().unwrap();

        let result = registry.register_many([
            Box::new(FooHandler::default()) as Box<dyn AnnotationHandler>,
            Box::new(BarHandler), // duplicate, aborts here
            Box::new(FooHandler::default()),
        ]);

        assert!(matches!(result, Err(RegistryError::DuplicateHandler(_))));
        // Items before the failing one are already registered
        assert!(registry.has_handler("Foo"));
        assert_eq!(registry.handler_count(), 2);
    }

    #[test]
    fn test_alias_normalization_in_has_handler() {
        let mut registry = AnnotationRegistry::new();
        registry.register::<FooHandler>().unwrap();
        registry.set_alias("My-Alias", "Foo").unwrap();

        assert!(registry.has_handler("my_alias"));
        assert!(registry.has_handler("MYALIAS"));
        assert!(registry.has_handler("my/alias"));
    }

    #[test]
    fn test_alias_to_unknown_target() {
        let mut registry = AnnotationRegistry::new();

        let result = registry.set_alias("bad", "NeverRegistered");
        assert!(matches!(
            result,
            Err(RegistryError::UnknownAliasTarget { alias, target })
                if alias == "bad" && target == "NeverRegistered"
        ));
    }

    #[test]
    fn test_alias_to_alias_is_permitted() {
        let mut registry = AnnotationRegistry::new();
        registry.register::<FooHandler>().unwrap();
        registry.set_alias("b", "Foo").unwrap();
        registry.set_alias("c", "b").unwrap();

        assert!(registry.has_handler("c"));
    }

    #[test]
    fn test_alias_redefinition_rejected() {
        let mut registry = AnnotationRegistry::new();
        registry.register::<FooHandler>().unwrap();
        registry.register::<BarHandler>().unwrap();
        registry.set_alias("short", "Foo").unwrap();

        // Same key after normalization
        let result = registry.set_alias("SHORT", "Bar");
        assert!(matches!(result, Err(RegistryError::DuplicateAlias(_))));
    }

    #[test]
    fn test_alias_empty_key_rejected() {
        let mut registry = AnnotationRegistry::new();
        registry.register::<FooHandler>().unwrap();

        let result = registry.set_alias("-_ ", "Foo");
        assert!(matches!(result, Err(RegistryError::EmptyAlias(_))));
    }

    #[test]
    fn test_resolve_direct_name() {
        let mut registry = AnnotationRegistry::new();
        registry.register::<FooHandler>().unwrap();

        let handler = registry.resolve("Foo").unwrap();
        assert_eq!(handler.name(), "Foo");
    }

    #[test]
    fn test_resolve_chain() {
        let mut registry = AnnotationRegistry::new();
        registry.register::<FooHandler>().unwrap();
        registry.set_alias("b", "Foo").unwrap();
        registry.set_alias("c", "b").unwrap();

        let handler = registry.resolve("c").unwrap();
        assert_eq!(handler.name(), "Foo");
    }

    #[test]
    fn test_resolve_chain_with_separator_spelled_target() {
        let mut registry = AnnotationRegistry::new();
        registry.register::<FooHandler>().unwrap();
        registry.set_alias("my-alias", "Foo").unwrap();
        // Target spelled with separators still reaches the alias it names
        registry.set_alias("outer", "My_Alias").unwrap();

        let handler = registry.resolve("OUTER").unwrap();
        assert_eq!(handler.name(), "Foo");
    }

    #[test]
    fn test_resolve_not_found() {
        let registry = AnnotationRegistry::new();

        let result = registry.resolve("Missing");
        assert!(matches!(result, Err(RegistryError::HandlerNotFound(name)) if name == "Missing"));
    }

    #[test]
    fn test_resolve_alias_ending_on_unregistered_name() {
        // Can't happen through set_alias validation, but resolve must still
        // surface an explicit error if the exact-match step misses.
        let registry = AnnotationRegistry::new();
        let result = registry.resolve("foo");
        assert!(matches!(result, Err(RegistryError::HandlerNotFound(_))));
    }

    #[test]
    fn test_resolve_identity_wins_over_shadowing_alias() {
        let mut registry = AnnotationRegistry::new();
        registry.register::<FooHandler>().unwrap();
        registry.register::<BarHandler>().unwrap();
        // Alias key "foo" shadows the normalized form of identity "Foo"
        registry.set_alias("foo", "Bar").unwrap();

        // The exact identity terminates the chase before the alias applies
        let direct = registry.resolve("Foo").unwrap();
        assert_eq!(direct.name(), "Foo");

        // A spelling that is not an exact identity goes through the alias
        let aliased = registry.resolve("f-o-o").unwrap();
        assert_eq!(aliased.name(), "Bar");
    }

    #[test]
    fn test_resolve_returns_isolated_clone() {
        let mut registry = AnnotationRegistry::new();
        registry.register::<FooHandler>().unwrap();

        let mut first = registry.resolve("Foo").unwrap();
        first.initialize("mutated").unwrap();

        // The prototype and subsequent clones are unaffected
        let second = registry.resolve("Foo").unwrap();
        let second = second.as_any().downcast_ref::<FooHandler>().unwrap();
        assert_eq!(second.content, "");
    }

    #[test]
    fn test_registered_names_and_counts() {
        let mut registry = AnnotationRegistry::new();
        registry.register::<FooHandler>().unwrap();
        registry.register::<BarHandler>().unwrap();
        registry.set_alias("f", "Foo").unwrap();

        let mut names = registry.registered_names();
        names.sort_unstable();
        assert_eq!(names, vec!["Bar", "Foo"]);
        assert_eq!(registry.handler_count(), 2);
        assert_eq!(registry.alias_count(), 1);
    }
}

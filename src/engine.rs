//! Dispatch engine that produces initialized handler clones.
//!
//! The engine is the entry point for the external collaborator (a source
//! scanner emitting one notification per annotation site). It guards
//! unknown names with the [`Dispatch::NotApplicable`] sentinel, strips the
//! content delimiters, resolves through the registry and initializes the
//! resulting clone.

use crate::error::{RegistryError, Result};
use crate::handler::AnnotationHandler;
use crate::registry::AnnotationRegistry;

/// Outcome of dispatching an annotation site.
#[derive(Debug)]
pub enum Dispatch {
    /// A handler matched; carries the initialized (or default, when the
    /// content was empty) handler clone.
    Handled(Box<dyn AnnotationHandler>),
    /// No handler is registered for the requested name; the site is
    /// skipped silently rather than treated as an error.
    NotApplicable,
}

impl Dispatch {
    /// True if no handler matched.
    #[must_use]
    pub fn is_not_applicable(&self) -> bool {
        matches!(self, Self::NotApplicable)
    }

    /// Extract the handler, if any.
    #[must_use]
    pub fn into_handler(self) -> Option<Box<dyn AnnotationHandler>> {
        match self {
            Self::Handled(handler) => Some(handler),
            Self::NotApplicable => None,
        }
    }
}

/// Strip one leading `(` and one trailing `)` from raw annotation content.
///
/// Only a single literal character is removed on each side, independently.
/// This is delimiter stripping, not balanced-parenthesis trimming.
fn strip_delimiters(raw: &str) -> &str {
    let stripped = raw.strip_prefix('(').unwrap_or(raw);
    stripped.strip_suffix(')').unwrap_or(stripped)
}

/// Engine that dispatches annotation sites against a registry.
///
/// # Example
///
/// ```
/// use annotation_registry::{create_builtin_registry, AnnotationEngine, Dispatch};
///
/// let engine = AnnotationEngine::new(create_builtin_registry()?);
///
/// match engine.dispatch("KeyValue", "(x=1)")? {
///     Dispatch::Handled(handler) => assert_eq!(handler.name(), "KeyValue"),
///     Dispatch::NotApplicable => unreachable!(),
/// }
/// # Ok::<(), annotation_registry::RegistryError>(())
/// ```
pub struct AnnotationEngine {
    registry: AnnotationRegistry,
}

impl AnnotationEngine {
    /// Create a new engine over the given registry.
    #[must_use]
    pub fn new(registry: AnnotationRegistry) -> Self {
        Self { registry }
    }

    /// Get a reference to the underlying registry.
    #[must_use]
    pub fn registry(&self) -> &AnnotationRegistry {
        &self.registry
    }

    /// Dispatch one annotation site.
    ///
    /// # Arguments
    /// * `requested_name` - Handler name or alias from the scanner
    /// * `raw_content` - Raw annotation content, possibly parenthesized
    ///
    /// # Returns
    /// [`Dispatch::NotApplicable`] when the name is empty or unregistered,
    /// otherwise [`Dispatch::Handled`] with a fresh handler clone that has
    /// been initialized with the stripped content (left at its default
    /// state when the content is empty).
    ///
    /// # Errors
    /// Returns `Initialize` when the handler rejects its content; the
    /// handler's own error is attached as the source.
    pub fn dispatch(&self, requested_name: &str, raw_content: &str) -> Result<Dispatch> {
        if requested_name.is_empty() || !self.registry.has_handler(requested_name) {
            tracing::debug!(
                name = %requested_name,
                "no annotation handler registered, skipping site"
            );
            return Ok(Dispatch::NotApplicable);
        }

        let content = strip_delimiters(raw_content);
        let mut handler = self.registry.resolve(requested_name)?;

        if !content.is_empty() {
            handler
                .initialize(content)
                .map_err(|source| RegistryError::Initialize {
                    name: handler.name().to_string(),
                    source,
                })?;
        }

        Ok(Dispatch::Handled(handler))
    }
}

impl std::fmt::Debug for AnnotationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationEngine")
            .field("registry", &self.registry)
            .finish()
    }
}

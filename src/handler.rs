//! Annotation handler trait definition.
//!
//! Handlers are prototype objects: the registry stores one instance per
//! identity and hands out independent clones at resolution time. Each
//! handler parses its own content grammar inside [`AnnotationHandler::initialize`].

use std::any::Any;

use crate::error::HandlerError;

/// Capability contract for annotation handlers.
///
/// A handler has a unique string identity, knows how to parse the raw
/// textual content of its annotation, and supports deep cloning so every
/// resolution yields an isolated instance.
///
/// # Example
///
/// ```
/// use annotation_registry::{AnnotationHandler, HandlerError};
///
/// #[derive(Debug, Clone, Default)]
/// struct Deprecated {
///     note: String,
/// }
///
/// impl AnnotationHandler for Deprecated {
///     fn name(&self) -> &str {
///         "Deprecated"
///     }
///
///     fn initialize(&mut self, content: &str) -> Result<(), HandlerError> {
///         self.note = content.to_string();
///         Ok(())
///     }
///
///     fn boxed_clone(&self) -> Box<dyn AnnotationHandler> {
///         Box::new(self.clone())
///     }
///
///     fn as_any(&self) -> &dyn std::any::Any {
///         self
///     }
///
///     fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
///         self
///     }
/// }
/// ```
pub trait AnnotationHandler: Send + Sync {
    /// Unique identity of this handler within a registry.
    ///
    /// Registration uses this as the key; `resolve` matches it exactly
    /// (aliases are normalized, identities are not).
    fn name(&self) -> &str;

    /// Parse the annotation's textual content into handler state.
    ///
    /// Called at most once per dispatched clone, and only when the content
    /// is non-empty. The handler defines its own grammar and its own error.
    ///
    /// # Errors
    /// Returns a handler-defined error if the content is malformed.
    fn initialize(&mut self, content: &str) -> Result<(), HandlerError>;

    /// Produce a deep, independent copy of this handler.
    ///
    /// The clone must not share mutable state with the prototype or with
    /// any previously issued clone.
    fn boxed_clone(&self) -> Box<dyn AnnotationHandler>;

    /// Downcasting support for recovering the concrete handler type.
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcasting support.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl Clone for Box<dyn AnnotationHandler> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}

impl std::fmt::Debug for dyn AnnotationHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationHandler")
            .field("name", &self.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default)]
    struct Probe {
        content: String,
    }

    impl AnnotationHandler for Probe {
        fn name(&self) -> &str {
            "Probe"
        }

        fn initialize(&mut self, content: &str) -> Result<(), HandlerError> {
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

    #[test]
    fn test_boxed_clone_is_independent() {
        let mut original = Probe::default();
        original.initialize("first").unwrap();

        let mut copy = original.boxed_clone();
        copy.initialize("second").unwrap();

        assert_eq!(original.content, "first");
        let copy = copy.as_any().downcast_ref::<Probe>().unwrap();
        assert_eq!(copy.content, "second");
    }

    #[test]
    fn test_box_clone_via_std_clone() {
        let boxed: Box<dyn AnnotationHandler> = Box::new(Probe::default());
        let cloned = boxed.clone();
        assert_eq!(cloned.name(), "Probe");
    }

    #[test]
    fn test_debug_shows_name() {
        let boxed: Box<dyn AnnotationHandler> = Box::new(Probe::default());
        assert!(format!("{boxed:?}").contains("Probe"));
    }
}

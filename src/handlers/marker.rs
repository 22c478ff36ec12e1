//! Handler for content-free marker annotations.

use std::any::Any;

use thiserror::Error;

use crate::error::HandlerError;
use crate::handler::AnnotationHandler;

/// Error raised when a marker annotation carries content.
#[derive(Debug, Error)]
#[error("Marker annotation does not accept content, got: '{0}'")]
pub struct UnexpectedContent(String);

/// Handler for flag-style annotations that carry no content.
///
/// Dispatch only calls `initialize` for non-empty content, so a plain
/// marker site never reaches it; content on a marker is a usage error.
#[derive(Debug, Clone, Default)]
pub struct MarkerHandler;

impl AnnotationHandler for MarkerHandler {
    fn name(&self) -> &str {
        "Marker"
    }

    fn initialize(&mut self, content: &str) -> Result<(), HandlerError> {
        Err(UnexpectedContent(content.to_string()).into())
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

//! Handler for JSON-literal annotation content.

use std::any::Any;

use serde::Serialize;
use serde_json::Value;

use crate::error::HandlerError;
use crate::handler::AnnotationHandler;

/// Handler for annotations whose content is a JSON literal.
///
/// Parses content like `{"level": 3, "tags": ["a"]}` into a
/// [`serde_json::Value`]. A parse failure is propagated unchanged as the
/// underlying `serde_json::Error`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct JsonHandler {
    value: Option<Value>,
}

impl JsonHandler {
    /// The parsed JSON value, if the handler was initialized.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }
}

impl AnnotationHandler for JsonHandler {
    fn name(&self) -> &str {
        "Json"
    }

    fn initialize(&mut self, content: &str) -> Result<(), HandlerError> {
        self.value = Some(serde_json::from_str(content)?);
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

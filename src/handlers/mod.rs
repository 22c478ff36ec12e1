//! Built-in annotation handlers.
//!
//! These cover the common content grammars: `key=value` lists, JSON
//! literals and content-free markers. They double as reference
//! implementations of the [`crate::AnnotationHandler`] contract.

mod json;
mod key_value;
mod marker;

pub use json::JsonHandler;
pub use key_value::{KeyValueError, KeyValueHandler};
pub use marker::{MarkerHandler, UnexpectedContent};

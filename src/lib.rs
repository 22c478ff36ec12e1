//! Annotation handler registry - resolve annotation names and aliases to
//! initialized handler instances.
//!
//! This crate is the dispatch half of a source annotation toolchain: an
//! external scanner discovers annotation sites and reports each one as a
//! `(name, content)` pair; this crate maps the name (directly, or through
//! a chain of case- and separator-insensitive aliases) to a registered
//! handler prototype, clones it, and lets the clone parse the content.
//!
//! # Example
//!
//! ```
//! use annotation_registry::handlers::KeyValueHandler;
//! use annotation_registry::{AnnotationEngine, AnnotationRegistry, Dispatch};
//!
//! let mut registry = AnnotationRegistry::new();
//! registry.register::<KeyValueHandler>()?;
//! registry.set_alias("kv", "KeyValue")?;
//!
//! let engine = AnnotationEngine::new(registry);
//! let dispatch = engine.dispatch("kv", "(x=1)")?;
//!
//! let handler = dispatch.into_handler().unwrap();
//! let kv = handler.as_any().downcast_ref::<KeyValueHandler>().unwrap();
//! assert_eq!(kv.get("x"), Some("1"));
//! # Ok::<(), annotation_registry::RegistryError>(())
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`alias`]: Name normalization and the alias table
//! - [`handler`]: The `AnnotationHandler` capability contract
//! - [`registry`]: Handler registration and alias-chain resolution
//! - [`engine`]: Dispatch of annotation sites against a registry
//! - [`handlers`]: Built-in content grammars (key=value, JSON, marker)
//! - [`config`]: Pre-wired registry with the built-ins
//! - [`error`]: Error types and Result alias

pub mod alias;
pub mod config;
pub mod engine;
pub mod error;
pub mod handler;
pub mod handlers;
pub mod registry;

// Re-export commonly used items
pub use config::create_builtin_registry;
pub use engine::{AnnotationEngine, Dispatch};
pub use error::{HandlerError, RegistryError, Result};
pub use handler::AnnotationHandler;
pub use registry::AnnotationRegistry;

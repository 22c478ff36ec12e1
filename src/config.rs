//! Pre-wired registry configuration.

use crate::error::Result;
use crate::handlers::{JsonHandler, KeyValueHandler, MarkerHandler};
use crate::registry::AnnotationRegistry;

/// Create a registry populated with the built-in handlers and their aliases.
///
/// Registered identities: `KeyValue`, `Json`, `Marker`.
/// Aliases: `key-value` → `KeyValue`, `kv` → `key-value` (a two-hop
/// chain), `flag` → `Marker`.
///
/// # Errors
/// Infallible for a fresh registry; the `Result` mirrors the fallible
/// registration API.
pub fn create_builtin_registry() -> Result<AnnotationRegistry> {
    let mut registry = AnnotationRegistry::new();

    registry.register::<KeyValueHandler>()?;
    registry.register::<JsonHandler>()?;
    registry.register::<MarkerHandler>()?;

    registry.set_alias("key-value", "KeyValue")?;
    registry.set_alias("kv", "key-value")?;
    registry.set_alias("flag", "Marker")?;

    Ok(registry)
}

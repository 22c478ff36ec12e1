//! Error types for the annotation registry.
//!
//! `RegistryError` covers every failure the registry itself can raise.
//! Handler-defined failures (malformed annotation content) travel as a
//! boxed [`HandlerError`] and are chained via `#[source]` so callers can
//! inspect the original error.

use thiserror::Error;

/// Error type produced by annotation handlers when their content is malformed.
///
/// Each handler parses its own content grammar and fails on its own terms;
/// the registry never interprets these, it only chains them.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for the annotation registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A handler with this identity is already registered.
    #[error("Handler '{0}' is already registered")]
    DuplicateHandler(String),

    /// Alias target is neither a registered handler nor a known alias.
    #[error("Alias '{alias}' targets unknown handler or alias '{target}'")]
    UnknownAliasTarget { alias: String, target: String },

    /// An alias with this normalized key already exists.
    ///
    /// Aliases are append-only; redefinition would allow alias cycles.
    #[error("Alias '{0}' is already defined")]
    DuplicateAlias(String),

    /// Alias key contains only separator characters and normalizes to nothing.
    #[error("Alias '{0}' normalizes to an empty key")]
    EmptyAlias(String),

    /// No handler matched the name after following the alias chain.
    #[error("No handler registered for '{0}'")]
    HandlerNotFound(String),

    /// A handler rejected its annotation content.
    #[error("Handler '{name}' rejected annotation content: {source}")]
    Initialize {
        name: String,
        #[source]
        source: HandlerError,
    },
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

//! Error types for unit classification and catalog loading.

use thiserror::Error;

/// Result type alias using [`CatalogError`].
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Top-level error type for catalog operations.
///
/// Missing or oddly-typed fields inside a unit definition are never errors;
/// they classify to defaults. Only structural problems surface here.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Raw unit definition is not a key/value mapping.
    #[error("Invalid definition for unit '{id}': expected a mapping, found {found}")]
    InvalidInput {
        /// Unit identifier the definition was supplied for.
        id: String,
        /// JSON kind that was found instead.
        found: &'static str,
    },

    /// Two definitions share one unit identifier.
    #[error("Duplicate unit ID: {0}")]
    DuplicateUnit(String),

    /// Data file parsing error.
    #[error("Failed to parse data file '{path}': {message}")]
    DataParseError {
        /// Path to the file that failed to parse.
        path: String,
        /// Error message.
        message: String,
    },

    /// Failed to read a file.
    #[error("Failed to read '{path}': {source}")]
    Io {
        /// Path that could not be read.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Name of the JSON kind of `value`, for error messages.
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

//! Error types for the search UI bridges.
//!
//! None of these reach the user: callers log them and fall back to the
//! table's default behaviour.

use thiserror::Error;

/// Result type alias using [`UiError`].
pub type Result<T> = std::result::Result<T, UiError>;

/// Errors raised while wiring widgets together.
#[derive(Debug, Error)]
pub enum UiError {
    /// The embedded search-options JSON could not be parsed.
    #[error("Failed to parse unit search options: {0}")]
    OptionsParse(#[from] serde_json::Error),

    /// The table widget did not initialise within the configured attempts.
    #[error("Table widget not ready after {attempts} attempts")]
    WidgetNotReady {
        /// Attempts made before giving up.
        attempts: u32,
    },
}

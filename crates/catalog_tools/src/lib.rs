//! # Unit Catalog Tools
//!
//! Command-line support for the catalog:
//! - Loading unit data from JSON and RON files
//! - Exporting unit profiles and search options
//! - Data validation

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod loader;
pub mod validate;

use catalog_core::error::CatalogError;
use thiserror::Error;

/// Errors surfaced by the command-line tools.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Loading or classifying unit data failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Writing JSON output failed.
    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),

    /// Validation found problems.
    #[error("Validation found {problems} problem(s)")]
    Invalid {
        /// Number of problems reported.
        problems: usize,
    },
}

//! # Catalog Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Raw unit fixtures
//! - In-memory table, combobox, history and page widgets
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod strategies;
pub mod widgets;

/// Re-export proptest for convenience.
pub use proptest;

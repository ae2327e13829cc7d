//! # Catalog Core
//!
//! Classification core for the unit catalog.
//!
//! This crate contains **only** pure logic:
//! - No rendering
//! - No IO beyond [`config::CatalogConfig::load`]
//! - No global state
//!
//! Raw unit definitions go in; [`profile::UnitProfile`]s and the
//! [`facets::FacetIndex`] come out.
//!
//! ## Crate Structure
//!
//! - [`data`] - Typed raw unit definitions
//! - [`classify`] - Faction, type, role and tag derivation
//! - [`facets`] - Filterable facet options
//! - [`catalog`] - Classified unit collections
//! - [`config`] - Catalog configuration
//! - [`factions`], [`profile`], [`error`] - Shared types

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod catalog;
pub mod classify;
pub mod config;
pub mod data;
pub mod error;
pub mod facets;
pub mod factions;
pub mod profile;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::catalog::UnitCatalog;
    pub use crate::classify::{classify, icon_key, Classifier, Role, UnitType};
    pub use crate::config::{CatalogConfig, PollConfig};
    pub use crate::data::UnitDefinition;
    pub use crate::error::{CatalogError, Result};
    pub use crate::facets::{FacetIndex, FacetKind, FacetOption, IconLibrary};
    pub use crate::factions::Faction;
    pub use crate::profile::UnitProfile;
}

//! Raw unit definition types.
//!
//! This module contains no IO - it only lifts already-parsed records
//! into typed structures. File loading is handled by `catalog_tools`.

mod unit_definition;

pub use unit_definition::{CustomParams, UnitDefinition, WeaponDef, WeaponMount};

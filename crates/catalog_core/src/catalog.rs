//! Classified unit collections.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::classify::Classifier;
use crate::error::{json_kind, CatalogError, Result};
use crate::facets::{FacetIndex, IconLibrary};
use crate::factions::Faction;
use crate::profile::UnitProfile;

/// All unit profiles of a data set, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct UnitCatalog {
    units: BTreeMap<String, UnitProfile>,
}

impl UnitCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify every definition in an `id -> record` mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not a mapping or any record is not a mapping.
    pub fn from_value(classifier: &Classifier, raw: &Value) -> Result<Self> {
        let Value::Object(records) = raw else {
            return Err(CatalogError::InvalidInput {
                id: "<collection>".to_string(),
                found: json_kind(raw),
            });
        };
        let mut catalog = Self::new();
        catalog.extend_from(classifier, records.iter().map(|(id, v)| (id.as_str(), v)))?;
        Ok(catalog)
    }

    /// Classify and insert a batch of definitions.
    ///
    /// # Errors
    ///
    /// Returns an error on a non-mapping record or an id already present.
    pub fn extend_from<'a, I>(&mut self, classifier: &Classifier, records: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        for (id, raw) in records {
            self.insert(classifier.classify(id, raw)?)?;
        }
        Ok(())
    }

    /// Insert a profile.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateUnit`] if the id is already present.
    pub fn insert(&mut self, profile: UnitProfile) -> Result<()> {
        if self.units.contains_key(&profile.id) {
            return Err(CatalogError::DuplicateUnit(profile.id));
        }
        self.units.insert(profile.id.clone(), profile);
        Ok(())
    }

    /// Find a unit by its id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&UnitProfile> {
        self.units.get(id)
    }

    /// All profiles in id order.
    pub fn iter(&self) -> impl Iterator<Item = &UnitProfile> {
        self.units.values()
    }

    /// Profiles of one faction, in id order.
    pub fn by_faction(&self, faction: Faction) -> impl Iterator<Item = &UnitProfile> {
        self.units.values().filter(move |u| u.faction == faction)
    }

    /// Build the facet index for this catalog.
    #[must_use]
    pub fn facet_index(&self, icons: &IconLibrary) -> FacetIndex {
        FacetIndex::build(self.iter(), icons)
    }

    /// Number of units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the catalog holds no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

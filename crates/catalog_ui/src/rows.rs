//! Machine-readable row attributes consumed by the row predicate.

use catalog_core::profile::UnitProfile;
use serde::{Deserialize, Serialize};

/// Separator between tags in the encoded tag attribute.
pub const TAG_SEPARATOR: char = ' ';

/// Data attributes a table row exposes for filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowAttributes {
    /// Name and description, searched by free text.
    pub search_text: String,
    /// Space-separated tag list.
    pub tags: String,
    /// Faction name.
    pub faction: String,
}

impl RowAttributes {
    /// Encode a unit profile.
    #[must_use]
    pub fn from_profile(profile: &UnitProfile) -> Self {
        Self {
            search_text: profile.name.clone(),
            tags: profile.tags.join(&TAG_SEPARATOR.to_string()),
            faction: profile.faction.display_name().to_string(),
        }
    }

    /// Append a description to the searchable text.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        let description = description.trim();
        if !description.is_empty() {
            self.search_text.push(' ');
            self.search_text.push_str(description);
        }
        self
    }
}

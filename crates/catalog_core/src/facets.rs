//! Facet index: the selectable filter values across a unit collection.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::profile::UnitProfile;

/// Which filter dimension a facet option belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetKind {
    /// Unit tag (`Bot`, `Builder`, `T2`, ...).
    Tag,
    /// Unit faction.
    Faction,
}

/// One selectable option of the search combobox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    /// Value matched against rows; unique within its kind.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Facet dimension.
    pub kind: FacetKind,
    /// Icon URL, if one is available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Icon assets available for tag options.
#[derive(Debug, Clone, Default)]
pub struct IconLibrary {
    dir: String,
    // lowercased stem -> file name
    files: BTreeMap<String, String>,
}

impl IconLibrary {
    /// Create a library of icon files served from `dir`.
    pub fn new<I, S>(dir: impl Into<String>, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut library = Self {
            dir: dir.into(),
            files: BTreeMap::new(),
        };
        for file in files {
            let file = file.into();
            let stem = file
                .rsplit_once('.')
                .map_or(file.as_str(), |(stem, _)| stem)
                .to_lowercase();
            library.files.entry(stem).or_insert(file);
        }
        library
    }

    /// Icon URL for a tag, by case-insensitive exact name match.
    #[must_use]
    pub fn lookup(&self, tag: &str) -> Option<String> {
        self.files
            .get(&tag.to_lowercase())
            .map(|file| format!("{}/{file}", self.dir))
    }

    /// Number of icons known.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no icons are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Deduplicated, sorted facet options for a unit collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetIndex {
    factions: Vec<FacetOption>,
    tags: Vec<FacetOption>,
}

impl FacetIndex {
    /// Build the index from a full profile collection.
    ///
    /// Factions come first, tags second; within each kind options are
    /// sorted by value, case-insensitively.
    #[must_use]
    pub fn build<'a, I>(profiles: I, icons: &IconLibrary) -> Self
    where
        I: IntoIterator<Item = &'a UnitProfile>,
    {
        let mut factions: BTreeMap<String, Option<String>> = BTreeMap::new();
        let mut tags: BTreeSet<String> = BTreeSet::new();

        for profile in profiles {
            factions
                .entry(profile.faction.display_name().to_string())
                .or_insert_with(|| profile.faction_icon_path.clone());
            tags.extend(profile.tags.iter().cloned());
        }

        let mut factions: Vec<FacetOption> = factions
            .into_iter()
            .map(|(value, icon)| FacetOption {
                label: capitalize(&value),
                value,
                kind: FacetKind::Faction,
                icon,
            })
            .collect();

        let mut tags: Vec<FacetOption> = tags
            .into_iter()
            .map(|tag| FacetOption {
                icon: icons.lookup(&tag),
                label: tag.clone(),
                value: tag,
                kind: FacetKind::Tag,
            })
            .collect();

        factions.sort_by(compare_values);
        tags.sort_by(compare_values);

        tracing::debug!(
            factions = factions.len(),
            tags = tags.len(),
            "built facet index"
        );

        Self { factions, tags }
    }

    /// Faction options.
    #[must_use]
    pub fn factions(&self) -> &[FacetOption] {
        &self.factions
    }

    /// Tag options.
    #[must_use]
    pub fn tags(&self) -> &[FacetOption] {
        &self.tags
    }

    /// All options, factions first.
    pub fn options(&self) -> impl Iterator<Item = &FacetOption> {
        self.factions.iter().chain(self.tags.iter())
    }

    /// Find an option by kind and value.
    #[must_use]
    pub fn get(&self, kind: FacetKind, value: &str) -> Option<&FacetOption> {
        match kind {
            FacetKind::Faction => self.factions.iter().find(|o| o.value == value),
            FacetKind::Tag => self.tags.iter().find(|o| o.value == value),
        }
    }

    /// Serialize the options as the JSON payload the search widget mounts with.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let options: Vec<&FacetOption> = self.options().collect();
        serde_json::to_string(&options)
    }
}

fn compare_values(a: &FacetOption, b: &FacetOption) -> std::cmp::Ordering {
    a.value
        .to_lowercase()
        .cmp(&b.value.to_lowercase())
        .then_with(|| a.value.cmp(&b.value))
}

/// Uppercase the first character, lowercase the rest.
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use serde_json::json;

    fn profiles() -> Vec<UnitProfile> {
        vec![
            classify(
                "corck",
                &json!({"icon": "icons/bot.png", "customparams": {"unitgroup": "builder"}, "buildoptions": ["corsolar"]}),
            )
            .unwrap(),
            classify("armpw", &json!({"icon": "icons/bot.png", "customparams": {"unitgroup": "weapon"}})).unwrap(),
            classify("armsolar", &json!({"customparams": {"unitgroup": "energy"}})).unwrap(),
            classify("armpw2", &json!({"icon": "icons/bot.png", "customparams": {"unitgroup": "weapon"}})).unwrap(),
        ]
    }

    #[test]
    fn test_factions_deduplicated_and_sorted() {
        let index = FacetIndex::build(&profiles(), &IconLibrary::default());
        let values: Vec<&str> = index.factions().iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["Armada", "Cortex"]);
        assert_eq!(
            index.factions()[0].icon.as_deref(),
            Some("/images/factions/armada.png")
        );
        assert_eq!(index.factions()[0].label, "Armada");
    }

    #[test]
    fn test_tags_sorted_case_insensitively() {
        let index = FacetIndex::build(&profiles(), &IconLibrary::default());
        let values: Vec<&str> = index.tags().iter().map(|o| o.value.as_str()).collect();
        assert_eq!(
            values,
            vec!["Bot", "Builder", "Building", "Constructor", "Energy", "T1", "Unit", "Weapon"]
        );
        assert!(index.tags().iter().all(|o| o.label == o.value));
    }

    #[test]
    fn test_tag_icons_match_case_insensitively() {
        let icons = IconLibrary::new("images/icons", ["bot.png", "ENERGY.svg", "weapon_alt.png"]);
        let index = FacetIndex::build(&profiles(), &icons);
        assert_eq!(
            index.get(FacetKind::Tag, "Bot").and_then(|o| o.icon.as_deref()),
            Some("images/icons/bot.png")
        );
        assert_eq!(
            index.get(FacetKind::Tag, "Energy").and_then(|o| o.icon.as_deref()),
            Some("images/icons/ENERGY.svg")
        );
        assert_eq!(index.get(FacetKind::Tag, "Weapon").unwrap().icon, None);
    }

    #[test]
    fn test_json_payload() {
        let index = FacetIndex::build(&profiles()[..1], &IconLibrary::default());
        let json: serde_json::Value = serde_json::from_str(&index.to_json().unwrap()).unwrap();
        assert_eq!(
            json[0],
            json!({"value": "Cortex", "label": "Cortex", "kind": "faction", "icon": "/images/factions/cortex.png"})
        );
        assert_eq!(json[1], json!({"value": "Bot", "label": "Bot", "kind": "tag"}));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("armada"), "Armada");
        assert_eq!(capitalize("UNKNOWN"), "Unknown");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_empty_collection() {
        let index = FacetIndex::build(&[], &IconLibrary::default());
        assert_eq!(index.options().count(), 0);
        assert_eq!(index.to_json().unwrap(), "[]");
    }
}

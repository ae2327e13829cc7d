//! Derived, immutable view of a unit.

use serde::{Serialize, Serializer};

use crate::classify::{Role, UnitType};
use crate::factions::Faction;

/// Semantic facets and stats derived from one raw unit definition.
///
/// Produced by [`crate::classify::Classifier`]; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitProfile {
    /// Unit id, unique within a collection.
    pub id: String,
    /// Display name (currently the id).
    pub name: String,
    /// Faction derived from the id prefix.
    pub faction: Faction,
    /// Movement class derived from the icon key.
    #[serde(rename = "type")]
    pub unit_type: UnitType,
    /// Tactical role, if any. Serialized as its label, empty when absent.
    #[serde(serialize_with = "serialize_role")]
    pub role: Option<Role>,
    /// Facet tags in insertion order, without duplicates.
    pub tags: Vec<String>,
    /// Tech level, at least 1.
    pub tech_level: u32,
    /// Metal cost.
    pub metal_cost: Option<f64>,
    /// Energy cost.
    pub energy_cost: Option<f64>,
    /// Maximum health.
    pub health: Option<f64>,
    /// Line of sight radius.
    pub sight_distance: Option<f64>,
    /// Movement speed.
    pub speed: Option<f64>,
    /// Build power.
    pub construction_speed: Option<f64>,
    /// Build time.
    pub build_time: Option<f64>,
    /// Longest resolvable weapon range.
    pub weapon_range: Option<f64>,
    /// Has at least one build option.
    pub constructor: bool,
    /// Icon asset URL.
    pub icon_path: Option<String>,
    /// Build picture URL.
    pub buildpic_path: Option<String>,
    /// Faction emblem URL.
    pub faction_icon_path: Option<String>,
}

fn serialize_role<S: Serializer>(role: &Option<Role>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(role.as_ref().map_or("", Role::label))
}

impl UnitProfile {
    /// Role label, empty when the unit has no role.
    #[must_use]
    pub fn role_label(&self) -> &'static str {
        self.role.as_ref().map_or("", Role::label)
    }

    /// Check if this unit carries the specified tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// The `T<n>` tag of this unit.
    #[must_use]
    pub fn tech_tag(&self) -> String {
        format!("T{}", self.tech_level)
    }
}

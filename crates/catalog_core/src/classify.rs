//! Classification of raw unit definitions into semantic facets.
//!
//! The derivation order matters. Later rules override earlier ones:
//!
//! 1. Icon key (commander check) decides the base type.
//! 2. Air transports get the `Transport` role before unit groups are read.
//! 3. `customparams.unitgroup` maps through a fixed vocabulary.
//! 4. Buildings get `Factory`, `Artillery` or `Defense` overrides.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::config::CatalogConfig;
use crate::data::UnitDefinition;
use crate::error::Result;
use crate::factions::Faction;
use crate::profile::UnitProfile;

/// Icon key assigned to every commander icon.
pub const COMMANDER_ICON_KEY: &str = "commander";

/// Icon key marking factory buildings.
pub const FACTORY_ICON_KEY: &str = "factory";

/// Movement class of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitType {
    /// Static structure (also the fallback for unknown icon keys).
    Building,
    /// Walking unit.
    Bot,
    /// Wheeled or tracked unit.
    Vehicle,
    /// Hovercraft.
    Hover,
    /// Surface ship.
    Ship,
    /// Submarine.
    Submarine,
    /// Land and water unit.
    Amphibious,
    /// Aircraft.
    Air,
}

impl UnitType {
    /// Map an icon key to a type. Commanders are bots; unknown keys are buildings.
    #[must_use]
    pub fn from_icon_key(key: &str) -> Self {
        match key {
            "" => Self::Building,
            COMMANDER_ICON_KEY => Self::Bot,
            "air" => Self::Air,
            "bot" | "kbot" => Self::Bot,
            "vehicle" => Self::Vehicle,
            "hover" => Self::Hover,
            "ship" => Self::Ship,
            "sub" => Self::Submarine,
            "amphib" => Self::Amphibious,
            _ => Self::Building,
        }
    }

    /// Display label, also used as a tag.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Building => "Building",
            Self::Bot => "Bot",
            Self::Vehicle => "Vehicle",
            Self::Hover => "Hover",
            Self::Ship => "Ship",
            Self::Submarine => "Submarine",
            Self::Amphibious => "Amphibious",
            Self::Air => "Air",
        }
    }

    /// Whether this is a static structure.
    #[must_use]
    pub const fn is_building(&self) -> bool {
        matches!(self, Self::Building)
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for UnitType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Tactical role of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// Starting commander.
    Commander,
    /// Air transport.
    Transport,
    /// Builds other units.
    Builder,
    /// Armed unit.
    Weapon,
    /// Anti-air.
    AntiAir,
    /// Anti-submarine.
    Sub,
    /// Utility (radar, jammer, ...).
    Utility,
    /// Metal economy.
    Metal,
    /// Energy economy.
    Energy,
    /// Explosive.
    Explosive,
    /// EMP.
    Emp,
    /// Anti-nuke.
    AntiNuke,
    /// Nuke.
    Nuke,
    /// Unit-producing building.
    Factory,
    /// Game-ending artillery building.
    Artillery,
    /// Armed building.
    Defense,
}

impl Role {
    /// Map a raw `customparams.unitgroup` value through the role vocabulary.
    #[must_use]
    pub fn from_unit_group(group: &str) -> Option<Self> {
        let role = match group {
            "builder" | "buildert2" | "buildert3" => Self::Builder,
            "weapon" | "weaponaa" | "weaponsub" => Self::Weapon,
            "aa" => Self::AntiAir,
            "sub" => Self::Sub,
            "util" => Self::Utility,
            "metal" => Self::Metal,
            "energy" => Self::Energy,
            "explo" => Self::Explosive,
            "emp" => Self::Emp,
            "antinuke" => Self::AntiNuke,
            "nuke" => Self::Nuke,
            _ => return None,
        };
        Some(role)
    }

    /// Display label, also used as a tag.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Commander => "Commander",
            Self::Transport => "Transport",
            Self::Builder => "Builder",
            Self::Weapon => "Weapon",
            Self::AntiAir => "Anti-Air",
            Self::Sub => "Sub",
            Self::Utility => "Utility",
            Self::Metal => "Metal",
            Self::Energy => "Energy",
            Self::Explosive => "Explosive",
            Self::Emp => "EMP",
            Self::AntiNuke => "Anti-Nuke",
            Self::Nuke => "Nuke",
            Self::Factory => "Factory",
            Self::Artillery => "Artillery",
            Self::Defense => "Defense",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Extract the icon key from an icon asset path.
///
/// Takes the file stem, maps commander icons (`armcom*`, `corcom*`,
/// `legcom*`) to [`COMMANDER_ICON_KEY`], otherwise keeps the part before the
/// first `_` and strips trailing digits.
///
/// # Example
///
/// ```
/// use catalog_core::classify::icon_key;
///
/// assert_eq!(icon_key("icons/bot2_t2.png"), "bot");
/// assert_eq!(icon_key("icons/armcom.png"), "commander");
/// assert_eq!(icon_key("icons/123.png"), "");
/// ```
#[must_use]
pub fn icon_key(icon: &str) -> String {
    let base = icon.rsplit('/').next().unwrap_or(icon);
    let stem = match base.rfind('.') {
        Some(dot) if dot > 0 => &base[..dot],
        _ => base,
    };

    let is_commander = ["arm", "cor", "leg"]
        .iter()
        .any(|prefix| stem.strip_prefix(prefix).is_some_and(|rest| rest.starts_with("com")));
    if is_commander {
        return COMMANDER_ICON_KEY.to_string();
    }

    let head = stem.split('_').next().unwrap_or_default();
    head.trim_end_matches(|c: char| c.is_ascii_digit()).to_string()
}

/// Derives [`UnitProfile`]s from raw definitions.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: CatalogConfig,
}

impl Classifier {
    /// Create a classifier using the given configuration.
    #[must_use]
    pub fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Classify a raw record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::CatalogError::InvalidInput`] if `raw` is not a mapping.
    pub fn classify(&self, id: &str, raw: &Value) -> Result<UnitProfile> {
        let definition = UnitDefinition::from_value(id, raw)?;
        Ok(self.classify_definition(id, &definition))
    }

    /// Classify an already-lifted definition. Total.
    #[must_use]
    pub fn classify_definition(&self, id: &str, def: &UnitDefinition) -> UnitProfile {
        let key = def.icon.as_deref().map(icon_key).unwrap_or_default();
        let faction = Faction::from_unit_id(id);
        let unit_type = UnitType::from_icon_key(&key);
        let role = self.derive_role(id, def, &key, unit_type);
        let tech_level = def.customparams.techlevel.unwrap_or(1);
        let constructor = def.is_constructor();
        let tags = derive_tags(unit_type, role, constructor, tech_level);

        tracing::trace!(id, %faction, %unit_type, ?role, "classified unit");

        UnitProfile {
            id: id.to_string(),
            name: id.to_string(),
            faction,
            unit_type,
            role,
            tags,
            tech_level,
            metal_cost: def.metalcost.or(def.buildcostmetal),
            energy_cost: def.energycost.or(def.buildcostenergy),
            health: def.health,
            sight_distance: def.sightdistance,
            speed: def.speed,
            construction_speed: def.workertime,
            build_time: def.buildtime,
            weapon_range: def.max_weapon_range(),
            constructor,
            icon_path: def
                .icon
                .as_ref()
                .map(|icon| format!("{}/{icon}", self.config.image_root)),
            buildpic_path: def.buildpic.as_deref().map(|pic| self.buildpic_path(pic)),
            faction_icon_path: Some(format!(
                "{}/factions/{}.png",
                self.config.image_root,
                faction.slug()
            )),
        }
    }

    fn derive_role(
        &self,
        id: &str,
        def: &UnitDefinition,
        key: &str,
        unit_type: UnitType,
    ) -> Option<Role> {
        if key == COMMANDER_ICON_KEY {
            return Some(Role::Commander);
        }
        if unit_type == UnitType::Air && def.is_transport() {
            return Some(Role::Transport);
        }

        let grouped = def
            .customparams
            .unitgroup
            .as_deref()
            .and_then(Role::from_unit_group);

        if unit_type.is_building() {
            if key == FACTORY_ICON_KEY {
                return Some(Role::Factory);
            }
            if grouped == Some(Role::Weapon) {
                return Some(if self.config.is_artillery(id) {
                    Role::Artillery
                } else {
                    Role::Defense
                });
            }
        }

        grouped
    }

    fn buildpic_path(&self, pic: &str) -> String {
        let lower = pic.to_lowercase();
        let name = match lower.strip_suffix(".dds") {
            Some(stem) => format!("{stem}.png"),
            None => lower,
        };
        format!("{}/unitpics/{name}", self.config.image_root)
    }
}

/// Classify a raw record with the default configuration.
///
/// # Errors
///
/// Returns [`crate::error::CatalogError::InvalidInput`] if `raw` is not a mapping.
pub fn classify(id: &str, raw: &Value) -> Result<UnitProfile> {
    Classifier::default().classify(id, raw)
}

fn derive_tags(
    unit_type: UnitType,
    role: Option<Role>,
    constructor: bool,
    tech_level: u32,
) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let mut push = |tag: &str| {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    };

    if unit_type.is_building() {
        push("Building");
    } else {
        push("Unit");
        push(unit_type.label());
    }

    match role {
        Some(Role::Artillery) if unit_type.is_building() => {
            push(Role::Defense.label());
            push(Role::Artillery.label());
        }
        Some(role) => push(role.label()),
        None => {}
    }

    if constructor {
        push("Constructor");
    }
    push(&format!("T{tech_level}"));

    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(id: &str, raw: Value) -> UnitProfile {
        classify(id, &raw).unwrap()
    }

    #[test]
    fn test_icon_key_extraction() {
        assert_eq!(icon_key("icons/kbot.png"), "kbot");
        assert_eq!(icon_key("icons/vehicle2.png"), "vehicle");
        assert_eq!(icon_key("icons/air_t2_bomber.png"), "air");
        assert_eq!(icon_key("icons/legcomlvl3.png"), "commander");
        assert_eq!(icon_key("factory_t2"), "factory");
        assert_eq!(icon_key("icons/123.png"), "");
        assert_eq!(icon_key(""), "");
    }

    #[test]
    fn test_missing_icon_is_building() {
        let unit = profile("armsolar", json!({"customparams": {"unitgroup": "energy"}}));
        assert_eq!(unit.unit_type, UnitType::Building);
        assert_eq!(unit.role, Some(Role::Energy));
        assert_eq!(unit.tags, vec!["Building", "Energy", "T1"]);
    }

    #[test]
    fn test_commander() {
        let unit = profile(
            "armcom",
            json!({
                "icon": "icons/armcom.png",
                "customparams": {"unitgroup": "builder"},
                "buildoptions": ["armsolar"],
            }),
        );
        assert_eq!(unit.unit_type, UnitType::Bot);
        assert_eq!(unit.role, Some(Role::Commander));
        assert_eq!(unit.tags, vec!["Unit", "Bot", "Commander", "Constructor", "T1"]);
    }

    #[test]
    fn test_air_transport_precedes_unit_group() {
        let unit = profile(
            "armatlas",
            json!({
                "icon": "icons/air_trans.png",
                "transportcapacity": 1,
                "customparams": {"unitgroup": "util"},
            }),
        );
        assert_eq!(unit.role, Some(Role::Transport));
    }

    #[test]
    fn test_ground_transport_uses_unit_group() {
        let unit = profile(
            "armthovr",
            json!({
                "icon": "icons/hover_trans.png",
                "transportcapacity": 4,
                "customparams": {"unitgroup": "util"},
            }),
        );
        assert_eq!(unit.unit_type, UnitType::Hover);
        assert_eq!(unit.role, Some(Role::Utility));
    }

    #[test]
    fn test_factory_override() {
        let unit = profile(
            "armlab",
            json!({"icon": "icons/factory.png", "customparams": {"unitgroup": "builder"}}),
        );
        assert_eq!(unit.role, Some(Role::Factory));
        assert_eq!(unit.tags, vec!["Building", "Factory", "T1"]);
    }

    #[test]
    fn test_factory_without_unit_group() {
        let unit = profile("armlab", json!({"icon": "icons/factory.png"}));
        assert_eq!(unit.role, Some(Role::Factory));
    }

    #[test]
    fn test_armed_building_is_defense() {
        let unit = profile(
            "armllt",
            json!({"icon": "icons/defence_0.png", "customparams": {"unitgroup": "weapon"}}),
        );
        assert_eq!(unit.role, Some(Role::Defense));
        assert_eq!(unit.tags, vec!["Building", "Defense", "T1"]);
    }

    #[test]
    fn test_game_ender_artillery() {
        let unit = profile(
            "armbrtha",
            json!({
                "customparams": {"unitgroup": "weapon", "techlevel": 2},
            }),
        );
        assert_eq!(unit.role, Some(Role::Artillery));
        assert_eq!(unit.tags, vec!["Building", "Defense", "Artillery", "T2"]);
    }

    #[test]
    fn test_mobile_weapon_keeps_weapon_role() {
        let unit = profile(
            "armpw",
            json!({"icon": "icons/bot.png", "customparams": {"unitgroup": "weapon"}}),
        );
        assert_eq!(unit.role, Some(Role::Weapon));
        assert_eq!(unit.tags, vec!["Unit", "Bot", "Weapon", "T1"]);
    }

    #[test]
    fn test_unknown_unit_group_has_no_role() {
        let unit = profile("armpw", json!({"icon": "icons/bot.png", "customparams": {"unitgroup": "zzz"}}));
        assert_eq!(unit.role, None);
        assert_eq!(unit.role_label(), "");
        assert_eq!(unit.tags, vec!["Unit", "Bot", "T1"]);
    }

    #[test]
    fn test_unknown_icon_key_is_building() {
        let unit = profile("armrad", json!({"icon": "icons/radar.png"}));
        assert_eq!(unit.unit_type, UnitType::Building);
    }

    #[test]
    fn test_type_table() {
        let cases = [
            ("air", UnitType::Air),
            ("bot", UnitType::Bot),
            ("kbot", UnitType::Bot),
            ("vehicle", UnitType::Vehicle),
            ("hover", UnitType::Hover),
            ("ship", UnitType::Ship),
            ("sub", UnitType::Submarine),
            ("amphib", UnitType::Amphibious),
        ];
        for (key, expected) in cases {
            assert_eq!(UnitType::from_icon_key(key), expected, "key {key}");
        }
    }

    #[test]
    fn test_stats_and_paths() {
        let unit = profile(
            "corak",
            json!({
                "icon": "icons/bot.png",
                "buildpic": "CORAK.DDS",
                "buildcostmetal": 50,
                "energycost": 900,
                "health": 280,
                "sightdistance": 350,
                "speed": 78.5,
                "workertime": 0,
                "buildtime": 1500,
            }),
        );
        assert_eq!(unit.faction, Faction::Cortex);
        assert_eq!(unit.metal_cost, Some(50.0));
        assert_eq!(unit.energy_cost, Some(900.0));
        assert_eq!(unit.health, Some(280.0));
        assert_eq!(unit.sight_distance, Some(350.0));
        assert_eq!(unit.speed, Some(78.5));
        assert_eq!(unit.construction_speed, Some(0.0));
        assert_eq!(unit.build_time, Some(1500.0));
        assert_eq!(unit.icon_path.as_deref(), Some("/images/icons/bot.png"));
        assert_eq!(unit.buildpic_path.as_deref(), Some("/images/unitpics/corak.png"));
        assert_eq!(
            unit.faction_icon_path.as_deref(),
            Some("/images/factions/cortex.png")
        );
    }

    #[test]
    fn test_empty_definition_defaults() {
        let unit = profile("raptor", json!({}));
        assert_eq!(unit.faction, Faction::Unknown);
        assert_eq!(unit.unit_type, UnitType::Building);
        assert_eq!(unit.tech_level, 1);
        assert_eq!(unit.metal_cost, None);
        assert_eq!(unit.icon_path, None);
        assert_eq!(unit.buildpic_path, None);
        assert!(!unit.constructor);
        assert_eq!(unit.tags, vec!["Building", "T1"]);
    }

    #[test]
    fn test_custom_artillery_list() {
        let config = CatalogConfig {
            artillery_ids: vec!["cortoast".to_string()],
            ..CatalogConfig::default()
        };
        let classifier = Classifier::new(config);
        let unit = classifier
            .classify("cortoast", &json!({"customparams": {"unitgroup": "weapon"}}))
            .unwrap();
        assert_eq!(unit.role, Some(Role::Artillery));
        let unit = classifier
            .classify("armbrtha", &json!({"customparams": {"unitgroup": "weapon"}}))
            .unwrap();
        assert_eq!(unit.role, Some(Role::Defense));
    }

    #[test]
    fn test_non_mapping_fails_fast() {
        assert!(classify("armpw", &json!("armpw")).is_err());
        assert!(classify("armpw", &Value::Null).is_err());
    }
}

//! Typed view over raw unit definitions.
//!
//! Game data arrives as loosely-typed nested records. Every field the
//! classifier reads is lifted into an `Option` here; a missing key and a
//! key holding the wrong kind of value both become `None`.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{json_kind, CatalogError, Result};

/// Nested `customparams` block of a unit definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomParams {
    /// Raw unit group (`builder`, `weaponaa`, `energy`, ...).
    pub unitgroup: Option<String>,

    /// Tech level; values below 1 are treated as absent.
    pub techlevel: Option<u32>,
}

/// A weapon slot referencing an entry in [`UnitDefinition::weapondefs`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeaponMount {
    /// Name of the referenced weapon definition.
    pub def: Option<String>,
}

/// A weapon definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeaponDef {
    /// Maximum engagement range.
    pub range: Option<f64>,
}

/// Raw unit definition with every consumed field made explicit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnitDefinition {
    /// Icon asset path, relative to the image root.
    pub icon: Option<String>,
    /// Build picture file name (usually `.dds`).
    pub buildpic: Option<String>,
    /// Custom parameter block.
    pub customparams: CustomParams,
    /// Number of units this unit can carry.
    pub transportcapacity: Option<f64>,
    /// Metal cost.
    pub metalcost: Option<f64>,
    /// Legacy metal cost key.
    pub buildcostmetal: Option<f64>,
    /// Energy cost.
    pub energycost: Option<f64>,
    /// Legacy energy cost key.
    pub buildcostenergy: Option<f64>,
    /// Maximum health.
    pub health: Option<f64>,
    /// Line of sight radius.
    pub sightdistance: Option<f64>,
    /// Movement speed.
    pub speed: Option<f64>,
    /// Build power.
    pub workertime: Option<f64>,
    /// Build time.
    pub buildtime: Option<f64>,
    /// Weapon slots, in declaration order.
    pub weapons: Vec<WeaponMount>,
    /// Weapon definitions keyed by name; `None` when the block is absent.
    pub weapondefs: Option<BTreeMap<String, WeaponDef>>,
    /// Units this unit can construct.
    pub buildoptions: Vec<String>,
}

impl UnitDefinition {
    /// Lift a raw record into a typed definition.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidInput`] if `raw` is not a mapping.
    /// Malformed nested fields never error.
    pub fn from_value(id: &str, raw: &Value) -> Result<Self> {
        let Value::Object(map) = raw else {
            return Err(CatalogError::InvalidInput {
                id: id.to_string(),
                found: json_kind(raw),
            });
        };

        let customparams = map
            .get("customparams")
            .and_then(Value::as_object)
            .map(|params| CustomParams {
                unitgroup: string_field(params, "unitgroup"),
                techlevel: number_field(params, "techlevel")
                    .filter(|level| (1.0..=f64::from(u32::MAX)).contains(level))
                    .map(|level| level.trunc() as u32),
            })
            .unwrap_or_default();

        let weapons = map
            .get("weapons")
            .and_then(Value::as_array)
            .map(|slots| {
                slots
                    .iter()
                    .map(|slot| WeaponMount {
                        def: slot.as_object().and_then(|s| string_field(s, "def")),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let weapondefs = map.get("weapondefs").and_then(Value::as_object).map(|defs| {
            defs.iter()
                .map(|(name, def)| {
                    let range = def.as_object().and_then(|d| number_field(d, "range"));
                    (name.clone(), WeaponDef { range })
                })
                .collect()
        });

        let buildoptions = map
            .get("buildoptions")
            .and_then(Value::as_array)
            .map(|options| {
                options
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            icon: string_field(map, "icon"),
            buildpic: string_field(map, "buildpic"),
            customparams,
            transportcapacity: number_field(map, "transportcapacity"),
            metalcost: number_field(map, "metalcost"),
            buildcostmetal: number_field(map, "buildcostmetal"),
            energycost: number_field(map, "energycost"),
            buildcostenergy: number_field(map, "buildcostenergy"),
            health: number_field(map, "health"),
            sightdistance: number_field(map, "sightdistance"),
            speed: number_field(map, "speed"),
            workertime: number_field(map, "workertime"),
            buildtime: number_field(map, "buildtime"),
            weapons,
            weapondefs,
            buildoptions,
        })
    }

    /// Whether the unit can carry other units.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        self.transportcapacity.is_some_and(|capacity| capacity >= 1.0)
    }

    /// Whether the unit has at least one build option.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        !self.buildoptions.is_empty()
    }

    /// Longest range across the unit's resolvable weapons.
    ///
    /// Weapon names are looked up lowercased. Returns `None` when the unit
    /// has no weapons, no weapon definitions, or no reference resolves.
    #[must_use]
    pub fn max_weapon_range(&self) -> Option<f64> {
        let defs = self.weapondefs.as_ref()?;
        self.weapons
            .iter()
            .filter_map(|mount| mount.def.as_deref())
            .filter_map(|name| defs.get(&name.to_lowercase()))
            .filter_map(|def| def.range)
            .reduce(f64::max)
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Numbers are accepted as JSON numbers or numeric strings. Non-finite
/// values (`"inf"`, `"NaN"`) are absent.
fn number_field(map: &Map<String, Value>, key: &str) -> Option<f64> {
    let number = match map.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

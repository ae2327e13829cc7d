//! Test fixtures and helpers.
//!
//! Raw unit records shaped like real game data, for consistent testing.

use serde_json::{json, Map, Value};

/// Armada commander.
#[must_use]
pub fn commander() -> Value {
    json!({
        "icon": "icons/armcom.png",
        "buildpic": "ARMCOM.DDS",
        "metalcost": 2700,
        "energycost": 26000,
        "health": 3700,
        "sightdistance": 450,
        "speed": 37.5,
        "workertime": 300,
        "buildtime": 75000,
        "customparams": {"unitgroup": "builder"},
        "buildoptions": ["armsolar", "armmex", "armlab"],
        "weapons": [{"def": "ARMCOMLASER"}, {"def": "DISINTEGRATOR"}],
        "weapondefs": {
            "armcomlaser": {"range": 300},
            "disintegrator": {"range": 250},
        },
    })
}

/// Tech 1 construction bot.
#[must_use]
pub fn construction_bot() -> Value {
    json!({
        "icon": "icons/bot.png",
        "metalcost": 110,
        "energycost": 1600,
        "health": 690,
        "workertime": 80,
        "customparams": {"unitgroup": "builder", "techlevel": 1},
        "buildoptions": ["armsolar", "armmex"],
    })
}

/// Tech 1 assault bot.
#[must_use]
pub fn assault_bot() -> Value {
    json!({
        "icon": "icons/bot.png",
        "metalcost": 54,
        "health": 370,
        "customparams": {"unitgroup": "weapon"},
        "weapons": [{"def": "EMG"}],
        "weapondefs": {"emg": {"range": 180}},
    })
}

/// Tech 2 air transport.
#[must_use]
pub fn air_transport() -> Value {
    json!({
        "icon": "icons/air_trans.png",
        "transportcapacity": 1,
        "customparams": {"unitgroup": "util", "techlevel": 2},
    })
}

/// Solar collector.
#[must_use]
pub fn solar() -> Value {
    json!({
        "buildcostmetal": 155,
        "buildcostenergy": 0,
        "customparams": {"unitgroup": "energy"},
    })
}

/// Light laser tower.
#[must_use]
pub fn laser_tower() -> Value {
    json!({
        "icon": "icons/defence_0.png",
        "customparams": {"unitgroup": "weapon"},
        "weapons": [{"def": "ARM_LIGHTLASER"}],
        "weapondefs": {"arm_lightlaser": {"range": 430}},
    })
}

/// Long-range plasma cannon.
#[must_use]
pub fn big_bertha() -> Value {
    json!({
        "icon": "icons/defence_3.png",
        "customparams": {"unitgroup": "weapon", "techlevel": 2},
    })
}

/// Bot lab.
#[must_use]
pub fn bot_lab() -> Value {
    json!({
        "icon": "icons/factory.png",
        "customparams": {"unitgroup": "builder"},
        "buildoptions": ["armck", "armpw"],
    })
}

/// A small, mixed-faction unit set keyed by id.
#[must_use]
pub fn sample_units() -> Value {
    let mut units = Map::new();
    units.insert("armcom".into(), commander());
    units.insert("armck".into(), construction_bot());
    units.insert("armpw".into(), assault_bot());
    units.insert("armatlas".into(), air_transport());
    units.insert("armsolar".into(), solar());
    units.insert("armllt".into(), laser_tower());
    units.insert("armbrtha".into(), big_bertha());
    units.insert("armlab".into(), bot_lab());
    units.insert("corak".into(), assault_bot());
    units.insert("corck".into(), construction_bot());
    units.insert("legcom".into(), json!({"icon": "icons/legcom.png"}));
    units.insert("raptor_land".into(), json!({}));
    Value::Object(units)
}

/// A large synthetic unit set for benchmarks.
#[must_use]
pub fn synthetic_units(count: usize) -> Value {
    let prefixes = ["arm", "cor", "leg", "rap"];
    let templates = [
        construction_bot(),
        assault_bot(),
        air_transport(),
        solar(),
        laser_tower(),
    ];
    let units = (0..count)
        .map(|i| {
            let id = format!("{}unit{i}", prefixes[i % prefixes.len()]);
            (id, templates[i % templates.len()].clone())
        })
        .collect();
    Value::Object(units)
}

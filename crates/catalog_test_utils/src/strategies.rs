//! Proptest strategies for raw unit data.
//!
//! Records mix well-formed fields with wrongly-typed ones so that
//! properties exercise the classifier's defaulting.

use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Generate a unit id with a known or unknown faction prefix.
pub fn arb_unit_id() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("arm"), Just("cor"), Just("leg"), Just("rap"), Just("")],
        "[a-z0-9_]{0,10}",
    )
        .prop_map(|(prefix, rest)| format!("{prefix}{rest}"))
}

/// Generate an icon path.
pub fn arb_icon() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("icons/armcom.png".to_string()),
        Just("icons/factory.png".to_string()),
        "(air|bot|kbot|vehicle|hover|ship|sub|amphib|defence|radar)[0-9]{0,2}(_t[1-3])?"
            .prop_map(|key| format!("icons/{key}.png")),
    ]
}

/// Generate a raw unit group, including unknown ones.
pub fn arb_unit_group() -> impl Strategy<Value = String> {
    proptest::sample::select(vec![
        "builder",
        "buildert2",
        "weapon",
        "weaponaa",
        "aa",
        "sub",
        "util",
        "metal",
        "energy",
        "explo",
        "emp",
        "antinuke",
        "nuke",
        "mystery",
    ])
    .prop_map(str::to_string)
}

/// Generate a JSON scalar of any kind.
pub fn arb_junk() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-10i64..10_000).prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::String),
    ]
}

/// Generate a tech level field value, `None` when absent.
pub fn arb_techlevel() -> impl Strategy<Value = Option<u32>> {
    proptest::option::of(1u32..4)
}

/// Generate a raw unit record together with its declared tech level.
pub fn arb_unit_record() -> impl Strategy<Value = (Value, Option<u32>)> {
    (
        proptest::option::of(arb_icon()),
        proptest::option::of(arb_unit_group()),
        arb_techlevel(),
        proptest::option::of(0u32..3),
        proptest::collection::vec("[a-z]{3,8}", 0..3),
        arb_junk(),
        arb_junk(),
    )
        .prop_map(|(icon, group, techlevel, transport, buildoptions, health, speed)| {
            let mut record = Map::new();
            if let Some(icon) = icon {
                record.insert("icon".into(), json!(icon));
            }
            let mut params = Map::new();
            if let Some(group) = group {
                params.insert("unitgroup".into(), json!(group));
            }
            if let Some(level) = techlevel {
                params.insert("techlevel".into(), json!(level));
            }
            record.insert("customparams".into(), Value::Object(params));
            if let Some(capacity) = transport {
                record.insert("transportcapacity".into(), json!(capacity));
            }
            record.insert("buildoptions".into(), json!(buildoptions));
            record.insert("health".into(), health);
            record.insert("speed".into(), speed);
            (Value::Object(record), techlevel)
        })
}

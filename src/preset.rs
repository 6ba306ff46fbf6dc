// MIT License - Copyright (c) 2026 Peter Wright
// PTZ presets and preset-list response normalization

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::constants::{CHANNEL, PRESET_ENABLE, PRESET_ID, PRESET_NAME};
use crate::protocol::{coerce_i64, coerce_u32, is_truthy};

/// A stored PTZ position. Identity is `(channel, id)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PtzPreset {
    pub id: u32,
    pub name: String,
    pub enable: bool,
    pub channel: u32,
}

impl PtzPreset {
    /// Coerce one raw preset-like record.
    ///
    /// Returns `None` for non-objects and objects carrying neither `id` nor
    /// `ID`. `requested_channel` fills in a missing channel.
    pub fn from_raw(raw: &Value, requested_channel: u32) -> Option<Self> {
        if !raw.is_object() || !PRESET_ID.is_present(raw) {
            return None;
        }
        let id = PRESET_ID
            .get(raw)
            .and_then(coerce_i64)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0);
        let name = match PRESET_NAME.get(raw) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => format!("Preset {}", id),
        };
        let enable = PRESET_ENABLE.get(raw).is_none_or(is_truthy);
        let channel = CHANNEL
            .get(raw)
            .and_then(coerce_u32)
            .unwrap_or(requested_channel);
        Some(Self {
            id,
            name,
            enable,
            channel,
        })
    }
}

/// Lone object or array, as found under `preset` / `Presets`.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Value>),
    One(Map<String, Value>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<Value> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(obj) => vec![Value::Object(obj)],
        }
    }
}

#[derive(Deserialize)]
struct NestedPresetList {
    preset: Vec<Value>,
}

#[derive(Deserialize)]
struct NestedEnvelope {
    #[serde(rename = "PtzPreset")]
    ptz_preset: NestedPresetList,
}

#[derive(Deserialize)]
struct PtzPresetArrayEnvelope {
    #[serde(rename = "PtzPreset")]
    ptz_preset: Vec<Value>,
}

#[derive(Deserialize)]
struct PresetEnvelopeField {
    preset: OneOrMany,
}

#[derive(Deserialize)]
struct PresetsEnvelopeField {
    #[serde(rename = "Presets")]
    presets: OneOrMany,
}

/// The reply shapes a preset listing has been observed in.
///
/// [`PresetEnvelope::PRECEDENCE`] is the order they are tried in; the first
/// shape that matches wins, even when its list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetEnvelope {
    /// `{"PtzPreset": {"preset": [...]}}`
    NestedPresetArray,
    /// `{"PtzPreset": [...]}`
    PtzPresetArray,
    /// `{"preset": [...] | {...}}`
    PresetField,
    /// `{"Presets": [...] | {...}}`
    PresetsField,
    /// `[...]`
    BareArray,
    /// First top-level array of id-bearing objects, or a nested
    /// `{..., "x": {"preset"|"Preset": [...]}}`.
    GenericScan,
}

impl PresetEnvelope {
    pub const PRECEDENCE: [PresetEnvelope; 6] = [
        PresetEnvelope::NestedPresetArray,
        PresetEnvelope::PtzPresetArray,
        PresetEnvelope::PresetField,
        PresetEnvelope::PresetsField,
        PresetEnvelope::BareArray,
        PresetEnvelope::GenericScan,
    ];

    /// Try this shape against a reply. `None` means the shape does not apply.
    pub fn extract(&self, value: &Value) -> Option<Vec<Value>> {
        // serde would happily read a struct out of a sequence
        if !matches!(self, PresetEnvelope::BareArray) && !value.is_object() {
            return None;
        }
        match self {
            PresetEnvelope::NestedPresetArray => NestedEnvelope::deserialize(value)
                .ok()
                .map(|e| e.ptz_preset.preset),
            PresetEnvelope::PtzPresetArray => PtzPresetArrayEnvelope::deserialize(value)
                .ok()
                .map(|e| e.ptz_preset),
            PresetEnvelope::PresetField => PresetEnvelopeField::deserialize(value)
                .ok()
                .map(|e| e.preset.into_vec()),
            PresetEnvelope::PresetsField => PresetsEnvelopeField::deserialize(value)
                .ok()
                .map(|e| e.presets.into_vec()),
            PresetEnvelope::BareArray => value.as_array().cloned(),
            PresetEnvelope::GenericScan => generic_scan(value),
        }
    }
}

fn generic_scan(value: &Value) -> Option<Vec<Value>> {
    let obj = value.as_object()?;
    for (key, field) in obj {
        match field {
            Value::Array(items) => {
                if items.first().is_some_and(|first| first.is_object() && PRESET_ID.is_present(first)) {
                    debug!("Preset list found by scan under '{}'", key);
                    return Some(items.clone());
                }
            }
            Value::Object(nested) => {
                let list = nested
                    .get("preset")
                    .and_then(Value::as_array)
                    .or_else(|| nested.get("Preset").and_then(Value::as_array));
                if let Some(items) = list {
                    debug!("Preset list found by scan under '{}.preset'", key);
                    return Some(items.clone());
                }
            }
            _ => {}
        }
    }
    None
}

/// Pull the raw preset records out of a reply, whatever its shape.
pub fn extract_raw_presets(value: &Value) -> Vec<Value> {
    PresetEnvelope::PRECEDENCE
        .iter()
        .find_map(|shape| shape.extract(value))
        .unwrap_or_default()
}

/// Normalize a preset-list reply into canonical presets.
///
/// Never fails: an unrecognized reply yields an empty list. Records whose id
/// cannot be resolved to a positive number are dropped.
pub fn normalize_presets(value: &Value, requested_channel: u32) -> Vec<PtzPreset> {
    extract_raw_presets(value)
        .iter()
        .filter_map(|raw| PtzPreset::from_raw(raw, requested_channel))
        .filter(|preset| preset.id != 0)
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn arb_presets() -> impl Strategy<Value = Vec<PtzPreset>> {
        prop::collection::vec(
            (1u32..=64, "[A-Za-z0-9 ]{0,12}", any::<bool>(), 0u32..4).prop_map(
                |(id, name, enable, channel)| PtzPreset {
                    id,
                    name,
                    enable,
                    channel,
                },
            ),
            1..8,
        )
    }

    fn to_wire(preset: &PtzPreset) -> Value {
        json!({
            "id": preset.id,
            "name": preset.name,
            "enable": u8::from(preset.enable),
            "channel": preset.channel,
        })
    }

    proptest! {
        #[test]
        fn every_envelope_yields_the_same_presets(presets in arb_presets()) {
            let records: Vec<Value> = presets.iter().map(to_wire).collect();
            let shapes = [
                json!({"PtzPreset": {"preset": records.clone()}}),
                json!({"PtzPreset": records.clone()}),
                json!({"preset": records.clone()}),
                json!({"Presets": records.clone()}),
                Value::Array(records.clone()),
                json!({"status": "ok", "list": records.clone()}),
            ];
            for shape in &shapes {
                prop_assert_eq!(&normalize_presets(shape, 0), &presets);
            }
        }
    }
}

// MIT License - Copyright (c) 2026 Peter Wright
// Command vocabulary and wire-level value helpers

use serde_json::{Map, Value};

/// Commands understood by the camera's JSON API.
///
/// Every request is an envelope `{"cmd": <name>, "action": <0|1>, "param": {...}}`.
/// The transport owns the envelope; this crate only chooses the command,
/// the `param` payload and the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// `GetAbility` — per-user ability descriptor, including `abilityChn`.
    GetAbility,
    /// `GetPtzPreset` — list stored presets for a channel.
    GetPtzPreset,
    /// `SetPtzPreset` — create or rename a preset slot.
    SetPtzPreset,
    /// `PtzCtrl` — motion commands; `op: "ToPos"` moves to a preset.
    PtzCtrl,
    /// `GetMdAlarm` — motion alarm configuration including the detection scope.
    GetMdAlarm,
    /// `SetMdAlarm` — write motion alarm configuration.
    SetMdAlarm,
    /// `GetAiAlarm` — AI detection scope for one `ai_type`.
    GetAiAlarm,
    /// `SetAiAlarm` — overwrite the AI detection scope for one `ai_type`.
    SetAiAlarm,
    /// `GetAiCfg` — AI configuration; its `ability` block lists supported types.
    GetAiCfg,
    /// `GetMask` — privacy mask areas.
    GetMask,
    /// `SetMask` — privacy mask areas and enable flag.
    SetMask,
    /// `GetPtzGuard` — guard (auto-return) position settings.
    GetPtzGuard,
    /// `SetPtzGuard` — guard settings; `cmdStr: "setPos"` stores the current position.
    SetPtzGuard,
    /// `PtzCheck` — start PTZ self-calibration.
    PtzCheck,
    /// `GetPtzCheckState` — calibration progress.
    GetPtzCheckState,
    /// `GetPtzPatrol` — patrol routes.
    GetPtzPatrol,
    /// `SetPtzPatrol` — write one patrol route.
    SetPtzPatrol,
    /// `GetPtzTattern` — recorded pattern tracks (the firmware spells it this way).
    GetPtzTattern,
    /// `SetPtzTattern` — write pattern tracks.
    SetPtzTattern,
    /// `GetAutoFocus` — autofocus state (wire field is `disable`).
    GetAutoFocus,
    /// `SetAutoFocus`
    SetAutoFocus,
    /// `GetZoomFocus` — current zoom and focus motor positions.
    GetZoomFocus,
    /// `StartZoomFocus` — drive zoom or focus to an absolute position.
    StartZoomFocus,
    /// `GetPtzSerial` — RS-485 PTZ serial settings.
    GetPtzSerial,
    /// `SetPtzSerial`
    SetPtzSerial,
}

impl Command {
    /// Wire name of the command.
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::GetAbility => "GetAbility",
            Command::GetPtzPreset => "GetPtzPreset",
            Command::SetPtzPreset => "SetPtzPreset",
            Command::PtzCtrl => "PtzCtrl",
            Command::GetMdAlarm => "GetMdAlarm",
            Command::SetMdAlarm => "SetMdAlarm",
            Command::GetAiAlarm => "GetAiAlarm",
            Command::SetAiAlarm => "SetAiAlarm",
            Command::GetAiCfg => "GetAiCfg",
            Command::GetMask => "GetMask",
            Command::SetMask => "SetMask",
            Command::GetPtzGuard => "GetPtzGuard",
            Command::SetPtzGuard => "SetPtzGuard",
            Command::PtzCheck => "PtzCheck",
            Command::GetPtzCheckState => "GetPtzCheckState",
            Command::GetPtzPatrol => "GetPtzPatrol",
            Command::SetPtzPatrol => "SetPtzPatrol",
            Command::GetPtzTattern => "GetPtzTattern",
            Command::SetPtzTattern => "SetPtzTattern",
            Command::GetAutoFocus => "GetAutoFocus",
            Command::SetAutoFocus => "SetAutoFocus",
            Command::GetZoomFocus => "GetZoomFocus",
            Command::StartZoomFocus => "StartZoomFocus",
            Command::GetPtzSerial => "GetPtzSerial",
            Command::SetPtzSerial => "SetPtzSerial",
        }
    }

    /// The action value this crate sends with the command.
    ///
    /// Configuration reads that feed a read-modify-write ask for the
    /// detailed form so the device includes every sibling field.
    pub fn default_action(&self) -> Action {
        match self {
            Command::GetMdAlarm | Command::GetAiAlarm => Action::Detailed,
            _ => Action::Value,
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `action` field of a request envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// `0` — current value only.
    Value,
    /// `1` — current value plus `initial` and `range` blocks.
    Detailed,
}

impl Action {
    pub fn as_u8(&self) -> u8 {
        match self {
            Action::Value => 0,
            Action::Detailed => 1,
        }
    }
}

/// One logical field and the wire names it travels under.
///
/// `read` is consulted in order when decoding (first present, non-null
/// name wins); every name in `write` is emitted when encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAlias {
    pub read: &'static [&'static str],
    pub write: &'static [&'static str],
}

impl FieldAlias {
    pub const fn new(read: &'static [&'static str], write: &'static [&'static str]) -> Self {
        Self { read, write }
    }

    /// Look the field up on a JSON object.
    pub fn get<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        let obj = value.as_object()?;
        self.read
            .iter()
            .filter_map(|name| obj.get(*name))
            .find(|v| !v.is_null())
    }

    /// Write the field under every outgoing name.
    pub fn put(&self, map: &mut Map<String, Value>, value: Value) {
        for name in self.write {
            map.insert((*name).to_string(), value.clone());
        }
    }

    /// Whether any of the read names is present with a non-null value.
    pub fn is_present(&self, value: &Value) -> bool {
        self.get(value).is_some()
    }
}

/// Lenient integer coercion: numbers (integral part) and numeric strings.
pub fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// Lenient non-negative integer coercion.
pub fn coerce_u32(value: &Value) -> Option<u32> {
    coerce_i64(value).and_then(|n| u32::try_from(n).ok())
}

/// Device flag semantics: only `1` and `true` count as set.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64() == Some(1) || n.as_f64() == Some(1.0),
        _ => false,
    }
}

/// Encode a boolean the way the firmware expects it (`0`/`1`).
pub fn flag(enabled: bool) -> Value {
    Value::from(u8::from(enabled))
}

/// Serde helpers for the loosely-typed numeric and boolean fields used by
/// the secondary PTZ controls.
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(super::coerce_u32(&value).unwrap_or_default())
    }

    pub fn i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(super::coerce_i64(&value).unwrap_or_default())
    }

    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(super::is_truthy(&value))
    }

    /// Write a boolean as `0`/`1`.
    pub fn flag_out<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_wire_names() {
        assert_eq!(Command::GetPtzPreset.as_str(), "GetPtzPreset");
        assert_eq!(Command::PtzCtrl.to_string(), "PtzCtrl");
        assert_eq!(Command::GetPtzTattern.as_str(), "GetPtzTattern");
        assert_eq!(Command::GetMdAlarm.default_action(), Action::Detailed);
        assert_eq!(Command::SetMdAlarm.default_action().as_u8(), 0);
    }

    #[test]
    fn test_alias_read_precedence() {
        let alias = FieldAlias::new(&["cols", "width"], &["width", "cols"]);
        assert_eq!(alias.get(&json!({"width": 4, "cols": 8})), Some(&json!(8)));
        assert_eq!(alias.get(&json!({"width": 4})), Some(&json!(4)));
        assert_eq!(alias.get(&json!({"cols": null, "width": 4})), Some(&json!(4)));
        assert_eq!(alias.get(&json!({})), None);
        assert_eq!(alias.get(&json!([1, 2])), None);
    }

    #[test]
    fn test_alias_write_all_names() {
        let alias = FieldAlias::new(&["cols", "width"], &["width", "cols"]);
        let mut map = Map::new();
        alias.put(&mut map, json!(4));
        assert_eq!(Value::Object(map), json!({"width": 4, "cols": 4}));
    }

    #[test]
    fn test_coerce_i64() {
        assert_eq!(coerce_i64(&json!(7)), Some(7));
        assert_eq!(coerce_i64(&json!("12")), Some(12));
        assert_eq!(coerce_i64(&json!(" 3 ")), Some(3));
        assert_eq!(coerce_i64(&json!(2.9)), Some(2));
        assert_eq!(coerce_i64(&json!("abc")), None);
        assert_eq!(coerce_i64(&json!(null)), None);
        assert_eq!(coerce_u32(&json!(-1)), None);
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!(true)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(2)));
        assert!(!is_truthy(&json!("1")));
        assert!(!is_truthy(&json!(null)));
    }
}

// MIT License - Copyright (c) 2026 Peter Wright
// AI detection types

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PtzError;
use crate::protocol::is_truthy;

/// Object classes the camera's AI detector can be configured for.
///
/// Declaration order is the canonical order used whenever AI zones are
/// written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiType {
    People,
    Vehicle,
    DogCat,
    Face,
}

impl AiType {
    /// All types in canonical order.
    pub const ALL: [AiType; 4] = [AiType::People, AiType::Vehicle, AiType::DogCat, AiType::Face];

    /// Wire name (`ai_type` field value).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::People => "people",
            Self::Vehicle => "vehicle",
            Self::DogCat => "dog_cat",
            Self::Face => "face",
        }
    }

    /// Capability keys that advertise support for this type, e.g.
    /// `people`, `supportPeople`, `supportPEOPLE`.
    pub fn support_keys(&self) -> [String; 3] {
        let name = self.as_str();
        let mut capitalized = name.to_string();
        if let Some(first) = capitalized.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        [
            name.to_string(),
            format!("support{}", capitalized),
            format!("support{}", name.to_ascii_uppercase()),
        ]
    }

    fn flag(&self) -> AiTypeFlags {
        match self {
            Self::People => AiTypeFlags::PEOPLE,
            Self::Vehicle => AiTypeFlags::VEHICLE,
            Self::DogCat => AiTypeFlags::DOG_CAT,
            Self::Face => AiTypeFlags::FACE,
        }
    }
}

impl fmt::Display for AiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AiType {
    type Err = PtzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "people" => Ok(Self::People),
            "vehicle" => Ok(Self::Vehicle),
            "dog_cat" => Ok(Self::DogCat),
            "face" => Ok(Self::Face),
            other => Err(PtzError::validation(format!(
                "unsupported AI type '{}' (expected people, vehicle, dog_cat or face)",
                other
            ))),
        }
    }
}

bitflags! {
    /// Set of supported AI types as advertised by a capability record.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AiTypeFlags: u8 {
        const PEOPLE  = 0b0001;
        const VEHICLE = 0b0010;
        const DOG_CAT = 0b0100;
        const FACE    = 0b1000;
    }
}

impl AiTypeFlags {
    /// Read support flags from a flag object.
    ///
    /// A type counts as supported when its name or one of its `support*`
    /// keys holds `1` or `true`.
    pub fn from_flag_object(flags: &Value) -> Self {
        let Some(obj) = flags.as_object() else {
            return Self::empty();
        };
        let mut set = Self::empty();
        for ai_type in AiType::ALL {
            let supported = ai_type
                .support_keys()
                .iter()
                .any(|key| obj.get(key).is_some_and(is_truthy));
            if supported {
                set |= ai_type.flag();
            }
        }
        set
    }

    /// Expand into a list in canonical order.
    pub fn to_types(self) -> Vec<AiType> {
        AiType::ALL
            .into_iter()
            .filter(|t| self.contains(t.flag()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_ai_type() {
        assert_eq!("people".parse::<AiType>().unwrap(), AiType::People);
        assert_eq!("dog_cat".parse::<AiType>().unwrap(), AiType::DogCat);
        assert!("thermal".parse::<AiType>().unwrap_err().is_validation());
        assert!("People".parse::<AiType>().is_err());
    }

    #[test]
    fn test_support_keys() {
        assert_eq!(
            AiType::DogCat.support_keys(),
            ["dog_cat".to_string(), "supportDog_cat".to_string(), "supportDOG_CAT".to_string()]
        );
        assert_eq!(AiType::People.support_keys()[1], "supportPeople");
    }

    #[test]
    fn test_flags_from_object() {
        let flags = AiTypeFlags::from_flag_object(&json!({
            "people": 1,
            "supportVehicle": true,
            "supportFACE": 1,
            "dog_cat": 0
        }));
        assert_eq!(flags.to_types(), vec![AiType::People, AiType::Vehicle, AiType::Face]);
        assert!(AiTypeFlags::from_flag_object(&json!(null)).is_empty());
        assert!(AiTypeFlags::from_flag_object(&json!({"people": "1"})).is_empty());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_value(AiType::DogCat).unwrap(), json!("dog_cat"));
    }
}

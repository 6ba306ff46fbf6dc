// MIT License - Copyright (c) 2026 Peter Wright
// Privacy mask areas

use serde::{Deserialize, Serialize};

use crate::protocol::lenient;

/// Reference frame the mask block coordinates are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaskScreen {
    #[serde(deserialize_with = "lenient::u32")]
    pub width: u32,
    #[serde(deserialize_with = "lenient::u32")]
    pub height: u32,
}

/// Masked rectangle within the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaskBlock {
    #[serde(deserialize_with = "lenient::u32")]
    pub x: u32,
    #[serde(deserialize_with = "lenient::u32")]
    pub y: u32,
    #[serde(deserialize_with = "lenient::u32")]
    pub width: u32,
    #[serde(deserialize_with = "lenient::u32")]
    pub height: u32,
}

/// One privacy mask, in the shape the device sends and expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaskArea {
    #[serde(alias = "Screen")]
    pub screen: MaskScreen,
    #[serde(alias = "Block")]
    pub block: MaskBlock,
}

impl MaskArea {
    pub fn new(screen: (u32, u32), block: (u32, u32, u32, u32)) -> Self {
        Self {
            screen: MaskScreen {
                width: screen.0,
                height: screen.1,
            },
            block: MaskBlock {
                x: block.0,
                y: block.1,
                width: block.2,
                height: block.3,
            },
        }
    }
}

/// Mask configuration as read back from the device.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MaskConfig {
    #[serde(default, alias = "Enable", deserialize_with = "lenient::flag")]
    pub enable: bool,
    #[serde(default, alias = "Area", alias = "areas")]
    pub area: Vec<MaskArea>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mask_config_lenient_decode() {
        let config: MaskConfig = serde_json::from_value(json!({
            "channel": 0,
            "enable": 1,
            "area": [
                {"screen": {"width": 640, "height": "360"}, "block": {"x": 10, "y": 20, "width": 100, "height": 50}}
            ]
        }))
        .unwrap();
        assert!(config.enable);
        assert_eq!(config.area, vec![MaskArea::new((640, 360), (10, 20, 100, 50))]);
    }

    #[test]
    fn test_mask_config_defaults() {
        let config: MaskConfig = serde_json::from_value(json!({"channel": 0})).unwrap();
        assert!(!config.enable);
        assert!(config.area.is_empty());
    }

    #[test]
    fn test_mask_area_serializes_wire_shape() {
        let area = MaskArea::new((640, 360), (0, 0, 64, 36));
        assert_eq!(
            serde_json::to_value(area).unwrap(),
            json!({"screen": {"width": 640, "height": 360}, "block": {"x": 0, "y": 0, "width": 64, "height": 36}})
        );
    }
}

// MIT License - Copyright (c) 2026 Peter Wright
// Detection and privacy zones

pub mod ai;
pub mod grid;
pub mod mask;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use ai::{AiType, AiTypeFlags};
pub use grid::GridArea;
pub use mask::{MaskArea, MaskConfig};

/// Zone configuration to apply after arriving at a preset.
///
/// Each part is optional; an absent part is left untouched on the device.
/// `ai` is keyed by [`AiType`], so iteration follows the canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PresetZones {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md: Option<GridArea>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub ai: BTreeMap<AiType, GridArea>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masks: Option<Vec<MaskArea>>,
}

impl PresetZones {
    pub fn is_empty(&self) -> bool {
        self.md.is_none() && self.ai.is_empty() && self.masks.is_none()
    }
}

/// What a zone application wrote to the device.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ZonesApplied {
    /// Number of mask areas written, if masks were part of the bundle.
    pub masks: Option<usize>,
    /// Whether the motion zone was written.
    pub motion: bool,
    /// AI zones written, in write order.
    pub ai: Vec<AiType>,
}

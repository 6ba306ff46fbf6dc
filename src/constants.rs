// MIT License - Copyright (c) 2026 Peter Wright
// Protocol constants and field-alias tables

use crate::protocol::FieldAlias;

/// Lowest preset slot the firmware accepts.
pub const PRESET_ID_MIN: u32 = 1;
/// Highest preset slot the firmware accepts.
pub const PRESET_ID_MAX: u32 = 64;

/// PTZ speed range accepted by `PtzCtrl`. Requested speeds are clamped.
pub const PTZ_SPEED_MIN: u32 = 1;
pub const PTZ_SPEED_MAX: u32 = 64;

/// Settle delay after a preset move when the caller does not supply one.
pub const DEFAULT_SETTLE_MS: u64 = 400;

/// Largest detection grid accepted, in cells. Real firmware grids are a few
/// thousand cells at most.
pub const MAX_GRID_CELLS: u64 = 1 << 16;

/// The only guard (auto-return) timeout the firmware currently honours.
pub const GUARD_TIMEOUT_SEC: u32 = 60;

/// `PtzCtrl` operation for moving to a stored preset.
pub const OP_TO_PRESET: &str = "ToPos";

/// `SetPtzGuard` command string for storing the guard position.
pub const GUARD_CMD_SET_POS: &str = "setPos";

// --- Grid scope aliases ---

pub const GRID_WIDTH: FieldAlias = FieldAlias::new(&["cols", "width"], &["width", "cols"]);
pub const GRID_HEIGHT: FieldAlias = FieldAlias::new(&["rows", "height"], &["height", "rows"]);
pub const GRID_BITS: FieldAlias = FieldAlias::new(&["table", "area", "bits"], &["table"]);

// --- Preset record aliases ---

pub const PRESET_ID: FieldAlias = FieldAlias::new(&["id", "ID"], &["id"]);
pub const PRESET_NAME: FieldAlias = FieldAlias::new(&["name", "Name"], &["name"]);
pub const PRESET_ENABLE: FieldAlias = FieldAlias::new(&["enable", "Enable"], &["enable"]);
pub const CHANNEL: FieldAlias = FieldAlias::new(&["channel", "Channel"], &["channel"]);

// --- Configuration envelopes ---

pub const MD_ALARM: FieldAlias = FieldAlias::new(&["MdAlarm", "mdAlarm"], &["MdAlarm"]);
pub const AI_ALARM: FieldAlias = FieldAlias::new(&["AiAlarm", "aiAlarm"], &["AiAlarm"]);
pub const SCOPE: FieldAlias = FieldAlias::new(&["scope", "Scope"], &["scope"]);
pub const MASK: FieldAlias = FieldAlias::new(&["Mask", "mask"], &["Mask"]);
pub const PTZ_GUARD: FieldAlias = FieldAlias::new(&["PtzGuard", "ptzGuard"], &["PtzGuard"]);
pub const PTZ_CHECK_STATE: FieldAlias =
    FieldAlias::new(&["PtzCheckState", "ptzCheckState", "state"], &["PtzCheckState"]);
pub const PTZ_PATROL: FieldAlias = FieldAlias::new(&["PtzPatrol", "ptzPatrol"], &["PtzPatrol"]);
pub const PTZ_PATTERN: FieldAlias =
    FieldAlias::new(&["PtzTattern", "PtzPattern", "ptzTattern"], &["PtzTattern"]);
pub const AUTO_FOCUS: FieldAlias = FieldAlias::new(&["AutoFocus", "autoFocus"], &["AutoFocus"]);
pub const ZOOM_FOCUS: FieldAlias = FieldAlias::new(&["ZoomFocus", "zoomFocus"], &["ZoomFocus"]);
pub const PTZ_SERIAL: FieldAlias = FieldAlias::new(&["PtzSerial", "ptzSerial"], &["PtzSerial"]);

// --- Ability descriptor ---

pub const ABILITY_ROOT: FieldAlias = FieldAlias::new(&["Ability", "ability"], &["Ability"]);

/// Fields that may hold per-channel ability records, in lookup order.
pub const ABILITY_CHANNEL_FIELDS: [&str; 4] =
    ["abilityChn", "AbilityChn", "abilityChannel", "channels"];

/// Fields that may hold the AI support flags inside an ability record.
pub const AI_FLAG_FIELDS: [&str; 6] = ["aiType", "AiType", "supportAi", "ai", "AI", "aiDetectType"];

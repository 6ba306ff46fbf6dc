// MIT License - Copyright (c) 2026 Peter Wright
// Secondary PTZ controls
//
// Each submodule adds a group of single-request operations to
// `PtzController`. None of them cache or sequence anything.

pub mod check;
pub mod focus;
pub mod guard;
pub mod patrol;
pub mod pattern;
pub mod serial;

pub use check::PtzCheckState;
pub use focus::{ZoomFocus, ZoomFocusOp};
pub use guard::{GuardConfig, GuardOptions};
pub use patrol::{PatrolRoute, PatrolStop};
pub use pattern::PatternTrack;
pub use serial::PtzSerial;

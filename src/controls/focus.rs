// MIT License - Copyright (c) 2026 Peter Wright
// Auto focus and absolute zoom/focus positioning

use serde::Deserialize;
use serde_json::json;

use crate::constants::{AUTO_FOCUS, ZOOM_FOCUS};
use crate::controller::{PtzController, decode_section};
use crate::error::Result;
use crate::protocol::{Command, flag, lenient};
use crate::transport::Transport;

/// Current zoom and focus motor positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZoomFocus {
    pub zoom: u32,
    pub focus: u32,
}

/// Which motor `start_zoom_focus` drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoomFocusOp {
    Zoom,
    Focus,
}

impl ZoomFocusOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoomFocusOp::Zoom => "ZoomPos",
            ZoomFocusOp::Focus => "FocusPos",
        }
    }
}

#[derive(Deserialize)]
struct AutoFocusSection {
    #[serde(default, alias = "Disable", deserialize_with = "lenient::flag")]
    disable: bool,
}

#[derive(Deserialize, Default)]
struct Position {
    #[serde(default, deserialize_with = "lenient::u32")]
    pos: u32,
}

#[derive(Deserialize)]
struct ZoomFocusSection {
    #[serde(default, alias = "Zoom")]
    zoom: Position,
    #[serde(default, alias = "Focus")]
    focus: Position,
}

impl<T: Transport> PtzController<T> {
    /// Whether autofocus is on. The wire field is the inverse (`disable`).
    pub async fn get_auto_focus(&self, channel: u32) -> Result<bool> {
        let reply = self
            .send(Command::GetAutoFocus, json!({ "channel": channel }))
            .await?;
        let section: AutoFocusSection =
            decode_section(&reply, &AUTO_FOCUS, Command::GetAutoFocus)?;
        Ok(!section.disable)
    }

    pub async fn set_auto_focus(&self, channel: u32, enabled: bool) -> Result<()> {
        let payload = json!({
            "AutoFocus": { "channel": channel, "disable": flag(!enabled) }
        });
        self.send(Command::SetAutoFocus, payload).await?;
        Ok(())
    }

    pub async fn get_zoom_focus(&self, channel: u32) -> Result<ZoomFocus> {
        let reply = self
            .send(Command::GetZoomFocus, json!({ "channel": channel }))
            .await?;
        let section: ZoomFocusSection =
            decode_section(&reply, &ZOOM_FOCUS, Command::GetZoomFocus)?;
        Ok(ZoomFocus {
            zoom: section.zoom.pos,
            focus: section.focus.pos,
        })
    }

    /// Drive the zoom or focus motor to an absolute position.
    pub async fn start_zoom_focus(&self, channel: u32, op: ZoomFocusOp, pos: u32) -> Result<()> {
        let payload = json!({
            "ZoomFocus": { "channel": channel, "op": op.as_str(), "pos": pos }
        });
        self.send(Command::StartZoomFocus, payload).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_focus_section() {
        let section: ZoomFocusSection = serde_json::from_value(json!({
            "channel": 0, "zoom": {"pos": 12}, "focus": {"pos": "240"}
        }))
        .unwrap();
        assert_eq!(section.zoom.pos, 12);
        assert_eq!(section.focus.pos, 240);
    }

    #[test]
    fn test_zoom_focus_missing_motor() {
        let section: ZoomFocusSection = serde_json::from_value(json!({"zoom": {"pos": 3}})).unwrap();
        assert_eq!(section.focus.pos, 0);
    }

    #[test]
    fn test_op_wire_names() {
        assert_eq!(ZoomFocusOp::Zoom.as_str(), "ZoomPos");
        assert_eq!(ZoomFocusOp::Focus.as_str(), "FocusPos");
    }
}

// MIT License - Copyright (c) 2026 Peter Wright
// Guard (auto-return) position

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::constants::{GUARD_CMD_SET_POS, GUARD_TIMEOUT_SEC, PTZ_GUARD};
use crate::controller::{PtzController, decode_section};
use crate::error::{PtzError, Result};
use crate::protocol::{Command, flag, lenient};
use crate::transport::Transport;

/// Guard settings as reported by the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GuardConfig {
    #[serde(default, alias = "Channel", deserialize_with = "lenient::u32")]
    pub channel: u32,
    /// Return to the guard position after `timeout` seconds idle.
    #[serde(default, rename = "benable", deserialize_with = "lenient::flag")]
    pub enabled: bool,
    /// A guard position has been stored.
    #[serde(default, rename = "bexistPos", deserialize_with = "lenient::flag")]
    pub position_exists: bool,
    #[serde(default, deserialize_with = "lenient::u32")]
    pub timeout: u32,
}

/// Options for [`PtzController::set_guard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardOptions {
    pub enable: bool,
    /// Store the current head position as the guard position.
    pub save_current_position: bool,
    /// Idle time before returning. The firmware only honours 60.
    pub timeout_sec: u32,
}

impl Default for GuardOptions {
    fn default() -> Self {
        Self {
            enable: true,
            save_current_position: false,
            timeout_sec: GUARD_TIMEOUT_SEC,
        }
    }
}

impl<T: Transport> PtzController<T> {
    pub async fn get_guard(&self, channel: u32) -> Result<GuardConfig> {
        let reply = self
            .send(Command::GetPtzGuard, json!({ "channel": channel }))
            .await?;
        decode_section(&reply, &PTZ_GUARD, Command::GetPtzGuard)
    }

    /// Write guard settings. Rejects any timeout other than 60 seconds
    /// without contacting the camera.
    pub async fn set_guard(&self, channel: u32, opts: GuardOptions) -> Result<()> {
        if opts.timeout_sec != GUARD_TIMEOUT_SEC {
            return Err(PtzError::validation(format!(
                "guard timeout {}s not supported (only {}s)",
                opts.timeout_sec, GUARD_TIMEOUT_SEC
            )));
        }
        let payload = json!({
            "PtzGuard": {
                "channel": channel,
                "cmdStr": GUARD_CMD_SET_POS,
                "benable": flag(opts.enable),
                "bSaveCurrentPos": flag(opts.save_current_position),
                "timeout": opts.timeout_sec,
            }
        });
        self.send(Command::SetPtzGuard, payload).await?;
        debug!("Guard on channel {} set: {:?}", channel, opts);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_guard_config_decode() {
        let config: GuardConfig = serde_json::from_value(json!({
            "benable": 1, "bexistPos": 0, "channel": 0, "timeout": "60"
        }))
        .unwrap();
        assert!(config.enabled);
        assert!(!config.position_exists);
        assert_eq!(config.timeout, 60);
    }

    #[test]
    fn test_guard_options_default() {
        let opts = GuardOptions::default();
        assert!(opts.enable);
        assert_eq!(opts.timeout_sec, 60);
    }
}

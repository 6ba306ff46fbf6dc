// MIT License - Copyright (c) 2026 Peter Wright
// PTZ self-calibration

use serde_json::{Value, json};

use crate::constants::PTZ_CHECK_STATE;
use crate::controller::PtzController;
use crate::error::{PtzError, Result};
use crate::protocol::{Command, coerce_i64};
use crate::transport::Transport;

/// Progress of a PTZ self-calibration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PtzCheckState {
    Idle,
    Checking,
    Finished,
    /// A state code this crate does not know.
    Unknown(i64),
}

impl PtzCheckState {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Idle,
            1 => Self::Checking,
            2 => Self::Finished,
            other => Self::Unknown(other),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Checking)
    }
}

impl<T: Transport> PtzController<T> {
    /// Start self-calibration. The head sweeps its full range.
    pub async fn ptz_check(&self, channel: u32) -> Result<()> {
        self.send(Command::PtzCheck, json!({ "channel": channel }))
            .await?;
        Ok(())
    }

    pub async fn get_ptz_check_state(&self, channel: u32) -> Result<PtzCheckState> {
        let reply = self
            .send(Command::GetPtzCheckState, json!({ "channel": channel }))
            .await?;
        check_state_from_reply(&reply)
    }
}

// The state arrives bare or wrapped in an object, depending on firmware.
fn check_state_from_reply(reply: &Value) -> Result<PtzCheckState> {
    let mut value = reply;
    while let Some(inner) = PTZ_CHECK_STATE.get(value) {
        value = inner;
    }
    coerce_i64(value)
        .map(PtzCheckState::from_code)
        .ok_or_else(|| {
            PtzError::invalid_response(format!("GetPtzCheckState reply has no state: {}", reply))
        })
}

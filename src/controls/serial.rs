// MIT License - Copyright (c) 2026 Peter Wright
// RS-485 PTZ serial settings

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::constants::PTZ_SERIAL;
use crate::controller::{PtzController, decode_section};
use crate::error::{PtzError, Result};
use crate::protocol::{Command, lenient};
use crate::transport::Transport;

/// Serial link used to drive an external PTZ head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PtzSerial {
    #[serde(default, alias = "Channel", deserialize_with = "lenient::u32")]
    pub channel: u32,
    #[serde(alias = "BaudRate", deserialize_with = "lenient::u32")]
    pub baud_rate: u32,
    /// Address of the head on the bus.
    #[serde(alias = "CtrlAddr", deserialize_with = "lenient::u32")]
    pub ctrl_addr: u32,
    /// e.g. `PELCO_D`, `PELCO_P`.
    #[serde(alias = "CtrlProtocol", deserialize_with = "lenient::string")]
    pub ctrl_protocol: String,
    /// e.g. `CS8`.
    #[serde(default, alias = "DataBit", deserialize_with = "lenient::string")]
    pub data_bit: String,
    #[serde(default, alias = "FlowCtrl", deserialize_with = "lenient::string")]
    pub flow_ctrl: String,
    #[serde(default, alias = "Parity", deserialize_with = "lenient::string")]
    pub parity: String,
    #[serde(default, alias = "StopBit", deserialize_with = "lenient::u32")]
    pub stop_bit: u32,
}

impl<T: Transport> PtzController<T> {
    pub async fn get_ptz_serial(&self, channel: u32) -> Result<PtzSerial> {
        let reply = self
            .send(Command::GetPtzSerial, json!({ "channel": channel }))
            .await?;
        decode_section(&reply, &PTZ_SERIAL, Command::GetPtzSerial)
    }

    pub async fn set_ptz_serial(&self, channel: u32, serial: &PtzSerial) -> Result<()> {
        let mut body = serde_json::to_value(serial)
            .map_err(|e| PtzError::validation(format!("ptz serial: {}", e)))?;
        body["channel"] = Value::from(channel);
        self.send(Command::SetPtzSerial, json!({ "PtzSerial": body }))
            .await?;
        Ok(())
    }
}

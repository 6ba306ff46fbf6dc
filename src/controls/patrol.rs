// MIT License - Copyright (c) 2026 Peter Wright
// Patrol routes

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::constants::PTZ_PATROL;
use crate::controller::{PtzController, decode_section};
use crate::error::{PtzError, Result};
use crate::protocol::{Command, lenient};
use crate::transport::Transport;

/// One stop on a patrol route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatrolStop {
    /// Preset to visit.
    #[serde(alias = "ID", deserialize_with = "lenient::u32")]
    pub id: u32,
    /// Seconds to hold at the preset.
    #[serde(
        rename = "dwellTime",
        alias = "dwell_time",
        default,
        deserialize_with = "lenient::u32"
    )]
    pub dwell_time: u32,
    #[serde(default, deserialize_with = "lenient::u32")]
    pub speed: u32,
}

/// A patrol route cycling through presets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatrolRoute {
    #[serde(default, alias = "Channel", deserialize_with = "lenient::u32")]
    pub channel: u32,
    #[serde(alias = "ID", deserialize_with = "lenient::u32")]
    pub id: u32,
    #[serde(
        default,
        alias = "Enable",
        deserialize_with = "lenient::flag",
        serialize_with = "lenient::flag_out"
    )]
    pub enable: bool,
    #[serde(
        default,
        deserialize_with = "lenient::flag",
        serialize_with = "lenient::flag_out"
    )]
    pub running: bool,
    #[serde(default, alias = "Name", deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, alias = "Preset", alias = "presets")]
    pub preset: Vec<PatrolStop>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Routes {
    Many(Vec<PatrolRoute>),
    One(PatrolRoute),
}

impl<T: Transport> PtzController<T> {
    /// All patrol routes on the channel.
    pub async fn get_patrol(&self, channel: u32) -> Result<Vec<PatrolRoute>> {
        let reply = self
            .send(Command::GetPtzPatrol, json!({ "channel": channel }))
            .await?;
        let routes: Routes = decode_section(&reply, &PTZ_PATROL, Command::GetPtzPatrol)?;
        Ok(match routes {
            Routes::Many(routes) => routes,
            Routes::One(route) => vec![route],
        })
    }

    /// Write one patrol route. The route's channel is replaced by `channel`.
    pub async fn set_patrol(&self, channel: u32, route: &PatrolRoute) -> Result<()> {
        let mut body = serde_json::to_value(route)
            .map_err(|e| PtzError::validation(format!("patrol route: {}", e)))?;
        body["channel"] = Value::from(channel);
        self.send(Command::SetPtzPatrol, json!({ "PtzPatrol": body }))
            .await?;
        Ok(())
    }
}

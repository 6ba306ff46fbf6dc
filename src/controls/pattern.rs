// MIT License - Copyright (c) 2026 Peter Wright
// Recorded pattern tracks

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::constants::PTZ_PATTERN;
use crate::controller::{PtzController, decode_section};
use crate::error::Result;
use crate::protocol::{Command, lenient};
use crate::transport::Transport;

/// A recorded movement pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternTrack {
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
}

#[derive(Deserialize)]
struct PatternSection {
    #[serde(default, alias = "Track", alias = "tracks")]
    track: Vec<PatternTrack>,
}

impl<T: Transport> PtzController<T> {
    pub async fn get_pattern(&self, channel: u32) -> Result<Vec<PatternTrack>> {
        let reply = self
            .send(Command::GetPtzTattern, json!({ "channel": channel }))
            .await?;
        let section: PatternSection =
            decode_section(&reply, &PTZ_PATTERN, Command::GetPtzTattern)?;
        Ok(section.track)
    }

    /// Replace the pattern tracks on the channel.
    pub async fn set_pattern(&self, channel: u32, tracks: &[PatternTrack]) -> Result<()> {
        let payload = json!({
            "PtzTattern": {
                "channel": channel,
                "track": tracks,
            }
        });
        self.send(Command::SetPtzTattern, payload).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_section_decode() {
        let section: PatternSection = serde_json::from_value(json!({
            "channel": 0,
            "track": [{"id": 1, "enable": 1, "name": "Sweep", "running": 0}]
        }))
        .unwrap();
        assert_eq!(
            section.track,
            vec![PatternTrack {
                id: 1,
                enable: true,
                running: false,
                name: "Sweep".to_string()
            }]
        );
    }
}

// MIT License - Copyright (c) 2026 Peter Wright
// Client configuration

use std::time::Duration;

use serde::Deserialize;

use crate::constants::DEFAULT_SETTLE_MS;
use crate::error::Result;

/// Configuration for a [`PtzController`](crate::PtzController).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Settle delay after a preset move, in milliseconds (default: 400).
    /// Individual calls may override it; `0` disables the wait.
    pub settle_ms: u64,
    /// User name sent with the ability query (default: "admin").
    pub ability_user: String,
    /// Capacity of the event broadcast channel (default: 64).
    pub event_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            settle_ms: DEFAULT_SETTLE_MS,
            ability_user: "admin".to_string(),
            event_capacity: 64,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder starting from defaults.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Parse a TOML document. Missing keys take their defaults.
    ///
    /// ```
    /// use ptz_lan_control::ClientConfig;
    ///
    /// let config = ClientConfig::from_toml_str("settle_ms = 750").unwrap();
    /// assert_eq!(config.settle_ms, 750);
    /// assert_eq!(config.ability_user, "admin");
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

/// Builder for ClientConfig.
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn settle_ms(mut self, ms: u64) -> Self {
        self.config.settle_ms = ms;
        self
    }

    pub fn ability_user(mut self, user: impl Into<String>) -> Self {
        self.config.ability_user = user.into();
        self
    }

    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.config.event_capacity = capacity;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

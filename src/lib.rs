// MIT License - Copyright (c) 2026 Peter Wright
// PTZ preset and zone control over a camera's JSON command API
//
//! # ptz-lan-control
//!
//! Preset and detection-zone orchestration for networked PTZ cameras.
//!
//! The crate lists and stores presets, moves the camera to them, and writes
//! the privacy mask, motion and AI detection zones that belong to each
//! preset. Device replies come back in many shapes depending on firmware;
//! they are normalized here into one canonical model.
//!
//! Authentication and HTTP are not handled here. Plug an implementation of
//! [`Transport`] into a [`PtzController`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use ptz_lan_control::{
//!     Action, ClientConfig, Command, GotoOptions, GridArea, PresetZones, PtzController,
//!     Transport,
//! };
//! use serde_json::Value;
//!
//! struct MyHttpTransport;
//!
//! impl Transport for MyHttpTransport {
//!     async fn request(
//!         &self,
//!         command: Command,
//!         payload: Value,
//!         action: Action,
//!     ) -> ptz_lan_control::Result<Value> {
//!         // POST [{"cmd": command.as_str(), "action": action.as_u8(), "param": payload}]
//!         todo!()
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::builder().settle_ms(600).build();
//!     let camera = PtzController::with_config(MyHttpTransport, config);
//!
//!     let mut events = camera.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     camera.set_preset(0, 1, "Driveway", Some(true)).await?;
//!     let zones = PresetZones {
//!         md: Some(GridArea::new(4, 2, "01101001")?),
//!         ..Default::default()
//!     };
//!     camera
//!         .goto_preset_with_zones(0, 1, move |_| async move { Some(zones) }, GotoOptions::default())
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod capability;
pub mod config;
pub mod constants;
pub mod controller;
pub mod controls;
pub mod error;
pub mod event;
pub mod panorama;
pub mod preset;
pub mod protocol;
pub mod transport;
pub mod zones;

// Re-exports for convenience
pub use capability::CapabilityCache;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use controller::{GotoOptions, PtzController};
pub use controls::{
    GuardConfig, GuardOptions, PatrolRoute, PatrolStop, PatternTrack, PtzCheckState, PtzSerial,
    ZoomFocus, ZoomFocusOp,
};
pub use error::{DeviceErrorCode, PtzError, Result};
pub use event::{EventReceiver, PipelineStage, PtzEvent};
pub use panorama::{PanoramaCapture, PanoramaPlan, build_panorama};
pub use preset::{PresetEnvelope, PtzPreset, normalize_presets};
pub use protocol::{Action, Command};
pub use transport::{Snapshot, Transport};
pub use zones::{AiType, GridArea, MaskArea, MaskConfig, PresetZones, ZonesApplied};

// MIT License - Copyright (c) 2026 Peter Wright
// Preset and zone orchestration

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::capability::CapabilityCache;
use crate::config::ClientConfig;
use crate::constants::{
    AI_ALARM, GRID_BITS, GRID_HEIGHT, GRID_WIDTH, MASK, MD_ALARM, OP_TO_PRESET, PRESET_ID_MAX,
    PRESET_ID_MIN, PTZ_SPEED_MAX, PTZ_SPEED_MIN, SCOPE,
};
use crate::error::{PtzError, Result};
use crate::event::{EventReceiver, EventSender, PipelineStage, PtzEvent, event_channel};
use crate::preset::{PtzPreset, normalize_presets};
use crate::protocol::{Command, FieldAlias, flag};
use crate::transport::Transport;
use crate::zones::{AiType, GridArea, MaskArea, MaskConfig, PresetZones, ZonesApplied, grid};

/// Options for a move to a preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GotoOptions {
    /// Move speed; clamped to 1..=64. `None` leaves the device default.
    pub speed: Option<u32>,
    /// Settle delay after the move is acknowledged. `None` uses the
    /// configured default, `Some(Duration::ZERO)` skips the wait.
    pub settle: Option<Duration>,
}

impl GotoOptions {
    pub fn speed(mut self, speed: u32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn settle_ms(mut self, ms: u64) -> Self {
        self.settle = Some(Duration::from_millis(ms));
        self
    }

    /// Return as soon as the move command is acknowledged.
    pub fn no_settle(self) -> Self {
        self.settle_ms(0)
    }
}

/// The main public API for preset and zone control of one camera.
///
/// # Example
///
/// ```no_run
/// use ptz_lan_control::{GotoOptions, GridArea, PresetZones, PtzController, Transport};
///
/// async fn patrol_stop<T: Transport>(camera: &PtzController<T>) -> ptz_lan_control::Result<()> {
///     for preset in camera.list_presets(0).await? {
///         println!("{}: {}", preset.id, preset.name);
///     }
///
///     let zones = PresetZones {
///         md: Some(GridArea::filled(4, 2)?),
///         ..Default::default()
///     };
///     let applied = camera
///         .goto_preset_with_zones(0, 3, move |_| async move { Some(zones) }, GotoOptions::default())
///         .await?;
///     println!("applied: {:?}", applied);
///     Ok(())
/// }
/// ```
pub struct PtzController<T> {
    transport: T,
    config: ClientConfig,
    capabilities: CapabilityCache,
    event_tx: EventSender,
}

impl<T: Transport> PtzController<T> {
    /// Create a controller with the default configuration.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    pub fn with_config(transport: T, config: ClientConfig) -> Self {
        let (event_tx, _event_rx) = event_channel(config.event_capacity);
        Self {
            capabilities: CapabilityCache::with_events(event_tx.clone()),
            transport,
            config,
            event_tx,
        }
    }

    /// Subscribe to controller events.
    pub fn subscribe(&self) -> EventReceiver {
        self.event_tx.subscribe()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue one command with its default action.
    pub(crate) async fn send(&self, command: Command, payload: Value) -> Result<Value> {
        debug!("Sending {} {}", command, payload);
        self.transport
            .request(command, payload, command.default_action())
            .await
    }

    fn publish(&self, event: PtzEvent) {
        let _ = self.event_tx.send(event);
    }

    fn publish_stage(&self, channel: u32, preset_id: u32, stage: PipelineStage) {
        self.publish(PtzEvent::Stage {
            channel,
            preset_id,
            stage,
        });
    }

    // --- Presets ---

    /// List the presets stored on a channel. Always queries the device.
    ///
    /// Replies in an unrecognized shape yield an empty list; only transport
    /// and device errors are returned.
    pub async fn list_presets(&self, channel: u32) -> Result<Vec<PtzPreset>> {
        let reply = self
            .send(Command::GetPtzPreset, json!({ "channel": channel }))
            .await?;
        let presets = normalize_presets(&reply, channel);
        debug!("Channel {} has {} presets", channel, presets.len());
        Ok(presets)
    }

    /// Create or update a preset slot.
    ///
    /// With `enable: None` the field is left out of the request and the
    /// device keeps its current value.
    pub async fn set_preset(
        &self,
        channel: u32,
        id: u32,
        name: &str,
        enable: Option<bool>,
    ) -> Result<()> {
        check_preset_id(id)?;
        let mut preset = Map::new();
        preset.insert("channel".to_string(), Value::from(channel));
        preset.insert("id".to_string(), Value::from(id));
        preset.insert("name".to_string(), Value::from(name));
        if let Some(enable) = enable {
            preset.insert("enable".to_string(), flag(enable));
        }
        self.send(Command::SetPtzPreset, json!({ "PtzPreset": preset }))
            .await?;
        Ok(())
    }

    /// Move to a preset and wait for the head to settle.
    ///
    /// The device acknowledges the move before the motors stop, so the
    /// settle delay runs after the acknowledgement. Reads or writes issued
    /// earlier would see the camera in transit.
    pub async fn goto_preset(&self, channel: u32, id: u32, opts: GotoOptions) -> Result<()> {
        check_preset_id(id)?;
        let mut payload = json!({ "channel": channel, "op": OP_TO_PRESET, "id": id });
        if let Some(speed) = opts.speed {
            payload["speed"] = Value::from(speed.clamp(PTZ_SPEED_MIN, PTZ_SPEED_MAX));
        }
        self.send(Command::PtzCtrl, payload).await?;
        self.publish_stage(channel, id, PipelineStage::GotoIssued);

        let settle = opts.settle.unwrap_or_else(|| self.config.settle());
        if !settle.is_zero() {
            debug!("Settling {}ms after move to preset {}", settle.as_millis(), id);
            sleep(settle).await;
        }
        self.publish_stage(channel, id, PipelineStage::Settled);
        Ok(())
    }

    /// Write a zone bundle: masks, then the motion zone, then AI zones in
    /// canonical type order.
    ///
    /// Each write stands alone and nothing is rolled back. If a later write
    /// fails, the earlier ones stay committed on the device.
    pub async fn apply_zones_for_preset(
        &self,
        channel: u32,
        preset_id: u32,
        zones: &PresetZones,
    ) -> Result<ZonesApplied> {
        let mut applied = ZonesApplied::default();

        if let Some(masks) = &zones.masks {
            self.set_masks(channel, masks).await?;
            applied.masks = Some(masks.len());
            self.publish_stage(channel, preset_id, PipelineStage::MasksApplied);
        }

        if let Some(md) = &zones.md {
            self.set_md_zone(channel, md).await?;
            applied.motion = true;
            self.publish_stage(channel, preset_id, PipelineStage::MotionApplied);
        }

        for (ai_type, area) in &zones.ai {
            self.write_ai_zone(channel, *ai_type, area).await?;
            applied.ai.push(*ai_type);
            self.publish_stage(channel, preset_id, PipelineStage::AiApplied(*ai_type));
        }

        self.publish_stage(channel, preset_id, PipelineStage::Done);
        info!(
            "Zones applied for preset {} on channel {}: {:?}",
            preset_id, channel, applied
        );
        Ok(applied)
    }

    /// Move to a preset, then apply whatever zones `zones_provider` has for it.
    ///
    /// The provider is only called once the camera has settled. `Ok(None)`
    /// means the provider had nothing for this preset.
    pub async fn goto_preset_with_zones<F, Fut>(
        &self,
        channel: u32,
        preset_id: u32,
        zones_provider: F,
        opts: GotoOptions,
    ) -> Result<Option<ZonesApplied>>
    where
        F: FnOnce(u32) -> Fut,
        Fut: Future<Output = Option<PresetZones>>,
    {
        self.goto_preset(channel, preset_id, opts).await?;

        let Some(zones) = zones_provider(preset_id).await else {
            debug!("No zones stored for preset {}", preset_id);
            return Ok(None);
        };
        self.publish_stage(channel, preset_id, PipelineStage::ZonesResolved);

        self.apply_zones_for_preset(channel, preset_id, &zones)
            .await
            .map(Some)
    }

    // --- Motion zone ---

    /// Write the motion detection grid.
    ///
    /// The current motion alarm configuration is read first so the write
    /// keeps the device's other settings. If that read returns something
    /// unusable, only the scope is sent. Device and transport errors from
    /// the read are returned as-is.
    pub async fn set_md_zone(&self, channel: u32, area: &GridArea) -> Result<()> {
        let scope = grid::encode(area)?;
        let minimal = || json!({ "channel": channel, "scope": scope.clone() });

        let md_alarm = match self
            .send(Command::GetMdAlarm, json!({ "channel": channel }))
            .await
        {
            Ok(current) => match merge_md_alarm(&current, channel, &scope) {
                Some(merged) => merged,
                None => {
                    self.motion_merge_skipped(channel, "reply has no MdAlarm object");
                    minimal()
                }
            },
            Err(e) if e.is_device_error() => return Err(e),
            Err(e) => {
                self.motion_merge_skipped(channel, &e.to_string());
                minimal()
            }
        };

        self.send(Command::SetMdAlarm, json!({ "MdAlarm": md_alarm }))
            .await?;
        Ok(())
    }

    fn motion_merge_skipped(&self, channel: u32, reason: &str) {
        warn!(
            "Motion zone merge skipped on channel {}: {}; sending scope only",
            channel, reason
        );
        self.publish(PtzEvent::MotionMergeSkipped {
            channel,
            reason: reason.to_string(),
        });
    }

    /// Read the motion detection grid.
    pub async fn get_md_zone(&self, channel: u32) -> Result<GridArea> {
        let reply = self
            .send(Command::GetMdAlarm, json!({ "channel": channel }))
            .await?;
        decode_scope(&reply, &MD_ALARM, Command::GetMdAlarm)
    }

    // --- AI zones ---

    /// Overwrite the detection grid for one AI type.
    ///
    /// `ai_type` must be `people`, `vehicle`, `dog_cat` or `face`. The type
    /// and the grid are both checked before anything is sent.
    pub async fn set_ai_zone(&self, channel: u32, ai_type: &str, area: &GridArea) -> Result<()> {
        let ai_type: AiType = ai_type.parse()?;
        self.write_ai_zone(channel, ai_type, area).await
    }

    async fn write_ai_zone(&self, channel: u32, ai_type: AiType, area: &GridArea) -> Result<()> {
        let scope = grid::encode(area)?;
        let payload = json!({
            "channel": channel,
            "AiAlarm": {
                "channel": channel,
                "ai_type": ai_type.as_str(),
                "scope": scope,
            }
        });
        self.send(Command::SetAiAlarm, payload).await?;
        Ok(())
    }

    /// Read the detection grid for one AI type.
    pub async fn get_ai_zone(&self, channel: u32, ai_type: &str) -> Result<GridArea> {
        let ai_type: AiType = ai_type.parse()?;
        let reply = self
            .send(
                Command::GetAiAlarm,
                json!({ "channel": channel, "ai_type": ai_type.as_str() }),
            )
            .await?;
        decode_scope(&reply, &AI_ALARM, Command::GetAiAlarm)
    }

    // --- Privacy masks ---

    /// Read the privacy masks.
    pub async fn get_masks(&self, channel: u32) -> Result<MaskConfig> {
        let reply = self
            .send(Command::GetMask, json!({ "channel": channel }))
            .await?;
        decode_section(&reply, &MASK, Command::GetMask)
    }

    /// Replace the privacy masks. An empty list also switches masking off.
    pub async fn set_masks(&self, channel: u32, areas: &[MaskArea]) -> Result<()> {
        let payload = json!({
            "Mask": {
                "channel": channel,
                "enable": flag(!areas.is_empty()),
                "area": areas,
            }
        });
        self.send(Command::SetMask, payload).await?;
        Ok(())
    }

    // --- Capabilities ---

    /// The channel's ability record (fetched once, then cached).
    pub async fn ability(&self, channel: u32) -> Value {
        self.capabilities
            .ability(&self.transport, &self.config.ability_user, channel)
            .await
    }

    /// AI types the channel supports (derived once, then cached).
    pub async fn supported_ai_types(&self, channel: u32) -> Vec<AiType> {
        self.capabilities
            .supported_ai_types(&self.transport, &self.config.ability_user, channel)
            .await
    }
}

fn check_preset_id(id: u32) -> Result<()> {
    if !(PRESET_ID_MIN..=PRESET_ID_MAX).contains(&id) {
        return Err(PtzError::validation(format!(
            "preset id {} outside {}..={}",
            id, PRESET_ID_MIN, PRESET_ID_MAX
        )));
    }
    Ok(())
}

/// Fold a new scope into the device's current `MdAlarm` object.
///
/// Sibling fields and non-grid scope keys are kept; grid keys under any
/// alias are replaced. Returns `None` when the reply has no `MdAlarm`
/// object to merge into.
pub(crate) fn merge_md_alarm(current: &Value, channel: u32, scope: &Value) -> Option<Value> {
    let md_alarm = MD_ALARM.get(current)?;
    let mut merged = md_alarm.as_object()?.clone();

    let mut merged_scope = SCOPE
        .get(md_alarm)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    for alias in [GRID_WIDTH, GRID_HEIGHT, GRID_BITS] {
        for name in alias.read {
            merged_scope.remove(*name);
        }
    }
    if let Some(new_scope) = scope.as_object() {
        merged_scope.extend(new_scope.clone());
    }

    for name in SCOPE.read {
        merged.remove(*name);
    }
    merged.insert("channel".to_string(), Value::from(channel));
    SCOPE.put(&mut merged, Value::Object(merged_scope));
    Some(Value::Object(merged))
}

fn decode_scope(reply: &Value, section: &FieldAlias, command: Command) -> Result<GridArea> {
    let scope = section
        .get(reply)
        .and_then(|s| SCOPE.get(s))
        .ok_or_else(|| PtzError::invalid_response(format!("{} reply has no scope", command)))?;
    grid::decode(scope)
}

/// Deserialize the named section of a reply.
pub(crate) fn decode_section<D: DeserializeOwned>(
    reply: &Value,
    section: &FieldAlias,
    command: Command,
) -> Result<D> {
    let body = section.get(reply).ok_or_else(|| {
        PtzError::invalid_response(format!(
            "{} reply has no {} section",
            command,
            section.write.first().copied().unwrap_or("expected")
        ))
    })?;
    D::deserialize(body)
        .map_err(|e| PtzError::invalid_response(format!("{} reply: {}", command, e)))
}

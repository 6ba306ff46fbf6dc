// MIT License - Copyright (c) 2026 Peter Wright
// Controller events

use crate::zones::AiType;

/// Steps of the preset pipeline (move, settle, resolve zones, write zones).
///
/// The pipeline is linear; it stops at the first hard error, so a stage is
/// only published once everything before it succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    /// Move-to-preset command acknowledged by the device.
    GotoIssued,
    /// Settle delay elapsed.
    Settled,
    /// Zones provider returned a bundle.
    ZonesResolved,
    /// Mask areas written.
    MasksApplied,
    /// Motion zone written.
    MotionApplied,
    /// One AI zone written.
    AiApplied(AiType),
    /// Zone application finished.
    Done,
}

/// All events that can be emitted by the controller.
///
/// Users subscribe via `controller.subscribe()` to receive a
/// `tokio::sync::broadcast::Receiver<PtzEvent>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PtzEvent {
    /// Pipeline progress for a preset.
    Stage {
        channel: u32,
        preset_id: u32,
        stage: PipelineStage,
    },
    /// Ability descriptor fetched (or given up on) for a channel.
    AbilityCached { channel: u32, available: bool },
    /// Supported AI types derived for a channel.
    AiTypesCached { channel: u32, types: Vec<AiType> },
    /// Motion-zone write fell back to a scope-only payload.
    MotionMergeSkipped { channel: u32, reason: String },
}

/// Type alias for the broadcast sender.
pub type EventSender = tokio::sync::broadcast::Sender<PtzEvent>;

/// Type alias for the broadcast receiver.
pub type EventReceiver = tokio::sync::broadcast::Receiver<PtzEvent>;

/// Create a new event channel with the given capacity.
pub fn event_channel(capacity: usize) -> (EventSender, EventReceiver) {
    tokio::sync::broadcast::channel(capacity.max(1))
}

// MIT License - Copyright (c) 2026 Peter Wright
// Per-channel capability cache

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value, json};
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, warn};

use crate::constants::{ABILITY_CHANNEL_FIELDS, ABILITY_ROOT, AI_FLAG_FIELDS, CHANNEL};
use crate::event::{EventSender, PtzEvent};
use crate::protocol::{Command, coerce_u32};
use crate::transport::Transport;
use crate::zones::{AiType, AiTypeFlags};

type Slot<V> = Arc<OnceCell<V>>;

/// Ability descriptors and derived AI support, memoized per channel.
///
/// Every lookup outcome is kept for the lifetime of the cache, failures
/// included: a channel whose ability query failed is remembered as having
/// no capability data and is never queried again. Each channel has its own
/// fill slot. Concurrent callers on the same channel wait for the first
/// one's request instead of issuing their own, while a slow fill on one
/// channel does not hold up lookups on another. The channel maps are only
/// locked long enough to find a slot.
#[derive(Debug, Default)]
pub struct CapabilityCache {
    abilities: Mutex<HashMap<u32, Slot<Value>>>,
    ai_types: Mutex<HashMap<u32, Slot<Vec<AiType>>>>,
    events: Option<EventSender>,
}

async fn slot<V>(map: &Mutex<HashMap<u32, Slot<V>>>, channel: u32) -> Slot<V> {
    map.lock().await.entry(channel).or_default().clone()
}

impl CapabilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish cache fills on `events`.
    pub fn with_events(events: EventSender) -> Self {
        Self {
            events: Some(events),
            ..Self::default()
        }
    }

    fn publish(&self, event: PtzEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }

    /// The channel's ability record, fetching it on first use.
    ///
    /// Returns an empty object when the device gave no usable answer.
    pub async fn ability<T: Transport>(&self, transport: &T, user: &str, channel: u32) -> Value {
        slot(&self.abilities, channel)
            .await
            .get_or_init(|| self.fetch_ability(transport, user, channel))
            .await
            .clone()
    }

    async fn fetch_ability<T: Transport>(&self, transport: &T, user: &str, channel: u32) -> Value {
        let payload = json!({ "User": { "userName": user } });
        let (record, available) = match transport
            .request(Command::GetAbility, payload, Command::GetAbility.default_action())
            .await
        {
            Ok(descriptor) => (resolve_channel_ability(&descriptor, channel), true),
            Err(e) => {
                warn!("Ability query failed for channel {}: {}", channel, e);
                (Value::Object(Map::new()), false)
            }
        };
        self.publish(PtzEvent::AbilityCached { channel, available });
        record
    }

    /// Whether the ability record for `channel` has been fetched already.
    pub async fn has_ability(&self, channel: u32) -> bool {
        self.abilities
            .lock()
            .await
            .get(&channel)
            .is_some_and(|slot| slot.initialized())
    }

    /// Supported AI types for a channel, derived once and then memoized.
    ///
    /// The ability record is consulted first; only if it advertises nothing
    /// is the AI configuration queried. Failures at either step just mean
    /// fewer types.
    pub async fn supported_ai_types<T: Transport>(
        &self,
        transport: &T,
        user: &str,
        channel: u32,
    ) -> Vec<AiType> {
        slot(&self.ai_types, channel)
            .await
            .get_or_init(|| self.derive_ai_types(transport, user, channel))
            .await
            .clone()
    }

    async fn derive_ai_types<T: Transport>(
        &self,
        transport: &T,
        user: &str,
        channel: u32,
    ) -> Vec<AiType> {
        let ability = self.ability(transport, user, channel).await;
        let mut flags = ai_flags_from_ability(&ability);

        if flags.is_empty() {
            let payload = json!({ "channel": channel });
            match transport
                .request(Command::GetAiCfg, payload, Command::GetAiCfg.default_action())
                .await
            {
                Ok(cfg) => flags = ai_flags_from_ai_cfg(&cfg),
                Err(e) => debug!("AI config fallback failed for channel {}: {}", channel, e),
            }
        }

        let types = flags.to_types();
        debug!("Channel {} supports AI types {:?}", channel, types);
        self.publish(PtzEvent::AiTypesCached {
            channel,
            types: types.clone(),
        });
        types
    }
}

/// Pick the record for `channel` out of an ability descriptor.
///
/// Per-channel fields are searched in [`ABILITY_CHANNEL_FIELDS`] order: an
/// array is matched on its elements' `channel`, then indexed by channel
/// number; a map is keyed by `"{channel}"` or `"chn{channel}"`. Without any
/// per-channel structure the whole descriptor is the record.
pub fn resolve_channel_ability(descriptor: &Value, channel: u32) -> Value {
    let root = ABILITY_ROOT.get(descriptor).unwrap_or(descriptor);
    let Some(obj) = root.as_object() else {
        return root.clone();
    };

    for field in ABILITY_CHANNEL_FIELDS {
        match obj.get(field) {
            Some(Value::Array(items)) => {
                let by_channel = items.iter().find(|item| {
                    CHANNEL.get(item).and_then(coerce_u32) == Some(channel)
                });
                if let Some(found) = by_channel.or_else(|| items.get(channel as usize)) {
                    return found.clone();
                }
            }
            Some(Value::Object(map)) => {
                let found = map
                    .get(&channel.to_string())
                    .or_else(|| map.get(&format!("chn{}", channel)));
                if let Some(found) = found {
                    return found.clone();
                }
            }
            _ => {}
        }
    }

    root.clone()
}

/// Tier one: AI flags advertised in an ability record.
pub fn ai_flags_from_ability(ability: &Value) -> AiTypeFlags {
    let flag_object = ability
        .as_object()
        .and_then(|obj| {
            AI_FLAG_FIELDS
                .iter()
                .filter_map(|field| obj.get(*field))
                .find(|v| v.is_object())
        })
        .unwrap_or(ability);
    AiTypeFlags::from_flag_object(flag_object)
}

/// Tier two: AI flags from a `GetAiCfg` reply's `ability` block.
pub fn ai_flags_from_ai_cfg(cfg: &Value) -> AiTypeFlags {
    let ability = cfg
        .get("ability")
        .or_else(|| cfg.get("Ability"))
        .unwrap_or(&Value::Null);
    AiTypeFlags::from_flag_object(ability)
}

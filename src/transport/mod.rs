// MIT License - Copyright (c) 2026 Peter Wright
// Transport seams consumed by the controller

use serde_json::Value;

use crate::error::Result;
use crate::protocol::{Action, Command};

/// Authenticated request/response channel to one camera.
///
/// Implementations own login, token refresh, HTTP retries and timeouts.
/// `request` resolves to the reply's `value` object on success. A reply the
/// device marks as failed must surface as [`PtzError::Device`]
/// (or [`PtzError::Transport`] when the exchange itself broke); the
/// controller passes those through unchanged.
///
/// [`PtzError::Device`]: crate::error::PtzError::Device
/// [`PtzError::Transport`]: crate::error::PtzError::Transport
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    /// Send one command envelope and wait for its reply value.
    async fn request(&self, command: Command, payload: Value, action: Action) -> Result<Value>;
}

/// Still-image capture for a channel.
#[allow(async_fn_in_trait)]
pub trait Snapshot: Send + Sync {
    /// Capture one full-frame JPEG.
    async fn snapshot(&self, channel: u32) -> Result<Vec<u8>>;
}

impl<T: Transport> Transport for &T {
    async fn request(&self, command: Command, payload: Value, action: Action) -> Result<Value> {
        (**self).request(command, payload, action).await
    }
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    async fn request(&self, command: Command, payload: Value, action: Action) -> Result<Value> {
        (**self).request(command, payload, action).await
    }
}

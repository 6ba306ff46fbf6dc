// MIT License - Copyright (c) 2026 Peter Wright
// Panorama capture

use tracing::{debug, info};

use crate::error::{PtzError, Result};
use crate::transport::Snapshot;

/// Requested panorama geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanoramaPlan {
    /// Upper bound on tiles to capture. Must be at least 1.
    pub max_tiles: u32,
    pub columns: u32,
    pub rows: u32,
}

impl Default for PanoramaPlan {
    fn default() -> Self {
        Self {
            max_tiles: 1,
            columns: 1,
            rows: 1,
        }
    }
}

/// Result of [`build_panorama`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanoramaCapture {
    /// Tiles actually captured. Always 1 for now.
    pub tiles: u32,
    /// Tiles the plan asked for (`columns * rows`, capped at `max_tiles`).
    pub requested_tiles: u32,
    /// The captured frame.
    pub image: Vec<u8>,
}

/// Capture a panorama for `channel`.
///
/// Only a single full-frame snapshot is taken whatever the plan's geometry;
/// multi-tile sweeps are left to external stitching tools that drive the
/// PTZ and snapshot primitives themselves.
pub async fn build_panorama<S: Snapshot>(
    channel: u32,
    plan: &PanoramaPlan,
    snapshot: &S,
) -> Result<PanoramaCapture> {
    if plan.max_tiles == 0 {
        return Err(PtzError::validation("panorama needs max_tiles > 0"));
    }

    let requested_tiles = plan
        .columns
        .max(1)
        .saturating_mul(plan.rows.max(1))
        .min(plan.max_tiles);
    if requested_tiles > 1 {
        debug!(
            "Panorama on channel {} asked for {} tiles; capturing a single frame",
            channel, requested_tiles
        );
    }

    let image = snapshot.snapshot(channel).await?;
    info!("Panorama captured on channel {} ({} bytes)", channel, image.len());
    Ok(PanoramaCapture {
        tiles: 1,
        requested_tiles,
        image,
    })
}

//! Per-tick render frame snapshot.
//!
//! Rewritten once per tick by
//! [`publish_render_frames`](crate::systems::animation::publish_render_frames).
//! The renderer reads it instead of evaluating clips itself, so every consumer
//! in the same tick sees the same frames.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::components::tileattributes::TileTypeId;

/// Current frame of every animated tile type.
#[derive(Resource, Debug, Default, Clone)]
pub struct RenderFrames {
    /// Clock time the snapshot was taken at.
    pub elapsed_ms: u64,
    pub frames: FxHashMap<TileTypeId, TileTypeId>,
}

impl RenderFrames {
    /// Tile type to draw for `tile_type`. Static types draw themselves.
    pub fn frame_for(&self, tile_type: TileTypeId) -> TileTypeId {
        self.frames.get(&tile_type).copied().unwrap_or(tile_type)
    }
}

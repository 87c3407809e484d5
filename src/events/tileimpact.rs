//! Impact messages in, break events out.
//!
//! The combat/physics collaborator writes a [`TileImpact`] for every hit on a
//! tile, either directly into the ECS message queue or from any thread through
//! the [`ImpactBridge`](crate::resources::impactbridge::ImpactBridge).
//! [`process_tile_impacts`](crate::systems::impacts::process_tile_impacts)
//! applies them in order and writes one [`BreakEvent`] per tile that broke.
//! Rendering swaps the tile's visuals on a break event and audio plays a
//! break sound; neither is done here.

use bevy_ecs::message::Message;
use serde::{Deserialize, Serialize};

use crate::components::tileattributes::{BreakabilityTier, TileTypeId};
use crate::components::tileposition::TilePosition;

/// A hit of magnitude `damage` on the tile of type `tile_type` at `position`.
#[derive(Message, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileImpact {
    pub position: TilePosition,
    pub tile_type: TileTypeId,
    pub damage: f32,
}

impl TileImpact {
    pub fn new(position: TilePosition, tile_type: TileTypeId, damage: f32) -> Self {
        Self {
            position,
            tile_type,
            damage,
        }
    }
}

/// Emitted exactly once when a tile instance goes from intact to broken.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakEvent {
    pub position: TilePosition,
    pub tile_type: TileTypeId,
    pub tier: BreakabilityTier,
}

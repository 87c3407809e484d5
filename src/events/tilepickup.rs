//! Pickup messages in, collect events out.
//!
//! The physics collaborator writes a [`TilePickup`] whenever a collector
//! overlaps a tile. [`process_tile_pickups`](crate::systems::pickups::process_tile_pickups)
//! marks collectable instances as collected and writes a [`CollectEvent`]
//! only the first time, so repeated overlap never awards twice. The inventory
//! consumes the collect events.

use bevy_ecs::message::Message;
use serde::{Deserialize, Serialize};

use crate::components::tileattributes::{CollectableKind, TileTypeId};
use crate::components::tileposition::TilePosition;

/// A collector touched the tile of type `tile_type` at `position`.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePickup {
    pub position: TilePosition,
    pub tile_type: TileTypeId,
}

impl TilePickup {
    pub fn new(position: TilePosition, tile_type: TileTypeId) -> Self {
        Self {
            position,
            tile_type,
        }
    }
}

/// A collectable tile was picked up. Emitted once per instance.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectEvent {
    pub position: TilePosition,
    pub tile_type: TileTypeId,
    pub kind: CollectableKind,
}

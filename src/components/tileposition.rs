use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// The behaviour and rendering order of a tile layer.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TileLayerKind {
    Foreground,
    #[default]
    Collision,
    Background,
}

impl TileLayerKind {
    pub fn name(&self) -> &'static str {
        match self {
            TileLayerKind::Foreground => "foreground",
            TileLayerKind::Collision => "collision",
            TileLayerKind::Background => "background",
        }
    }
}

/// World position of a placed tile: layer plus grid cell.
///
/// Also usable as a component on entities that mirror placed tiles.
#[derive(
    Component, Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TilePosition {
    pub layer: TileLayerKind,
    pub x: i32,
    pub y: i32,
}

impl TilePosition {
    pub fn new(layer: TileLayerKind, x: i32, y: i32) -> Self {
        Self { layer, x, y }
    }

    /// Position on the collision layer.
    pub fn collision(x: i32, y: i32) -> Self {
        Self::new(TileLayerKind::Collision, x, y)
    }
}

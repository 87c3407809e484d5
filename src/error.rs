//! Error types for tileset loading and tile queries.
//!
//! Load-time problems are reported as [`TileError::MalformedDefinition`] and
//! abort the whole load. Query-time lookups outside the tileset report
//! [`TileError::UnknownTileType`]. Impacts on non-destructible or broken tiles
//! are not errors at all.

use thiserror::Error;

use crate::components::tileattributes::TileTypeId;

/// Errors raised by the definition table, instance store and resolver.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TileError {
    /// The descriptor contains a definition that cannot be loaded.
    #[error("malformed definition for tile {tile}: {reason}")]
    MalformedDefinition { tile: TileTypeId, reason: String },
    /// A tile ID outside `[0, tile_count)` was queried.
    #[error("unknown tile type {tile} (tileset has {tile_count} tiles)")]
    UnknownTileType { tile: TileTypeId, tile_count: u32 },
}

impl TileError {
    pub(crate) fn malformed(tile: TileTypeId, reason: impl Into<String>) -> Self {
        TileError::MalformedDefinition {
            tile,
            reason: reason.into(),
        }
    }
}

/// Invalid animation clip shapes.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ClipError {
    #[error("animation clip has no frames")]
    Empty,
    #[error("animation clip has a total duration of 0 ms")]
    ZeroDuration,
}

/// Failures while reading a tileset descriptor from disk or text.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("failed to read descriptor: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse descriptor: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Tile(#[from] TileError),
}

/// Level grid data that cannot be turned into tile placements.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("layer width must be at least 1")]
    ZeroWidth,
    #[error("invalid tile gid {value:?} at cell {index}")]
    InvalidCell { index: usize, value: String },
}

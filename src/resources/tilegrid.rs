//! Level grid: which tile type sits at each placed position.
//!
//! Built at level load, either cell by cell with [`TileGrid::place`] or from
//! Tiled-style CSV layer data with [`TileGrid::insert_csv_layer`]. The grid
//! must be checked with [`TileGrid::validate_against`] before it is used for
//! position-only queries, so that every placed ID exists in the tileset.

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;

use crate::components::tileattributes::TileTypeId;
use crate::components::tileposition::{TileLayerKind, TilePosition};
use crate::error::{GridError, TileError};
use crate::resources::tiledefinitions::TileDefinitionTable;

/// Sparse map of placed tiles keyed by position.
#[derive(Resource, Debug, Default, Clone)]
pub struct TileGrid {
    cells: FxHashMap<TilePosition, TileTypeId>,
}

impl TileGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `tile_type` at `position`, returning the type it replaced.
    pub fn place(&mut self, position: TilePosition, tile_type: TileTypeId) -> Option<TileTypeId> {
        self.cells.insert(position, tile_type)
    }

    /// Remove the tile at `position`, returning its type.
    pub fn remove(&mut self, position: TilePosition) -> Option<TileTypeId> {
        self.cells.remove(&position)
    }

    pub fn tile_at(&self, position: TilePosition) -> Option<TileTypeId> {
        self.cells.get(&position).copied()
    }

    /// Load one layer from comma-separated global tile IDs in row-major order.
    ///
    /// `0` leaves the cell empty; any other gid places tile `gid - 1`.
    /// Existing placements on `layer` are replaced. On error the grid is left
    /// unchanged. Returns the number of placed tiles.
    pub fn insert_csv_layer(
        &mut self,
        layer: TileLayerKind,
        width: u32,
        csv: &str,
    ) -> Result<usize, GridError> {
        if width == 0 {
            return Err(GridError::ZeroWidth);
        }

        let mut tokens: Vec<&str> = csv.split(',').map(str::trim).collect();
        // Tiled ends every row but the last with a comma; tolerate one more.
        if tokens.last().is_some_and(|t| t.is_empty()) {
            tokens.pop();
        }

        let mut placed = Vec::new();
        for (index, token) in tokens.iter().enumerate() {
            let gid: u32 = token.parse().map_err(|_| GridError::InvalidCell {
                index,
                value: token.to_string(),
            })?;
            if gid == 0 {
                continue;
            }
            let x = (index % width as usize) as i32;
            let y = (index / width as usize) as i32;
            placed.push((TilePosition::new(layer, x, y), gid - 1));
        }

        self.cells.retain(|position, _| position.layer != layer);
        let count = placed.len();
        self.cells.extend(placed);
        info!(
            "Loaded {} layer: {} cells, {} tiles placed",
            layer.name(),
            tokens.len(),
            count
        );
        Ok(count)
    }

    /// Fail with [`TileError::UnknownTileType`] on the first placed ID that
    /// the table does not contain.
    pub fn validate_against(&self, table: &TileDefinitionTable) -> Result<(), TileError> {
        match self.cells.values().find(|tile| !table.contains(**tile)) {
            Some(tile) => Err(TileError::UnknownTileType {
                tile: *tile,
                tile_count: table.tile_count(),
            }),
            None => Ok(()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TilePosition, &TileTypeId)> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

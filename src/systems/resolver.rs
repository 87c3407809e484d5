//! Tile attribute resolver.
//!
//! The query façade used by rendering, collision and combat. A resolve
//! combines the type-level definition with the instance-level state stored for
//! that position, and evaluates the animation clip at an explicit clock value.
//! Nothing here mutates, so any number of systems can resolve in parallel.
//!
//! | instance state | collision layer      | contact damage | collectable |
//! |----------------|----------------------|----------------|-------------|
//! | untouched      | declared or Terrain  | declared or 0  | declared    |
//! | collected      | declared or Terrain  | declared or 0  | none        |
//! | broken         | Passable             | 0              | none        |
//!
//! Systems get a [`TileResolver`] through the [`TileAttributes`] system param.
//!
//! # Related
//!
//! - [`crate::resources::tiledefinitions::TileDefinitionTable`] – type-level properties
//! - [`crate::resources::tileinstances::TileInstanceStore`] – instance-level state
//! - [`crate::resources::simclock::SimClock`] – clock value used for render frames

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;

use crate::components::tileattributes::{CollectableKind, CollisionLayer, TileTypeId};
use crate::components::tileposition::TilePosition;
use crate::error::TileError;
use crate::resources::simclock::SimClock;
use crate::resources::tiledefinitions::{TileDefinitionTable, TileDefinitions};
use crate::resources::tilegrid::TileGrid;
use crate::resources::tileinstances::TileInstanceStore;

/// Effective properties of one placed tile at one clock value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveTile {
    pub tile_type: TileTypeId,
    pub collision_layer: CollisionLayer,
    pub collectable: Option<CollectableKind>,
    pub contact_damage: f32,
    /// Tile type to draw this tick.
    pub render_frame: TileTypeId,
    pub broken: bool,
    pub collected: bool,
}

/// Read-only view over definitions, instance state and the level grid.
#[derive(Debug, Clone, Copy)]
pub struct TileResolver<'a> {
    definitions: &'a TileDefinitionTable,
    instances: &'a TileInstanceStore,
    elapsed_ms: u64,
    grid: Option<&'a TileGrid>,
}

impl<'a> TileResolver<'a> {
    pub fn new(
        definitions: &'a TileDefinitionTable,
        instances: &'a TileInstanceStore,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            definitions,
            instances,
            elapsed_ms,
            grid: None,
        }
    }

    /// Enable position-only queries against `grid`.
    pub fn with_grid(mut self, grid: &'a TileGrid) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Effective properties of the `tile_type` tile placed at `position`.
    pub fn resolve(
        &self,
        position: TilePosition,
        tile_type: TileTypeId,
    ) -> Result<EffectiveTile, TileError> {
        let definition = self.definitions.lookup(tile_type)?;
        let render_frame = self.render_frame(tile_type)?;
        let (broken, collected) = self
            .instances
            .state_for(position, tile_type)
            .map_or((false, false), |instance| {
                (instance.is_broken(), instance.collected)
            });

        if broken {
            return Ok(EffectiveTile {
                tile_type,
                collision_layer: CollisionLayer::Passable,
                collectable: None,
                contact_damage: 0.0,
                render_frame,
                broken,
                collected,
            });
        }

        Ok(EffectiveTile {
            tile_type,
            collision_layer: definition.collision_layer.unwrap_or_default(),
            collectable: definition.collectable.filter(|_| !collected),
            contact_damage: definition.damage(),
            render_frame,
            broken,
            collected,
        })
    }

    /// Resolve whatever the grid holds at `position`. `Ok(None)` for empty
    /// cells or when no grid is attached.
    pub fn resolve_at(&self, position: TilePosition) -> Result<Option<EffectiveTile>, TileError> {
        match self.grid.and_then(|grid| grid.tile_at(position)) {
            Some(tile_type) => self.resolve(position, tile_type).map(Some),
            None => Ok(None),
        }
    }

    /// Tile type to draw for `tile_type` at the resolver's clock value.
    pub fn render_frame(&self, tile_type: TileTypeId) -> Result<TileTypeId, TileError> {
        let definition = self.definitions.lookup(tile_type)?;
        Ok(definition
            .animation
            .as_ref()
            .map_or(tile_type, |clip| clip.current_frame(self.elapsed_ms)))
    }

    pub fn collision_layer_at(
        &self,
        position: TilePosition,
    ) -> Result<Option<CollisionLayer>, TileError> {
        Ok(self.resolve_at(position)?.map(|tile| tile.collision_layer))
    }

    /// Contact damage at `position`, zero for empty cells.
    pub fn contact_damage_at(&self, position: TilePosition) -> Result<f32, TileError> {
        Ok(self
            .resolve_at(position)?
            .map_or(0.0, |tile| tile.contact_damage))
    }

    pub fn collectable_at(
        &self,
        position: TilePosition,
    ) -> Result<Option<CollectableKind>, TileError> {
        Ok(self.resolve_at(position)?.and_then(|tile| tile.collectable))
    }
}

/// Bundled resources for resolving tiles from any system.
#[derive(SystemParam)]
pub struct TileAttributes<'w> {
    pub definitions: Res<'w, TileDefinitions>,
    pub instances: Res<'w, TileInstanceStore>,
    pub clock: Res<'w, SimClock>,
    pub grid: Option<Res<'w, TileGrid>>,
}

impl TileAttributes<'_> {
    /// Resolver evaluated at the current simulation clock.
    pub fn resolver(&self) -> TileResolver<'_> {
        let resolver = TileResolver::new(
            &self.definitions,
            &self.instances,
            self.clock.elapsed_ms(),
        );
        match self.grid.as_deref() {
            Some(grid) => resolver.with_grid(grid),
            None => resolver,
        }
    }
}

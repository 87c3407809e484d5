//! Sparse per-position tile instance state.
//!
//! Only instances that deviate from their type's defaults are stored: a
//! destructible tile that has taken a counted hit, or a collectable that was
//! picked up. Untouched tiles have no entry, so memory grows with "tiles that
//! have been hit", not with the map size. Types that are neither destructible
//! nor collectable never get an entry.
//!
//! The store is owned by the simulation schedule. Every mutation goes through
//! [`TileInstanceStore::record_impact`] or [`TileInstanceStore::collect`],
//! which return an event only on the call that changed the instance's state.
//! [`TileInstanceStore::snapshot`] and [`TileInstanceStore::restore`] carry the
//! state across sessions, so consumed pickups stay consumed after a reload.

use bevy_ecs::prelude::Resource;
use log::{debug, info};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::breakstate::{BreakState, ImpactOutcome};
use crate::components::tileattributes::TileTypeId;
use crate::components::tileposition::TilePosition;
use crate::error::TileError;
use crate::events::tileimpact::BreakEvent;
use crate::events::tilepickup::CollectEvent;
use crate::resources::tiledefinitions::TileDefinitionTable;

/// Mutable state of one placed tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileInstance {
    /// Type the state was recorded for.
    pub tile_type: TileTypeId,
    /// Meaningful only for destructible types.
    pub break_state: BreakState,
    /// Meaningful only for collectable types.
    pub collected: bool,
}

impl TileInstance {
    pub fn new(tile_type: TileTypeId) -> Self {
        Self {
            tile_type,
            break_state: BreakState::default(),
            collected: false,
        }
    }

    pub fn is_broken(&self) -> bool {
        self.break_state.is_broken()
    }
}

/// One stored instance in an [`InstanceSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub position: TilePosition,
    #[serde(flatten)]
    pub instance: TileInstance,
}

/// Serializable copy of every materialized instance, ordered by position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSnapshot {
    #[serde(default)]
    pub instances: Vec<InstanceRecord>,
}

/// Registry of materialized tile instances keyed by position.
#[derive(Resource, Debug, Default, Clone)]
pub struct TileInstanceStore {
    instances: FxHashMap<TilePosition, TileInstance>,
}

impl TileInstanceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an impact to the tile of `tile_type` at `position`.
    ///
    /// Returns a [`BreakEvent`] only when this impact broke the tile. Impacts
    /// on non-destructible or already broken tiles, and impacts with no
    /// positive damage, return `Ok(None)` and leave the store untouched.
    pub fn record_impact(
        &mut self,
        table: &TileDefinitionTable,
        position: TilePosition,
        tile_type: TileTypeId,
        damage: f32,
    ) -> Result<Option<BreakEvent>, TileError> {
        let definition = table.lookup(tile_type)?;
        let Some(tier) = definition.breakability else {
            return Ok(None);
        };
        if !(damage > 0.0) {
            return Ok(None);
        }

        let instance = self.instance_mut(position, tile_type);
        match instance.break_state.apply_impact(tier, damage) {
            ImpactOutcome::Broke => {
                debug!(
                    "Tile {} at {:?} broke ({} tier)",
                    tile_type, position, tier
                );
                Ok(Some(BreakEvent {
                    position,
                    tile_type,
                    tier,
                }))
            }
            ImpactOutcome::Absorbed => {
                debug!(
                    "Tile {} at {:?} absorbed a hit ({:?})",
                    tile_type, position, instance.break_state
                );
                Ok(None)
            }
            ImpactOutcome::Ignored | ImpactOutcome::AlreadyBroken => Ok(None),
        }
    }

    /// Mark the collectable tile of `tile_type` at `position` as collected.
    ///
    /// Returns a [`CollectEvent`] only the first time. Non-collectable and
    /// broken tiles return `Ok(None)`.
    pub fn collect(
        &mut self,
        table: &TileDefinitionTable,
        position: TilePosition,
        tile_type: TileTypeId,
    ) -> Result<Option<CollectEvent>, TileError> {
        let definition = table.lookup(tile_type)?;
        let Some(kind) = definition.collectable else {
            return Ok(None);
        };
        if self.is_broken_as(position, tile_type) {
            return Ok(None);
        }

        let instance = self.instance_mut(position, tile_type);
        if instance.collected {
            return Ok(None);
        }
        instance.collected = true;
        debug!("Tile {} at {:?} collected ({})", tile_type, position, kind);
        Ok(Some(CollectEvent {
            position,
            tile_type,
            kind,
        }))
    }

    /// Stored state at `position`, if any.
    pub fn get(&self, position: TilePosition) -> Option<&TileInstance> {
        self.instances.get(&position)
    }

    pub fn is_broken(&self, position: TilePosition) -> bool {
        self.get(position).is_some_and(TileInstance::is_broken)
    }

    pub fn is_collected(&self, position: TilePosition) -> bool {
        self.get(position).is_some_and(|instance| instance.collected)
    }

    /// Number of materialized instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Drop all instance state, e.g. on level reload.
    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TilePosition, &TileInstance)> {
        self.instances.iter()
    }

    /// Copy the stored state out for saving.
    pub fn snapshot(&self) -> InstanceSnapshot {
        let mut instances: Vec<_> = self
            .instances
            .iter()
            .map(|(position, instance)| InstanceRecord {
                position: *position,
                instance: *instance,
            })
            .collect();
        instances.sort_unstable_by_key(|record| record.position);
        InstanceSnapshot { instances }
    }

    /// Replace the stored state with a saved snapshot.
    ///
    /// Every record is checked against `table` first; on error the store is
    /// left as it was. Records for types that carry no instance state are
    /// malformed, and a repeated position keeps the last record.
    pub fn restore(
        &mut self,
        table: &TileDefinitionTable,
        snapshot: &InstanceSnapshot,
    ) -> Result<(), TileError> {
        let mut instances = FxHashMap::default();
        for record in &snapshot.instances {
            let tile_type = record.instance.tile_type;
            if !table.lookup(tile_type)?.is_stateful() {
                return Err(TileError::malformed(
                    tile_type,
                    format!("saved state at {:?} for a stateless tile", record.position),
                ));
            }
            instances.insert(record.position, record.instance);
        }
        info!("Restored {} tile instances", instances.len());
        self.instances = instances;
        Ok(())
    }

    /// State at `position` as it applies to `tile_type`: an entry recorded for
    /// a different type is stale and does not count.
    pub(crate) fn state_for(
        &self,
        position: TilePosition,
        tile_type: TileTypeId,
    ) -> Option<&TileInstance> {
        self.get(position)
            .filter(|instance| instance.tile_type == tile_type)
    }

    fn is_broken_as(&self, position: TilePosition, tile_type: TileTypeId) -> bool {
        self.state_for(position, tile_type)
            .is_some_and(TileInstance::is_broken)
    }

    /// Entry for `position`, created lazily and reset when the tile at that
    /// position was replaced by a different type.
    fn instance_mut(&mut self, position: TilePosition, tile_type: TileTypeId) -> &mut TileInstance {
        let instance = self
            .instances
            .entry(position)
            .or_insert_with(|| TileInstance::new(tile_type));
        if instance.tile_type != tile_type {
            debug!(
                "Tile at {:?} changed type {} -> {}, resetting its state",
                position, instance.tile_type, tile_type
            );
            *instance = TileInstance::new(tile_type);
        }
        instance
    }
}

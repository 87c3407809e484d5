//! Tile definition table.
//!
//! The table is dense: every ID in `[0, tile_count)` has a definition, and
//! undeclared IDs get the all-default one. It is built once through
//! [`TileTableBuilder`] and never mutated afterwards, so it is shared through
//! an `Arc` by the [`TileDefinitions`] resource and read from any thread
//! without locking.
//!
//! # Loading
//!
//! 1. [`TileDefinitionTable::builder`] with the tileset's tile count
//! 2. [`TileTableBuilder::define`] once per declared tile. Out-of-range and
//!    duplicate IDs fail immediately.
//! 3. [`TileTableBuilder::build`] parses and validates every declared value.
//!    The first invalid value aborts the build, so a table is either complete
//!    or not produced at all. Tilesets above [`MAX_TILE_COUNT`] are refused
//!    before anything is allocated.

use std::ops::Deref;
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::{info, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::animationclip::{AnimationClip, AnimationFrame};
use crate::components::tileattributes::{
    BreakabilityTier, CasePolicy, CollectableKind, CollisionLayer, Declared, TileTypeId,
};
use crate::error::TileError;

/// Largest tileset the table accepts. Tile IDs come from untrusted
/// descriptors and every ID gets a slot in the dense table.
pub const MAX_TILE_COUNT: u32 = 1 << 20;

/// Declared, unvalidated properties of one tile type, as written in a descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TileProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collision_layer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collectable: Option<String>,
    /// Contact damage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Vec<AnimationFrame>>,
}

impl TileProperties {
    pub fn with_breakability(mut self, value: impl Into<String>) -> Self {
        self.breakability = Some(value.into());
        self
    }

    pub fn with_collision_layer(mut self, value: impl Into<String>) -> Self {
        self.collision_layer = Some(value.into());
        self
    }

    pub fn with_collectable(mut self, value: impl Into<String>) -> Self {
        self.collectable = Some(value.into());
        self
    }

    pub fn with_damage(mut self, value: f32) -> Self {
        self.damage = Some(value);
        self
    }

    pub fn with_animation(mut self, frames: impl IntoIterator<Item = AnimationFrame>) -> Self {
        self.animation = Some(frames.into_iter().collect());
        self
    }
}

/// Validated properties of one tile type. Unset fields mean "default".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileDefinition {
    /// `None` means the tile is never subject to breakability logic.
    pub breakability: Option<BreakabilityTier>,
    pub collision_layer: Option<CollisionLayer>,
    /// Presence marks a one-shot pickup.
    pub collectable: Option<CollectableKind>,
    pub contact_damage: Option<f32>,
    pub animation: Option<AnimationClip>,
}

impl TileDefinition {
    pub fn is_destructible(&self) -> bool {
        self.breakability.is_some()
    }

    pub fn is_collectable(&self) -> bool {
        self.collectable.is_some()
    }

    /// Whether instances of this type may carry per-position state.
    pub fn is_stateful(&self) -> bool {
        self.is_destructible() || self.is_collectable()
    }

    /// Contact damage, zero when undeclared.
    pub fn damage(&self) -> f32 {
        self.contact_damage.unwrap_or(0.0)
    }

    /// True when nothing was declared for this type.
    pub fn is_default(&self) -> bool {
        *self == TileDefinition::default()
    }
}

/// Immutable, dense table of tile definitions indexed by [`TileTypeId`].
#[derive(Debug, Clone, PartialEq)]
pub struct TileDefinitionTable {
    definitions: Vec<TileDefinition>,
}

impl TileDefinitionTable {
    /// Start building a table for a tileset with `tile_count` tile types.
    pub fn builder(tile_count: u32) -> TileTableBuilder {
        TileTableBuilder::new(tile_count)
    }

    pub fn tile_count(&self) -> u32 {
        self.definitions.len() as u32
    }

    pub fn contains(&self, tile: TileTypeId) -> bool {
        (tile as usize) < self.definitions.len()
    }

    /// Definition of `tile`. Never fails for an ID inside the table.
    pub fn lookup(&self, tile: TileTypeId) -> Result<&TileDefinition, TileError> {
        self.definitions
            .get(tile as usize)
            .ok_or(TileError::UnknownTileType {
                tile,
                tile_count: self.tile_count(),
            })
    }

    /// Definitions with at least one declared property, in ID order.
    pub fn iter_declared(&self) -> impl Iterator<Item = (TileTypeId, &TileDefinition)> {
        self.definitions
            .iter()
            .enumerate()
            .filter(|(_, def)| !def.is_default())
            .map(|(id, def)| (id as TileTypeId, def))
    }

    /// Animated tile types and their clips, in ID order.
    pub fn animated(&self) -> impl Iterator<Item = (TileTypeId, &AnimationClip)> {
        self.definitions
            .iter()
            .enumerate()
            .filter_map(|(id, def)| def.animation.as_ref().map(|clip| (id as TileTypeId, clip)))
    }
}

/// Collects declared properties and validates them into a [`TileDefinitionTable`].
#[derive(Debug, Clone)]
pub struct TileTableBuilder {
    tile_count: u32,
    case_policy: CasePolicy,
    declared: FxHashMap<TileTypeId, TileProperties>,
}

impl TileTableBuilder {
    pub fn new(tile_count: u32) -> Self {
        Self {
            tile_count,
            case_policy: CasePolicy::default(),
            declared: FxHashMap::default(),
        }
    }

    /// Set how declared enum values are matched.
    pub fn with_case_policy(mut self, case_policy: CasePolicy) -> Self {
        self.case_policy = case_policy;
        self
    }

    /// Declare the properties of `tile`.
    ///
    /// Fails for IDs outside the tileset and for a second definition of the
    /// same ID.
    pub fn define(
        &mut self,
        tile: TileTypeId,
        properties: TileProperties,
    ) -> Result<&mut Self, TileError> {
        if tile >= self.tile_count {
            return Err(TileError::malformed(
                tile,
                format!("tile id outside tileset of {} tiles", self.tile_count),
            ));
        }
        if self.declared.contains_key(&tile) {
            return Err(TileError::malformed(tile, "duplicate definition"));
        }
        self.declared.insert(tile, properties);
        Ok(self)
    }

    /// Validate all declared properties and freeze the table.
    pub fn build(self) -> Result<TileDefinitionTable, TileError> {
        if self.tile_count > MAX_TILE_COUNT {
            return Err(TileError::malformed(
                self.tile_count,
                format!(
                    "tileset declares {} tiles, at most {} are supported",
                    self.tile_count, MAX_TILE_COUNT
                ),
            ));
        }
        let mut definitions = Vec::new();
        definitions
            .try_reserve_exact(self.tile_count as usize)
            .map_err(|err| {
                TileError::malformed(self.tile_count, format!("cannot allocate table: {err}"))
            })?;
        definitions.resize(self.tile_count as usize, TileDefinition::default());

        let mut ids: Vec<TileTypeId> = self.declared.keys().copied().collect();
        ids.sort_unstable();

        let mut normalized = 0usize;
        for tile in ids {
            let Some(properties) = self.declared.get(&tile) else {
                continue;
            };
            let (definition, warnings) = self.validate(tile, properties)?;
            normalized += warnings;
            definitions[tile as usize] = definition;
        }

        let table = TileDefinitionTable { definitions };
        info!(
            "Loaded tileset: {} tile types, {} declared, {} animated, {} normalized values",
            table.tile_count(),
            table.iter_declared().count(),
            table.animated().count(),
            normalized
        );
        Ok(table)
    }

    /// Turn declared strings into typed values. Returns the definition and the
    /// number of values that only matched after normalization.
    fn validate(
        &self,
        tile: TileTypeId,
        properties: &TileProperties,
    ) -> Result<(TileDefinition, usize), TileError> {
        let mut normalized = 0usize;

        let breakability = match properties.breakability.as_deref() {
            Some(raw) => {
                let declared = BreakabilityTier::parse(raw, self.case_policy)
                    .map_err(|reason| TileError::malformed(tile, reason))?;
                Some(accept(tile, "breakability", raw, declared, &mut normalized))
            }
            None => None,
        };

        let collision_layer = match properties.collision_layer.as_deref() {
            Some(raw) => {
                let declared = CollisionLayer::parse(raw, self.case_policy)
                    .map_err(|reason| TileError::malformed(tile, reason))?;
                Some(accept(tile, "collision_layer", raw, declared, &mut normalized))
            }
            None => None,
        };

        let collectable = match properties.collectable.as_deref() {
            Some(raw) => {
                let declared = CollectableKind::parse(raw, self.case_policy)
                    .map_err(|reason| TileError::malformed(tile, reason))?;
                Some(accept(tile, "collectable", raw, declared, &mut normalized))
            }
            None => None,
        };

        let contact_damage = match properties.damage {
            Some(damage) if !damage.is_finite() || damage < 0.0 => {
                return Err(TileError::malformed(
                    tile,
                    format!("contact damage must be a nonnegative number, got {damage}"),
                ));
            }
            other => other,
        };

        let animation = match &properties.animation {
            Some(frames) => {
                if let Some(frame) = frames.iter().find(|f| f.tile >= self.tile_count) {
                    return Err(TileError::malformed(
                        tile,
                        format!(
                            "animation frame references tile {} outside tileset of {} tiles",
                            frame.tile, self.tile_count
                        ),
                    ));
                }
                let clip = AnimationClip::new(frames.iter().copied())
                    .map_err(|err| TileError::malformed(tile, err.to_string()))?;
                Some(clip)
            }
            None => None,
        };

        Ok((
            TileDefinition {
                breakability,
                collision_layer,
                collectable,
                contact_damage,
                animation,
            },
            normalized,
        ))
    }
}

fn accept<T>(
    tile: TileTypeId,
    property: &str,
    raw: &str,
    declared: Declared<T>,
    normalized: &mut usize,
) -> T {
    if declared.normalized {
        warn!(
            "Tile {}: {} value {:?} matched only after case normalization",
            tile, property, raw
        );
        *normalized += 1;
    }
    declared.value
}

/// Shared, read-only tile definitions for the ECS world.
#[derive(Resource, Debug, Clone)]
pub struct TileDefinitions(pub Arc<TileDefinitionTable>);

impl TileDefinitions {
    pub fn new(table: TileDefinitionTable) -> Self {
        Self(Arc::new(table))
    }
}

impl Deref for TileDefinitions {
    type Target = TileDefinitionTable;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(
        tile_count: u32,
        defs: Vec<(TileTypeId, TileProperties)>,
    ) -> Result<TileDefinitionTable, TileError> {
        let mut builder = TileDefinitionTable::builder(tile_count);
        for (id, props) in defs {
            builder.define(id, props)?;
        }
        builder.build()
    }

    fn reason(err: TileError) -> String {
        match err {
            TileError::MalformedDefinition { reason, .. } => reason,
            other => panic!("expected MalformedDefinition, got {other:?}"),
        }
    }

    #[test]
    fn test_undeclared_ids_are_default() {
        let table = build(16, vec![]).unwrap();
        assert_eq!(table.tile_count(), 16);
        for id in 0..16 {
            assert!(table.lookup(id).unwrap().is_default());
        }
        assert_eq!(table.iter_declared().count(), 0);
    }

    #[test]
    fn test_oversized_tileset_rejected_without_allocating() {
        let err = build(u32::MAX, vec![]).unwrap_err();
        assert!(matches!(
            err,
            TileError::MalformedDefinition { tile: u32::MAX, .. }
        ));
        assert!(reason(err).contains("at most"));
        assert!(build(MAX_TILE_COUNT + 1, vec![]).is_err());
    }

    #[test]
    fn test_lookup_out_of_range_is_unknown() {
        let table = build(16, vec![]).unwrap();
        assert_eq!(
            table.lookup(16),
            Err(TileError::UnknownTileType {
                tile: 16,
                tile_count: 16
            })
        );
    }

    #[test]
    fn test_declared_properties_are_typed() {
        let table = build(
            200,
            vec![
                (6, TileProperties::default().with_breakability("Solid")),
                (26, TileProperties::default().with_collision_layer("Player")),
                (29, TileProperties::default().with_collectable("missile_tank")),
                (128, TileProperties::default().with_damage(10.0)),
                (
                    130,
                    TileProperties::default().with_animation([
                        AnimationFrame::new(130, 250),
                        AnimationFrame::new(131, 250),
                    ]),
                ),
            ],
        )
        .unwrap();

        assert_eq!(
            table.lookup(6).unwrap().breakability,
            Some(BreakabilityTier::Solid)
        );
        assert_eq!(
            table.lookup(26).unwrap().collision_layer,
            Some(CollisionLayer::Player)
        );
        assert_eq!(
            table.lookup(29).unwrap().collectable,
            Some(CollectableKind::MissileTank)
        );
        assert_eq!(table.lookup(128).unwrap().contact_damage, Some(10.0));
        assert_eq!(table.lookup(128).unwrap().damage(), 10.0);
        assert_eq!(table.lookup(127).unwrap().damage(), 0.0);
        assert_eq!(table.animated().map(|(id, _)| id).collect::<Vec<_>>(), vec![130]);
        assert_eq!(table.iter_declared().count(), 5);
    }

    #[test]
    fn test_duplicate_definition_rejected() {
        let err = build(
            16,
            vec![
                (7, TileProperties::default().with_breakability("Soft")),
                (7, TileProperties::default().with_breakability("Strong")),
            ],
        )
        .unwrap_err();
        assert_eq!(reason(err), "duplicate definition");
    }

    #[test]
    fn test_definition_outside_range_rejected() {
        let err = build(16, vec![(16, TileProperties::default())]).unwrap_err();
        assert!(matches!(err, TileError::MalformedDefinition { tile: 16, .. }));
    }

    #[test]
    fn test_dangling_frame_reference_rejected() {
        let err = build(
            1024,
            vec![(
                98,
                TileProperties::default().with_animation([
                    AnimationFrame::new(98, 100),
                    AnimationFrame::new(99999, 100),
                ]),
            )],
        )
        .unwrap_err();
        assert!(reason(err).contains("99999"));
    }

    #[test]
    fn test_empty_and_zero_length_clips_rejected() {
        let empty = build(
            16,
            vec![(1, TileProperties::default().with_animation(Vec::<AnimationFrame>::new()))],
        );
        assert!(empty.is_err());

        let zero = build(
            16,
            vec![(1, TileProperties::default().with_animation([AnimationFrame::new(1, 0)]))],
        );
        assert!(zero.is_err());
    }

    #[test]
    fn test_invalid_enum_values_rejected() {
        let cases = [
            TileProperties::default().with_breakability("Glass"),
            TileProperties::default().with_collision_layer("Ghost"),
            TileProperties::default().with_collectable("none"),
        ];
        for props in cases {
            assert!(build(16, vec![(1, props)]).is_err());
        }
    }

    #[test]
    fn test_negative_or_nan_damage_rejected() {
        assert!(build(16, vec![(1, TileProperties::default().with_damage(-1.0))]).is_err());
        assert!(build(16, vec![(1, TileProperties::default().with_damage(f32::NAN))]).is_err());
        assert!(build(16, vec![(1, TileProperties::default().with_damage(0.0))]).is_ok());
    }

    #[test]
    fn test_lowercase_tier_normalized_or_strict() {
        let props = TileProperties::default().with_breakability("brittle");

        let table = build(16, vec![(3, props.clone())]).unwrap();
        assert_eq!(
            table.lookup(3).unwrap().breakability,
            Some(BreakabilityTier::Brittle)
        );

        let mut strict = TileDefinitionTable::builder(16).with_case_policy(CasePolicy::Strict);
        strict.define(3, props).unwrap();
        assert!(strict.build().is_err());
    }

    #[test]
    fn test_stateful_flags() {
        let def = TileDefinition {
            collectable: Some(CollectableKind::Health),
            ..Default::default()
        };
        assert!(def.is_stateful());
        assert!(!def.is_destructible());
        assert!(!TileDefinition::default().is_stateful());
    }

    #[test]
    fn test_shared_resource_derefs_to_table() {
        let defs = TileDefinitions::new(build(8, vec![]).unwrap());
        let clone = defs.clone();
        assert!(Arc::ptr_eq(&defs.0, &clone.0));
        assert_eq!(clone.tile_count(), 8);
    }
}

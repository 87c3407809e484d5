//! Descriptor loading tests against the shipped tileset and randomly
//! generated ones.

use std::path::PathBuf;

use tilestate::components::animationclip::AnimationFrame;
use tilestate::components::tileattributes::{
    BreakabilityTier, CasePolicy, CollectableKind, CollisionLayer, TileTypeId,
};
use tilestate::error::{DescriptorError, TileError};
use tilestate::resources::tiledefinitions::TileProperties;
use tilestate::resources::tilesetdescriptor::{TileDescriptor, TilesetDescriptor};

fn shipped_tileset() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/tileset/tileset.json")
}

fn descriptor(tile_count: u32, tiles: Vec<(TileTypeId, TileProperties)>) -> TilesetDescriptor {
    TilesetDescriptor {
        name: None,
        tile_count,
        tiles: tiles
            .into_iter()
            .map(|(id, properties)| TileDescriptor { id, properties })
            .collect(),
    }
}

fn assert_malformed(result: Result<impl std::fmt::Debug, DescriptorError>, tile: TileTypeId) {
    match result {
        Err(DescriptorError::Tile(TileError::MalformedDefinition { tile: got, .. })) => {
            assert_eq!(got, tile)
        }
        other => panic!("expected malformed definition for tile {tile}, got {other:?}"),
    }
}

#[test]
fn shipped_tileset_loads() {
    let table = TilesetDescriptor::load_from_file(shipped_tileset())
        .unwrap()
        .build_table(CasePolicy::Normalize)
        .unwrap();

    assert_eq!(table.tile_count(), 1024);
    assert_eq!(
        table.lookup(6).unwrap().breakability,
        Some(BreakabilityTier::Solid)
    );
    assert_eq!(
        table.lookup(226).unwrap().breakability,
        Some(BreakabilityTier::Brittle)
    );
    // Lowercase in the source data, normalized on load.
    assert_eq!(
        table.lookup(421).unwrap().breakability,
        Some(BreakabilityTier::Brittle)
    );
    assert_eq!(
        table.lookup(26).unwrap().collision_layer,
        Some(CollisionLayer::Player)
    );
    assert_eq!(
        table.lookup(27).unwrap().collision_layer,
        Some(CollisionLayer::Creature)
    );
    assert_eq!(
        table.lookup(29).unwrap().collectable,
        Some(CollectableKind::MissileTank)
    );
    assert_eq!(table.lookup(128).unwrap().damage(), 10.0);
    assert_eq!(table.animated().count(), 4);

    let water = table.lookup(355).unwrap().animation.as_ref().unwrap();
    assert_eq!(water.total_duration_ms(), 870);
    assert_eq!(water.current_frame(320), 357);

    // Undeclared IDs resolve to the all-default definition.
    assert!(table.lookup(1023).unwrap().is_default());
    assert!(table.lookup(1024).is_err());
}

#[test]
fn shipped_tileset_rejected_under_strict_case() {
    let result = TilesetDescriptor::load_from_file(shipped_tileset())
        .unwrap()
        .build_table(CasePolicy::Strict);
    assert_malformed(result, 421);
}

#[test]
fn duplicate_definition_rejected() {
    let result = descriptor(
        1024,
        vec![
            (7, TileProperties::default().with_breakability("Soft")),
            (8, TileProperties::default().with_breakability("Soft")),
            (7, TileProperties::default().with_collectable("health")),
        ],
    )
    .build_table(CasePolicy::Normalize);
    assert_malformed(result, 7);
}

#[test]
fn dangling_animation_frame_rejected() {
    let result = descriptor(
        1024,
        vec![(
            98,
            TileProperties::default().with_animation([
                AnimationFrame::new(98, 100),
                AnimationFrame::new(99999, 100),
            ]),
        )],
    )
    .build_table(CasePolicy::Normalize);
    assert_malformed(result, 98);
}

#[test]
fn invalid_values_rejected() {
    let cases = [
        TileProperties::default().with_breakability("Mushy"),
        TileProperties::default().with_collision_layer("Ghost"),
        TileProperties::default().with_collectable("none"),
        TileProperties::default().with_damage(-1.0),
        TileProperties::default().with_animation([AnimationFrame::new(3, 0)]),
        TileProperties::default().with_animation(Vec::<AnimationFrame>::new()),
    ];
    for properties in cases {
        let result = descriptor(16, vec![(3, properties)]).build_table(CasePolicy::Normalize);
        assert_malformed(result, 3);
    }
}

#[test]
fn oversized_tile_count_is_malformed_not_fatal() {
    let result = TilesetDescriptor::from_json_str(r#"{"tile_count": 4294967295, "tiles": []}"#)
        .unwrap()
        .build_table(CasePolicy::Normalize);
    assert_malformed(result, u32::MAX);
}

#[test]
fn unknown_property_value_types_fail_to_parse() {
    let err = TilesetDescriptor::from_json_str(
        r#"{"tile_count": 4, "tiles": [{"id": 1, "damage": "lots"}]}"#,
    )
    .unwrap_err();
    assert!(matches!(err, DescriptorError::Json(_)));
}

const TIERS: [&str; 4] = ["Brittle", "Soft", "Strong", "Solid"];
const LAYERS: [&str; 4] = ["Terrain", "Player", "Creature", "Passable"];
const KINDS: [&str; 5] = ["health", "power", "missile_tank", "ice_beam", "high_jump"];

fn random_properties(rng: &mut fastrand::Rng, tile_count: u32) -> TileProperties {
    let mut properties = TileProperties::default();
    if rng.bool() {
        properties = properties.with_breakability(TIERS[rng.usize(..TIERS.len())]);
    }
    if rng.u8(..4) == 0 {
        properties = properties.with_collision_layer(LAYERS[rng.usize(..LAYERS.len())]);
    }
    if rng.u8(..4) == 0 {
        properties = properties.with_collectable(KINDS[rng.usize(..KINDS.len())]);
    }
    if rng.u8(..4) == 0 {
        properties = properties.with_damage(rng.u32(0..100) as f32 / 4.0);
    }
    if rng.u8(..4) == 0 {
        let frames: Vec<_> = (0..rng.usize(1..6))
            .map(|_| AnimationFrame::new(rng.u32(..tile_count), rng.u32(1..400)))
            .collect();
        properties = properties.with_animation(frames);
    }
    properties
}

#[test]
fn random_descriptors_round_trip_through_json() {
    for seed in 0..32u64 {
        let mut rng = fastrand::Rng::with_seed(seed);
        let tile_count = rng.u32(1..300);

        let mut ids: Vec<TileTypeId> = (0..tile_count).collect();
        rng.shuffle(&mut ids);
        ids.truncate(rng.usize(..=ids.len().min(40)));

        let tiles: Vec<_> = ids
            .iter()
            .map(|id| (*id, random_properties(&mut rng, tile_count)))
            .collect();
        let original = descriptor(tile_count, tiles.clone());

        let json = original.to_json_string().unwrap();
        let parsed = TilesetDescriptor::from_json_str(&json).unwrap();
        assert_eq!(parsed, original, "seed {seed}");

        let table = parsed.build_table(CasePolicy::Strict).unwrap();
        assert_eq!(table.tile_count(), tile_count);

        for tile in 0..tile_count {
            let definition = table.lookup(tile).unwrap();
            let Some((_, declared)) = tiles.iter().find(|(id, _)| *id == tile) else {
                assert!(definition.is_default(), "seed {seed} tile {tile}");
                continue;
            };
            assert_eq!(
                definition.breakability.map(|t| t.name()),
                declared.breakability.as_deref(),
                "seed {seed} tile {tile}"
            );
            assert_eq!(
                definition.collision_layer.map(|l| l.name()),
                declared.collision_layer.as_deref()
            );
            assert_eq!(
                definition.collectable.map(|k| k.name()),
                declared.collectable.as_deref()
            );
            assert_eq!(definition.contact_damage, declared.damage);
            assert_eq!(
                definition.animation.as_ref().map(|clip| clip.frames().to_vec()),
                declared.animation
            );
        }
    }
}

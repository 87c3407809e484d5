//! World setup and the per-tick schedule.
//!
//! [`install`] puts every tile resource and message queue into a world;
//! [`tick_schedule`] builds the ordered schedule the loop driver runs once per
//! tick, after advancing the clock with
//! [`advance_sim_clock`](crate::systems::time::advance_sim_clock):
//!
//! 1. advance message queues
//! 2. drain the impact bridge
//! 3. apply impacts, write break events
//! 4. apply pickups, write collect events
//! 5. publish render frames
//!
//! The chain is strict, so impacts are always applied in the order they were
//! queued and consumers reading after the schedule see this tick's events.

use bevy_ecs::prelude::*;
use crossbeam_channel::Sender;

use crate::events::tileimpact::{BreakEvent, TileImpact};
use crate::events::tilepickup::{CollectEvent, TilePickup};
use crate::resources::engineconfig::EngineConfig;
use crate::resources::impactbridge::setup_impact_bridge;
use crate::resources::renderframes::RenderFrames;
use crate::resources::simclock::SimClock;
use crate::resources::tiledefinitions::{TileDefinitionTable, TileDefinitions};
use crate::resources::tilegrid::TileGrid;
use crate::resources::tileinstances::TileInstanceStore;
use crate::systems::animation::publish_render_frames;
use crate::systems::impacts::{poll_impact_bridge, process_tile_impacts};
use crate::systems::messages::update_messages;
use crate::systems::pickups::process_tile_pickups;

/// Insert the tile resources and message queues into `world`.
///
/// The grid starts empty; fill it with
/// [`TileGrid::insert_csv_layer`] or [`TileGrid::place`] at level load.
/// Returns a sender for impacts produced on other threads.
pub fn install(
    world: &mut World,
    table: TileDefinitionTable,
    config: &EngineConfig,
) -> Sender<TileImpact> {
    world.insert_resource(TileDefinitions::new(table));
    world.insert_resource(TileInstanceStore::new());
    world.insert_resource(SimClock::new(config.tick_ms));
    world.insert_resource(RenderFrames::default());
    world.insert_resource(TileGrid::new());
    world.insert_resource(config.clone());

    world.init_resource::<Messages<TilePickup>>();
    world.init_resource::<Messages<BreakEvent>>();
    world.init_resource::<Messages<CollectEvent>>();
    setup_impact_bridge(world)
}

/// Build the ordered per-tick schedule.
pub fn tick_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            (
                update_messages::<TileImpact>,
                update_messages::<TilePickup>,
                update_messages::<BreakEvent>,
                update_messages::<CollectEvent>,
            )
                .chain(),
            poll_impact_bridge,
            process_tile_impacts,
            process_tile_pickups,
            publish_render_frames,
        )
            .chain(),
    );
    schedule
}

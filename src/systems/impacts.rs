//! Impact processing.
//!
//! - [`poll_impact_bridge`] drains impacts sent from other threads through the
//!   [`ImpactBridge`] into the ECS message queue, in receive order.
//! - [`process_tile_impacts`] applies queued [`TileImpact`] messages to the
//!   [`TileInstanceStore`] in message order and writes a [`BreakEvent`] for
//!   each tile that broke.
//!
//! Both run on the simulation schedule, which is the only writer of the
//! instance store. Two impacts crossing the same threshold in one tick are
//! therefore applied one after the other and only the first breaks the tile.

use bevy_ecs::prelude::*;
use log::error;

use crate::events::tileimpact::{BreakEvent, TileImpact};
use crate::resources::impactbridge::ImpactBridge;
use crate::resources::tiledefinitions::TileDefinitions;
use crate::resources::tileinstances::TileInstanceStore;

/// Drain pending impacts from the bridge channel.
///
/// Does nothing when no bridge was set up.
pub fn poll_impact_bridge(
    bridge: Option<Res<ImpactBridge>>,
    mut writer: MessageWriter<TileImpact>,
) {
    if let Some(bridge) = bridge {
        writer.write_batch(bridge.rx.try_iter());
    }
}

/// Apply impacts to the instance store.
///
/// Impacts naming an unknown tile type are logged and dropped without
/// touching the store.
pub fn process_tile_impacts(
    mut reader: MessageReader<TileImpact>,
    definitions: Res<TileDefinitions>,
    mut instances: ResMut<TileInstanceStore>,
    mut breaks: MessageWriter<BreakEvent>,
) {
    for impact in reader.read() {
        match instances.record_impact(
            &definitions,
            impact.position,
            impact.tile_type,
            impact.damage,
        ) {
            Ok(Some(event)) => {
                breaks.write(event);
            }
            Ok(None) => {}
            Err(err) => error!("Dropping impact at {:?}: {}", impact.position, err),
        }
    }
}

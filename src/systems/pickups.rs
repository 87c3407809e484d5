//! Pickup processing.
//!
//! [`process_tile_pickups`] marks collectable tiles as collected when the
//! player overlaps them and writes one [`CollectEvent`] per tile, the first
//! time only. The inventory collaborator reads those events.

use bevy_ecs::prelude::*;
use log::error;

use crate::events::tilepickup::{CollectEvent, TilePickup};
use crate::resources::tiledefinitions::TileDefinitions;
use crate::resources::tileinstances::TileInstanceStore;

/// Apply pickups to the instance store in message order.
pub fn process_tile_pickups(
    mut reader: MessageReader<TilePickup>,
    definitions: Res<TileDefinitions>,
    mut instances: ResMut<TileInstanceStore>,
    mut collected: MessageWriter<CollectEvent>,
) {
    for pickup in reader.read() {
        match instances.collect(&definitions, pickup.position, pickup.tile_type) {
            Ok(Some(event)) => {
                collected.write(event);
            }
            Ok(None) => {}
            Err(err) => error!("Dropping pickup at {:?}: {}", pickup.position, err),
        }
    }
}

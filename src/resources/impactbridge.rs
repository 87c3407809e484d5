//! Channel bridge for impacts produced outside the simulation thread.
//!
//! Physics or combat code running on other threads cannot touch the ECS
//! world. They send [`TileImpact`] values through a cloned [`Sender`]; the
//! [`poll_impact_bridge`](crate::systems::impacts::poll_impact_bridge) system
//! drains the channel once per tick, in receive order, into the
//! `Messages<TileImpact>` queue. The instance store itself stays owned by the
//! schedule, so every break is decided exactly once.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::events::tileimpact::TileImpact;

/// Shared bridge between impact producers and the ECS world.
#[derive(Resource)]
pub struct ImpactBridge {
    /// Sender kept so more producers can be handed out later.
    pub tx: Sender<TileImpact>,
    /// Receiver drained by the simulation schedule.
    pub rx: Receiver<TileImpact>,
}

impl ImpactBridge {
    /// New sender for a producer thread.
    pub fn sender(&self) -> Sender<TileImpact> {
        self.tx.clone()
    }
}

/// Create the impact channel and register the bridge resource.
///
/// Also initializes `Messages<TileImpact>` if missing. Returns a sender for
/// the caller's first producer.
pub fn setup_impact_bridge(world: &mut World) -> Sender<TileImpact> {
    let (tx, rx) = unbounded::<TileImpact>();
    let sender = tx.clone();
    world.insert_resource(ImpactBridge { tx, rx });
    world.init_resource::<Messages<TileImpact>>();
    sender
}

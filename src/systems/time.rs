//! Clock update.
//!
//! Advances the shared [`SimClock`](crate::resources::simclock::SimClock)
//! resource. Called by the loop driver before each schedule run so every
//! system in the tick sees the same clock value.
use bevy_ecs::prelude::*;

use crate::resources::simclock::SimClock;

/// Advance the simulation clock by `ticks` whole ticks.
pub fn advance_sim_clock(world: &mut World, ticks: u64) {
    let mut clock = world.resource_mut::<SimClock>();
    clock.tick = clock.tick.saturating_add(ticks);
}

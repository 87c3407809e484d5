//! Message queue maintenance.
//!
//! Bevy ECS' [`Messages`] API requires calling `update()` once per tick so
//! that old messages are dropped and readers see a consistent window. The
//! engine runs [`update_messages`] for each of its message types at the start
//! of the tick, before anything writes.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::*;

/// Advance the ECS message queue for `M`.
pub fn update_messages<M: Message>(mut messages: ResMut<Messages<M>>) {
    messages.update();
}

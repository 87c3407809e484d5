//! Tile attribute and state engine.
//!
//! Loads a tileset descriptor into an immutable definition table, tracks
//! per-position break and pickup state, cycles animated tiles from a shared
//! clock, and answers "what is this tile right now" for rendering, collision
//! and combat. Exposed both as plain types and as `bevy_ecs` resources,
//! messages and systems.

pub mod components;
pub mod engine;
pub mod error;
pub mod events;
pub mod resources;
pub mod systems;

//! Tile-level data types.
//!
//! Plain value types shared by the definition table, the instance store and
//! the resolver. `TilePosition` doubles as an ECS component for entities that
//! mirror placed tiles.
//!
//! Submodules overview:
//! - [`animationclip`] – looping frame sequences and frame lookup by elapsed time
//! - [`breakstate`] – intact/broken state machine for destructible instances
//! - [`tileattributes`] – breakability tiers, collision layers, collectable kinds
//! - [`tileposition`] – layer plus grid cell of a placed tile

pub mod animationclip;
pub mod breakstate;
pub mod tileattributes;
pub mod tileposition;

//! Engine systems.
//!
//! This module groups the ECS systems that advance the tile simulation and
//! the read-side resolver used by other systems.
//!
//! Submodules overview
//! - [`animation`] – publish the current frame of every animated tile type
//! - [`impacts`] – drain the impact bridge and apply impacts to instance state
//! - [`messages`] – advance message queues once per tick
//! - [`pickups`] – apply pickups and emit collect events
//! - [`resolver`] – combine definitions and instance state into effective tiles
//! - [`time`] – advance the simulation clock

pub mod animation;
pub mod impacts;
pub mod messages;
pub mod pickups;
pub mod resolver;
pub mod time;

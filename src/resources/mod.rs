//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: the frozen tile definitions, the
//! mutable instance state, the level grid and timing. Each submodule
//! documents the semantics and intended usage of its resource(s).
//!
//! Overview
//! - `engineconfig` – INI configuration: tick length, descriptor path, case policy
//! - `impactbridge` – channel that carries impacts from other threads into the world
//! - `renderframes` – per-tick snapshot of the current frame of each animated type
//! - `simclock` – simulation tick counter shared by every animated tile
//! - `tiledefinitions` – immutable per-type definition table and its builder
//! - `tilegrid` – level grid of placed tile types
//! - `tileinstances` – sparse per-position break/collect state
//! - `tilesetdescriptor` – JSON form of a tileset, loaded into a definition table
pub mod engineconfig;
pub mod impactbridge;
pub mod renderframes;
pub mod simclock;
pub mod tiledefinitions;
pub mod tilegrid;
pub mod tileinstances;
pub mod tilesetdescriptor;

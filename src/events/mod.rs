//! Message types exchanged between the tile engine and its collaborators.
//!
//! Messages keep the engine decoupled from physics, combat, rendering, audio
//! and inventory: those write requests in and read outcomes back.
//!
//! Submodules:
//! - [`tileimpact`] – impacts on tiles and the resulting break events
//! - [`tilepickup`] – collector overlaps and the resulting collect events
pub mod tileimpact;
pub mod tilepickup;

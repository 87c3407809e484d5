use bevy_ecs::prelude::Resource;

/// Default simulation tick length (~60 ticks per second).
pub const DEFAULT_TICK_MS: u32 = 16;

/// Process-wide simulation clock.
///
/// All animated tiles read their frame from this single counter, so two
/// instances of the same animated type always show the same frame.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimClock {
    /// Ticks advanced since level start.
    pub tick: u64,
    /// Length of one tick in milliseconds.
    pub tick_ms: u32,
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_MS)
    }
}

impl SimClock {
    pub fn new(tick_ms: u32) -> Self {
        SimClock { tick: 0, tick_ms }
    }

    /// Simulated time since level start.
    pub fn elapsed_ms(&self) -> u64 {
        self.tick.saturating_mul(u64::from(self.tick_ms))
    }
}

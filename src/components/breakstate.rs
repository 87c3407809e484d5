//! Breakability state machine for a single destructible tile instance.
//!
//! `Intact(hits_taken)` moves to `Broken` once the counted hits reach the
//! tier's threshold. `Broken` is terminal: further impacts are no-ops.
//! Impacts with zero, negative or non-finite damage are not counted.

use serde::{Deserialize, Serialize};

use crate::components::tileattributes::BreakabilityTier;

/// Per-instance break state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakState {
    Intact { hits_taken: u32 },
    Broken,
}

impl Default for BreakState {
    fn default() -> Self {
        BreakState::Intact { hits_taken: 0 }
    }
}

/// What a single impact did to an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactOutcome {
    /// Damage was not positive; nothing counted.
    Ignored,
    /// Hit counted, tile still intact.
    Absorbed,
    /// This impact broke the tile.
    Broke,
    /// The tile was already broken.
    AlreadyBroken,
}

impl BreakState {
    pub fn is_broken(&self) -> bool {
        matches!(self, BreakState::Broken)
    }

    /// Counted hits so far, `None` once broken.
    pub fn hits_taken(&self) -> Option<u32> {
        match self {
            BreakState::Intact { hits_taken } => Some(*hits_taken),
            BreakState::Broken => None,
        }
    }

    /// Apply one impact of magnitude `damage` to a tile of `tier`.
    pub fn apply_impact(&mut self, tier: BreakabilityTier, damage: f32) -> ImpactOutcome {
        let BreakState::Intact { hits_taken } = *self else {
            return ImpactOutcome::AlreadyBroken;
        };
        // NaN fails this comparison too
        if !(damage > 0.0) {
            return ImpactOutcome::Ignored;
        }

        let hits_taken = hits_taken.saturating_add(1);
        match tier.hit_threshold() {
            Some(threshold) if hits_taken >= threshold => {
                *self = BreakState::Broken;
                ImpactOutcome::Broke
            }
            _ => {
                *self = BreakState::Intact { hits_taken };
                ImpactOutcome::Absorbed
            }
        }
    }
}

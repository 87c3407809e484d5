//! Looping tile animation clips.
//!
//! A clip is an ordered list of frames, each naming the tile type to display
//! and how long to display it. Playback position is never stored: it is
//! derived from an elapsed time in milliseconds, so every tile of the same
//! animated type shows the same frame at the same tick.
//!
//! # Related
//!
//! - [`crate::resources::tiledefinitions::TileDefinition`] – owns the clip of a tile type
//! - [`crate::systems::animation::publish_render_frames`] – publishes current frames each tick

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::components::tileattributes::TileTypeId;
use crate::error::ClipError;

/// One frame of a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationFrame {
    /// Tile type displayed during this frame.
    pub tile: TileTypeId,
    /// Display time in milliseconds. Zero-length frames are never shown.
    pub duration_ms: u32,
}

impl AnimationFrame {
    pub fn new(tile: TileTypeId, duration_ms: u32) -> Self {
        Self { tile, duration_ms }
    }
}

/// Immutable looping frame sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationClip {
    frames: SmallVec<[AnimationFrame; 8]>,
    total_ms: u64,
}

impl AnimationClip {
    /// Build a clip, rejecting empty clips and clips with no playable time.
    pub fn new(frames: impl IntoIterator<Item = AnimationFrame>) -> Result<Self, ClipError> {
        let frames: SmallVec<[AnimationFrame; 8]> = frames.into_iter().collect();
        if frames.is_empty() {
            return Err(ClipError::Empty);
        }
        let total_ms: u64 = frames.iter().map(|f| u64::from(f.duration_ms)).sum();
        if total_ms == 0 {
            return Err(ClipError::ZeroDuration);
        }
        Ok(Self { frames, total_ms })
    }

    pub fn frames(&self) -> &[AnimationFrame] {
        &self.frames
    }

    /// Sum of all frame durations.
    pub fn total_duration_ms(&self) -> u64 {
        self.total_ms
    }

    /// Index of the frame showing at `elapsed_ms`.
    pub fn frame_index(&self, elapsed_ms: u64) -> usize {
        let position = elapsed_ms % self.total_ms;
        let mut frame_end = 0u64;
        for (index, frame) in self.frames.iter().enumerate() {
            frame_end += u64::from(frame.duration_ms);
            if position < frame_end {
                return index;
            }
        }
        // position < total_ms, so the loop always returns
        self.frames.len() - 1
    }

    /// Tile type showing at `elapsed_ms`.
    pub fn current_frame(&self, elapsed_ms: u64) -> TileTypeId {
        self.frames[self.frame_index(elapsed_ms)].tile
    }
}

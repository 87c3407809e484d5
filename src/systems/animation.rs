//! Animated tile frames.
//!
//! [`publish_render_frames`] evaluates every animated tile type's clip at the
//! current [`SimClock`] value and stores the results in [`RenderFrames`].
//! Frames are derived from the clock, never stepped, so skipping ticks or
//! replaying from a saved tick count yields the same frames.
//!
//! # Related
//!
//! - [`crate::components::animationclip::AnimationClip`] – frame lookup by elapsed time
//! - [`crate::resources::renderframes::RenderFrames`] – the published snapshot

use bevy_ecs::prelude::*;

use crate::resources::renderframes::RenderFrames;
use crate::resources::simclock::SimClock;
use crate::resources::tiledefinitions::TileDefinitions;

/// Publish the current frame of each animated tile type.
pub fn publish_render_frames(
    definitions: Res<TileDefinitions>,
    clock: Res<SimClock>,
    mut frames: ResMut<RenderFrames>,
) {
    let elapsed_ms = clock.elapsed_ms();
    frames.elapsed_ms = elapsed_ms;
    frames.frames.clear();
    frames.frames.extend(
        definitions
            .animated()
            .map(|(tile, clip)| (tile, clip.current_frame(elapsed_ms))),
    );
}

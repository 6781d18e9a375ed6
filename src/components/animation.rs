//! Time-driven frame sequences.
//!
//! An [`Animation`] owns an ordered list of frames (texture handles) and a
//! fixed per-frame interval. Calling [`Animation::get_frame`] accumulates the
//! elapsed time and steps forward by every whole interval that fits in it.
//!
//! # Related
//!
//! - [`crate::components::stateanimator::StateAnimator`] – picks which
//!   animation plays for a given entity state
//! - [`crate::loader`] – builds animations from numbered image files

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Ordered sequence of frames advanced by accumulated time.
///
/// `T` is the texture handle returned for each frame. The engine uses texture
/// keys into [`TextureStore`](crate::resources::texturestore::TextureStore),
/// tests use plain strings or integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation<T> {
    frames: SmallVec<[T; 8]>,
    /// Seconds each frame stays on screen.
    interval: f32,
    /// Whether playback restarts after the last frame.
    looped: bool,
    frame_index: usize,
    elapsed_time: f32,
}

impl<T> Animation<T> {
    /// Create a looping animation. Returns `None` when `frames` is empty.
    ///
    /// An `interval` of zero (or less) never advances: the first frame is
    /// shown forever.
    pub fn new(frames: impl IntoIterator<Item = T>, interval: f32) -> Option<Self> {
        let frames: SmallVec<[T; 8]> = frames.into_iter().collect();
        if frames.is_empty() {
            return None;
        }
        Some(Self {
            frames,
            interval,
            looped: true,
            frame_index: 0,
            elapsed_time: 0.0,
        })
    }

    /// Builder-style setter for the loop policy.
    pub fn with_looped(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }

    /// Advance playback by `dt` seconds and return the current frame.
    pub fn get_frame(&mut self, dt: f32) -> &T {
        self.advance(dt);
        &self.frames[self.frame_index]
    }

    /// Rewind to the first frame and discard accumulated time.
    pub fn reset(&mut self) {
        self.frame_index = 0;
        self.elapsed_time = 0.0;
    }

    /// Frame shown without advancing.
    pub fn current(&self) -> &T {
        &self.frames[self.frame_index]
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed_time
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn looped(&self) -> bool {
        self.looped
    }

    pub fn frames(&self) -> &[T] {
        &self.frames
    }

    /// True for a non-looping animation resting on its last frame.
    pub fn is_finished(&self) -> bool {
        !self.looped && self.frame_index + 1 == self.frames.len()
    }

    fn advance(&mut self, dt: f32) {
        if self.interval <= 0.0 || self.is_finished() {
            return;
        }
        let last = self.frames.len() - 1;
        self.elapsed_time += dt;
        if !self.elapsed_time.is_finite() {
            // No phase left to keep: loops hold their frame, one-shots end
            self.elapsed_time = 0.0;
            if !self.looped {
                self.frame_index = last;
            }
            return;
        }
        if self.elapsed_time < self.interval {
            return;
        }

        let steps = (self.elapsed_time / self.interval).floor();
        self.elapsed_time -= steps * self.interval;
        if !(0.0..self.interval).contains(&self.elapsed_time) {
            self.elapsed_time = 0.0;
        }

        if self.looped {
            let steps = (steps % self.frames.len() as f32) as usize;
            self.frame_index = (self.frame_index + steps) % self.frames.len();
        } else {
            let steps = steps.min(last as f32) as usize;
            self.frame_index = self.frame_index.saturating_add(steps).min(last);
            if self.frame_index == last {
                self.elapsed_time = 0.0;
            }
        }
    }
}

//! Maps raw page scroll into a normalized progress value and a
//! (section, blend) pair used by the pose interpolator.

use crate::constants::SECTION_COUNT;

/// Snapshot of where the reader is in the scroll narrative.
///
/// `section` is in `[0, SECTION_COUNT - 2]` while blending, and exactly
/// `SECTION_COUNT - 1` at `progress == 1.0`, where no blend is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub progress: f32,
    pub section: usize,
    pub blend: f32,
}

impl ScrollState {
    /// Build from a raw scroll offset and the scrollable range, both in
    /// pixels. A zero or negative range (page shorter than the viewport)
    /// yields the hero state instead of propagating NaN into transforms.
    pub fn from_offset(offset_px: f32, range_px: f32) -> Self {
        if !(range_px > 0.0) {
            return Self::default();
        }
        Self::from_progress(offset_px / range_px)
    }

    /// Build from an already-normalized progress value. Non-finite input
    /// collapses to the hero state; finite input is clamped to [0, 1].
    pub fn from_progress(progress: f32) -> Self {
        if !progress.is_finite() {
            return Self::default();
        }
        let progress = progress.clamp(0.0, 1.0);
        let scaled = progress * (SECTION_COUNT - 1) as f32;
        let section = (scaled.floor() as usize).min(SECTION_COUNT - 1);
        let blend = scaled - section as f32;
        Self {
            progress,
            section,
            blend,
        }
    }

    /// True once the last keyframe is authoritative and blending stops.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.section + 1 >= SECTION_COUNT
    }
}

/// Cubic ease-in-out. Identity at 0 and 1, monotonic on [0, 1].
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

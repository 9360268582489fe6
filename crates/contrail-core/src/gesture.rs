//! Turns raw per-tick hand landmarks into smoothed position, rotation and
//! zoom signals. Exponential-moving-average semantics: signals persist
//! across ticks and only move toward the latest reading, never snap.

use crate::constants::{
    GESTURE_POSITION_ALPHA, GESTURE_ROTATION_ALPHA, GESTURE_ZOOM_ALPHA, OPENNESS_DIST_RANGE,
    OPENNESS_MIN_DIST, ZOOM_MIN, ZOOM_SPAN,
};
use glam::Vec3;

pub const LANDMARK_COUNT: usize = 21;

// MediaPipe-style hand landmark indices, the subset the filter reads.
pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP: usize = 16;
pub const PINKY_TIP: usize = 20;
pub const PALM_CENTER: usize = 9; // middle-finger MCP

/// One detected hand: 21 points in normalized image coordinates.
///
/// The fixed-size array makes a short or missing landmark set
/// unrepresentable; the web boundary rejects frames that do not carry
/// exactly `LANDMARK_COUNT * 3` floats before this type is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandLandmarks(pub [Vec3; LANDMARK_COUNT]);

impl HandLandmarks {
    /// Parse a flat `[x0, y0, z0, x1, ...]` buffer. Returns `None` unless
    /// the length is exactly `LANDMARK_COUNT * 3`.
    pub fn from_flat(values: &[f32]) -> Option<Self> {
        if values.len() != LANDMARK_COUNT * 3 {
            return None;
        }
        let points = std::array::from_fn(|i| {
            Vec3::new(values[i * 3], values[i * 3 + 1], values[i * 3 + 2])
        });
        Some(Self(points))
    }

    /// Hand openness: mean distance from the four fingertips
    /// (index, middle, ring, pinky) to the palm center.
    pub fn openness(&self) -> f32 {
        let palm = self.0[PALM_CENTER];
        let tips = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];
        tips.iter()
            .map(|&i| self.0[i].distance(palm))
            .sum::<f32>()
            / tips.len() as f32
    }
}

/// Normalize an openness distance into [0, 1].
#[inline]
pub fn normalized_openness(avg_dist: f32) -> f32 {
    ((avg_dist - OPENNESS_MIN_DIST) / OPENNESS_DIST_RANGE).clamp(0.0, 1.0)
}

/// Map openness to the target zoom, 0.5 (fist) .. 2.0 (open hand).
#[inline]
pub fn zoom_for_openness(avg_dist: f32) -> f32 {
    ZOOM_MIN + normalized_openness(avg_dist) * ZOOM_SPAN
}

/// Generation stamp for the detection loop. Each loop start mints a new
/// stamp; a running loop compares its own stamp against the shared
/// counter and exits once stale. A rapid toggle off/on cycle therefore
/// supersedes the old loop instead of racing it, even while its last
/// detection call is still in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DetectionGeneration(u64);

impl DetectionGeneration {
    /// Mint the next generation and return its stamp.
    pub fn bump(&mut self) -> DetectionGeneration {
        self.0 += 1;
        *self
    }

    #[inline]
    pub fn is_current(&self, stamp: DetectionGeneration) -> bool {
        *self == stamp
    }
}

/// Smoothed gesture signals, updated once per detection tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureState {
    /// Palm center in normalized image space, roughly [0, 1] per axis.
    pub position: Vec3,
    /// Signed landmark-derived offsets: pitch, yaw, roll.
    pub rotation: Vec3,
    /// Openness-derived zoom, typically in [0.5, 2.0].
    pub zoom: f32,
    /// True iff the most recent tick saw a hand. No debounce.
    pub hand_present: bool,
}

impl Default for GestureState {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.5, 0.5, 0.0),
            rotation: Vec3::ZERO,
            zoom: 1.0,
            hand_present: false,
        }
    }
}

impl GestureState {
    /// Feed one detection tick. `None` means no hand this tick: presence
    /// flips off immediately but the smoothed signals keep their values,
    /// so a briefly lost hand resumes where it left off.
    pub fn update(&mut self, landmarks: Option<&HandLandmarks>) {
        let Some(lm) = landmarks else {
            self.hand_present = false;
            return;
        };
        self.hand_present = true;

        let palm = lm.0[PALM_CENTER];
        self.position += (palm - self.position) * GESTURE_POSITION_ALPHA;

        // pitch: wrist-to-palm vertical offset
        // yaw: index tip horizontal offset from image center
        // roll: thumb-to-pinky vertical offset
        let raw_rotation = Vec3::new(
            palm.y - lm.0[WRIST].y,
            lm.0[INDEX_TIP].x - 0.5,
            lm.0[THUMB_TIP].y - lm.0[PINKY_TIP].y,
        );
        self.rotation += (raw_rotation - self.rotation) * GESTURE_ROTATION_ALPHA;

        let zoom_target = zoom_for_openness(lm.openness());
        self.zoom += (zoom_target - self.zoom) * GESTURE_ZOOM_ALPHA;
    }
}

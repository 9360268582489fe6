use crate::pose::Keyframe;
use glam::Vec3;

// Shared tuning constants used by both the web and native frontends.

// Narrative sections
pub const SECTION_COUNT: usize = 7;

// Fixed camera; the live camera is only ever smoothed toward this pose.
pub const CAMERA_EYE: [f32; 3] = [0.0, 1.2, 9.0];
pub const CAMERA_TARGET: [f32; 3] = [0.0, 0.4, 0.0];
pub const BASE_FOV_DEG: f32 = 50.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 200.0;

// Per-frame smoothing factors (state += (target - state) * alpha)
pub const CAMERA_SMOOTHING: f32 = 0.05;
pub const SCROLL_POSE_SMOOTHING: f32 = 0.04;
pub const GESTURE_POSE_SMOOTHING: f32 = 0.08;
pub const FOV_SMOOTHING: f32 = 0.10;

// Gesture signal filter
pub const GESTURE_POSITION_ALPHA: f32 = 0.15;
pub const GESTURE_ROTATION_ALPHA: f32 = 0.15;
pub const GESTURE_ZOOM_ALPHA: f32 = 0.10;

// Hand openness -> zoom mapping
pub const OPENNESS_MIN_DIST: f32 = 0.08;
pub const OPENNESS_DIST_RANGE: f32 = 0.15;
pub const ZOOM_MIN: f32 = 0.5;
pub const ZOOM_SPAN: f32 = 1.5;
pub const ZOOM_FLOOR: f32 = 0.25; // guards the 50/zoom FOV division

// Gesture -> object space mapping
pub const GESTURE_POSITION_SCALE: [f32; 3] = [4.0, 3.0, 2.0];
pub const GESTURE_ROTATION_SCALE: [f32; 3] = [6.0, 4.0, 5.0];

// Idle "floating" motion while scroll-driven; distinct frequency per axis
pub const IDLE_POS_AMP: f32 = 0.04;
pub const IDLE_POS_FREQ: [f32; 3] = [0.9, 1.3, 0.7];
pub const IDLE_ROT_AMP: f32 = 0.02;
pub const IDLE_ROT_FREQ: [f32; 3] = [1.1, 0.8, 1.5];

// Vertical breathing applied in both control modes
pub const BREATHE_AMP: f32 = 0.012;
pub const BREATHE_FREQ: f32 = 1.6;

// Cosmetic HUD readouts
pub const MAX_ALTITUDE_FT: f32 = 59_000.0;
pub const MAX_MACH: f32 = 2.25;
pub const BACKGROUND_LAYER_COUNT: usize = 4;

// Object pose per narrative section: hero shot, fly-bys, and a final
// nose-on approach pulled toward the camera. Rotations are XYZ Euler
// radians and deliberately keep small per-section deltas.
pub const KEYFRAME_POSITIONS: [[f32; 3]; SECTION_COUNT] = [
    [0.0, 0.0, 0.0],
    [-1.8, 0.4, 1.0],
    [1.6, -0.3, 2.0],
    [-1.2, 0.6, 3.0],
    [1.4, 0.2, 2.2],
    [0.0, -0.4, 1.2],
    [0.0, 0.3, 4.5],
];

pub const KEYFRAME_ROTATIONS: [[f32; 3]; SECTION_COUNT] = [
    [0.0, 0.0, 0.0],
    [0.10, 0.60, -0.15],
    [-0.12, 1.40, 0.20],
    [0.18, 2.40, -0.10],
    [-0.10, 3.60, 0.25],
    [0.15, 4.90, -0.20],
    [0.0, std::f32::consts::TAU, 0.0],
];

#[inline]
pub fn camera_eye() -> Vec3 {
    Vec3::from(CAMERA_EYE)
}

#[inline]
pub fn camera_target() -> Vec3 {
    Vec3::from(CAMERA_TARGET)
}

pub fn keyframes() -> [Keyframe; SECTION_COUNT] {
    std::array::from_fn(|i| Keyframe {
        position: Vec3::from(KEYFRAME_POSITIONS[i]),
        rotation: Vec3::from(KEYFRAME_ROTATIONS[i]),
    })
}

//! Keyframe pose interpolation driven by [`ScrollState`].

use crate::scroll::{ease_in_out_cubic, ScrollState};
use glam::Vec3;

/// A configured (position, rotation) pair for one narrative section.
/// Rotation is XYZ Euler angles in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    pub position: Vec3,
    pub rotation: Vec3,
}

/// Target object pose for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl From<Keyframe> for Pose {
    fn from(k: Keyframe) -> Self {
        Self {
            position: k.position,
            rotation: k.rotation,
        }
    }
}

/// Interpolate between the two keyframes bracketing the current section,
/// with a cubic-eased blend. At the end of the scroll the last keyframe is
/// returned unblended.
///
/// Rotation interpolation is a naive per-component Euler lerp, not slerp.
/// The configured per-section deltas are small enough that this does not
/// produce visible gimbal artifacts; large rotations would.
pub fn target_pose(scroll: &ScrollState, keyframes: &[Keyframe]) -> Pose {
    debug_assert!(!keyframes.is_empty());
    let last = keyframes.len() - 1;
    if scroll.section >= last {
        return keyframes[last].into();
    }
    let a = keyframes[scroll.section];
    let b = keyframes[scroll.section + 1];
    let t = ease_in_out_cubic(scroll.blend);
    Pose {
        position: a.position.lerp(b.position, t),
        rotation: a.rotation.lerp(b.rotation, t),
    }
}

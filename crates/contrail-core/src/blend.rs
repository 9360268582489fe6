//! Per-frame motion blending: picks the authoritative control source,
//! smooths the live transform toward it, and layers idle motion on top.

use crate::constants::{
    camera_eye, camera_target, BASE_FOV_DEG, BREATHE_AMP, BREATHE_FREQ, CAMERA_SMOOTHING,
    FOV_SMOOTHING, GESTURE_POSE_SMOOTHING, GESTURE_POSITION_SCALE, GESTURE_ROTATION_SCALE,
    IDLE_POS_AMP, IDLE_POS_FREQ, IDLE_ROT_AMP, IDLE_ROT_FREQ, SCROLL_POSE_SMOOTHING, ZOOM_FLOOR,
    Z_FAR, Z_NEAR,
};
use crate::gesture::GestureState;
use crate::pose::Pose;
use glam::{EulerRot, Mat4, Vec3};

/// Which signal drives the object this frame. Exactly one source is
/// authoritative per frame; the choice is re-made every frame with no
/// hysteresis, so losing the hand mid-gesture reverts to scroll control
/// on the very next frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlMode {
    #[default]
    ScrollDriven,
    GestureDriven,
}

impl ControlMode {
    /// Transition function: gesture drives only while the toggle is on
    /// and a hand was seen on the current detection tick.
    #[inline]
    pub fn next(toggle_enabled: bool, hand_present: bool) -> Self {
        if toggle_enabled && hand_present {
            ControlMode::GestureDriven
        } else {
            ControlMode::ScrollDriven
        }
    }
}

/// The live transform handed to the renderer. Owned by the frame driver
/// and mutated exactly once per frame by [`MotionBlender::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderTransform {
    pub object_position: Vec3,
    pub object_rotation: Vec3,
    pub camera_eye: Vec3,
    pub camera_target: Vec3,
    pub fov_y_degrees: f32,
}

impl Default for RenderTransform {
    fn default() -> Self {
        Self {
            object_position: Vec3::ZERO,
            object_rotation: Vec3::ZERO,
            camera_eye: camera_eye(),
            camera_target: camera_target(),
            fov_y_degrees: BASE_FOV_DEG,
        }
    }
}

impl RenderTransform {
    pub fn model_matrix(&self) -> Mat4 {
        let r = self.object_rotation;
        Mat4::from_translation(self.object_position)
            * Mat4::from_euler(EulerRot::XYZ, r.x, r.y, r.z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.camera_eye, self.camera_target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            aspect.max(1e-3),
            Z_NEAR,
            Z_FAR,
        )
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

/// Object position the gesture signals map to: webcam x is mirrored so
/// the model follows the hand, and all axes are recentered around zero.
#[inline]
pub fn gesture_object_position(g: &GestureState) -> Vec3 {
    Vec3::new(
        (0.5 - g.position.x) * GESTURE_POSITION_SCALE[0],
        (0.5 - g.position.y) * GESTURE_POSITION_SCALE[1],
        -g.position.z * GESTURE_POSITION_SCALE[2],
    )
}

#[inline]
pub fn gesture_object_rotation(g: &GestureState) -> Vec3 {
    Vec3::new(
        g.rotation.x * GESTURE_ROTATION_SCALE[0],
        g.rotation.y * GESTURE_ROTATION_SCALE[1],
        g.rotation.z * GESTURE_ROTATION_SCALE[2],
    )
}

/// FOV the gesture zoom maps to; zoom is floored so the division can
/// never blow the FOV up past the projection's valid range.
#[inline]
pub fn gesture_fov(g: &GestureState) -> f32 {
    BASE_FOV_DEG / g.zoom.max(ZOOM_FLOOR)
}

fn idle_jitter_position(time_s: f32) -> Vec3 {
    Vec3::new(
        (time_s * IDLE_POS_FREQ[0]).sin(),
        (time_s * IDLE_POS_FREQ[1]).sin(),
        (time_s * IDLE_POS_FREQ[2]).sin(),
    ) * IDLE_POS_AMP
}

fn idle_jitter_rotation(time_s: f32) -> Vec3 {
    Vec3::new(
        (time_s * IDLE_ROT_FREQ[0]).sin(),
        (time_s * IDLE_ROT_FREQ[1]).sin(),
        (time_s * IDLE_ROT_FREQ[2]).sin(),
    ) * IDLE_ROT_AMP
}

/// Stateless blender; all tuning lives in [`crate::constants`].
#[derive(Clone, Copy, Debug, Default)]
pub struct MotionBlender;

impl MotionBlender {
    /// Advance the live transform one frame. `scroll_target` is the pose
    /// interpolator output; `time_s` is seconds since startup and only
    /// feeds the idle oscillators, so the step is deterministic.
    pub fn step(
        &self,
        transform: &mut RenderTransform,
        mode: ControlMode,
        scroll_target: &Pose,
        gesture: &GestureState,
        time_s: f32,
    ) {
        // Camera is always eased back to its configured pose; it never
        // follows scroll or gesture position.
        transform.camera_eye += (camera_eye() - transform.camera_eye) * CAMERA_SMOOTHING;
        transform.camera_target +=
            (camera_target() - transform.camera_target) * CAMERA_SMOOTHING;

        match mode {
            ControlMode::GestureDriven => {
                let pos = gesture_object_position(gesture);
                let rot = gesture_object_rotation(gesture);
                transform.object_position +=
                    (pos - transform.object_position) * GESTURE_POSE_SMOOTHING;
                transform.object_rotation +=
                    (rot - transform.object_rotation) * GESTURE_POSE_SMOOTHING;
                transform.fov_y_degrees +=
                    (gesture_fov(gesture) - transform.fov_y_degrees) * FOV_SMOOTHING;
            }
            ControlMode::ScrollDriven => {
                let pos = scroll_target.position + idle_jitter_position(time_s);
                let rot = scroll_target.rotation + idle_jitter_rotation(time_s);
                transform.object_position +=
                    (pos - transform.object_position) * SCROLL_POSE_SMOOTHING;
                transform.object_rotation +=
                    (rot - transform.object_rotation) * SCROLL_POSE_SMOOTHING;
                transform.fov_y_degrees +=
                    (BASE_FOV_DEG - transform.fov_y_degrees) * CAMERA_SMOOTHING;
            }
        }

        // Breathing applies in both modes.
        transform.object_position.y += (time_s * BREATHE_FREQ).sin() * BREATHE_AMP;
    }
}

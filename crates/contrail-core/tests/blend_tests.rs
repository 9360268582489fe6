use contrail_core::{
    camera_eye, camera_target, gesture_fov, gesture_object_position, keyframes, target_pose,
    ControlMode, GestureState, MotionBlender, Pose, RenderTransform, ScrollState, BASE_FOV_DEG,
};
use glam::Vec3;

// All steps below pass time_s = 0.0 so the idle oscillators contribute
// nothing and convergence can be asserted exactly.

#[test]
fn mode_requires_both_toggle_and_hand() {
    assert_eq!(ControlMode::next(false, false), ControlMode::ScrollDriven);
    assert_eq!(ControlMode::next(false, true), ControlMode::ScrollDriven);
    assert_eq!(ControlMode::next(true, false), ControlMode::ScrollDriven);
    assert_eq!(ControlMode::next(true, true), ControlMode::GestureDriven);
}

#[test]
fn default_mode_is_scroll_driven() {
    assert_eq!(ControlMode::default(), ControlMode::ScrollDriven);
}

#[test]
fn camera_always_converges_to_configured_pose() {
    let blender = MotionBlender;
    let mut transform = RenderTransform {
        camera_eye: Vec3::new(5.0, 5.0, 5.0),
        camera_target: Vec3::new(-2.0, 0.0, 1.0),
        ..RenderTransform::default()
    };
    let pose = Pose::default();
    let gesture = GestureState::default();
    for _ in 0..1000 {
        blender.step(
            &mut transform,
            ControlMode::ScrollDriven,
            &pose,
            &gesture,
            0.0,
        );
    }
    assert!((transform.camera_eye - camera_eye()).length() < 1e-3);
    assert!((transform.camera_target - camera_target()).length() < 1e-3);
}

#[test]
fn scroll_mode_converges_to_interpolated_pose() {
    let kf = keyframes();
    let scroll = ScrollState::from_progress(0.42);
    let pose = target_pose(&scroll, &kf);
    let blender = MotionBlender;
    let mut transform = RenderTransform::default();
    let gesture = GestureState::default();
    for _ in 0..2000 {
        blender.step(
            &mut transform,
            ControlMode::ScrollDriven,
            &pose,
            &gesture,
            0.0,
        );
    }
    assert!(
        (transform.object_position - pose.position).length() < 1e-3,
        "position stuck at {:?}, wanted {:?}",
        transform.object_position,
        pose.position
    );
    assert!((transform.object_rotation - pose.rotation).length() < 1e-3);
    assert!((transform.fov_y_degrees - BASE_FOV_DEG).abs() < 1e-3);
}

#[test]
fn gesture_mode_converges_to_mapped_hand_signals() {
    let blender = MotionBlender;
    let mut transform = RenderTransform::default();
    let gesture = GestureState {
        position: Vec3::new(0.2, 0.7, 0.1),
        rotation: Vec3::new(0.1, -0.2, 0.05),
        zoom: 2.0,
        hand_present: true,
    };
    let pose = Pose::default();
    for _ in 0..2000 {
        blender.step(
            &mut transform,
            ControlMode::GestureDriven,
            &pose,
            &gesture,
            0.0,
        );
    }
    let expected_pos = gesture_object_position(&gesture);
    assert!((transform.object_position - expected_pos).length() < 1e-3);
    // zoom 2.0 halves the field of view
    assert!(
        (transform.fov_y_degrees - 25.0).abs() < 1e-3,
        "fov was {}",
        transform.fov_y_degrees
    );
}

#[test]
fn gesture_fov_is_floored_against_tiny_zoom() {
    let mut gesture = GestureState::default();
    gesture.zoom = 0.01;
    let fov = gesture_fov(&gesture);
    assert!(fov.is_finite());
    assert!(fov <= BASE_FOV_DEG / 0.25 + 1e-3);
}

#[test]
fn losing_the_hand_reverts_fov_on_subsequent_frames() {
    let blender = MotionBlender;
    let mut transform = RenderTransform::default();
    let pose = Pose::default();
    let mut gesture = GestureState {
        zoom: 2.0,
        hand_present: true,
        ..GestureState::default()
    };

    // Drive the field of view well below base while zoomed in.
    for _ in 0..2000 {
        let mode = ControlMode::next(true, gesture.hand_present);
        assert_eq!(mode, ControlMode::GestureDriven);
        blender.step(&mut transform, mode, &pose, &gesture, 0.0);
    }
    assert!((transform.fov_y_degrees - 25.0).abs() < 1e-2);

    // Hand drops out: the very next frame is scroll driven again and the
    // field of view eases back toward base.
    gesture.hand_present = false;
    let mode = ControlMode::next(true, gesture.hand_present);
    assert_eq!(mode, ControlMode::ScrollDriven);
    let fov_before = transform.fov_y_degrees;
    blender.step(&mut transform, mode, &pose, &gesture, 0.0);
    assert!(transform.fov_y_degrees > fov_before);
    for _ in 0..2000 {
        blender.step(&mut transform, mode, &pose, &gesture, 0.0);
    }
    assert!((transform.fov_y_degrees - BASE_FOV_DEG).abs() < 1e-3);
}

#[test]
fn step_is_deterministic_for_equal_inputs() {
    let blender = MotionBlender;
    let pose = Pose::default();
    let gesture = GestureState::default();
    let mut a = RenderTransform::default();
    let mut b = RenderTransform::default();
    for i in 0..100 {
        let t = i as f32 * 0.016;
        blender.step(&mut a, ControlMode::ScrollDriven, &pose, &gesture, t);
        blender.step(&mut b, ControlMode::ScrollDriven, &pose, &gesture, t);
    }
    assert_eq!(a, b);
}

#[test]
fn projection_handles_degenerate_aspect() {
    let transform = RenderTransform::default();
    let m = transform.view_proj(0.0);
    assert!(m.is_finite());
}

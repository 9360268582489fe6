use contrail_core::{
    normalized_openness, zoom_for_openness, DetectionGeneration, GestureState, HandLandmarks,
    INDEX_TIP, LANDMARK_COUNT, MIDDLE_TIP, PALM_CENTER, PINKY_TIP, RING_TIP, THUMB_TIP, WRIST,
};
use glam::Vec3;

/// A synthetic hand: palm at `palm`, the four measured fingertips at a
/// uniform distance `tip_dist` from it, other points near the palm.
fn make_hand(palm: Vec3, tip_dist: f32) -> HandLandmarks {
    let mut points = [palm; LANDMARK_COUNT];
    points[WRIST] = palm - Vec3::new(0.0, 0.1, 0.0);
    points[THUMB_TIP] = palm + Vec3::new(-0.06, 0.02, 0.0);
    points[INDEX_TIP] = palm + Vec3::new(0.0, tip_dist, 0.0);
    points[MIDDLE_TIP] = palm + Vec3::new(tip_dist, 0.0, 0.0);
    points[RING_TIP] = palm + Vec3::new(0.0, -tip_dist, 0.0);
    points[PINKY_TIP] = palm + Vec3::new(-tip_dist, 0.0, 0.0);
    HandLandmarks(points)
}

#[test]
fn from_flat_requires_exactly_63_values() {
    assert!(HandLandmarks::from_flat(&[0.0; 63]).is_some());
    assert!(HandLandmarks::from_flat(&[0.0; 62]).is_none());
    assert!(HandLandmarks::from_flat(&[0.0; 64]).is_none());
    assert!(HandLandmarks::from_flat(&[]).is_none());
}

#[test]
fn from_flat_preserves_point_order() {
    let mut flat = vec![0.0f32; 63];
    flat[PALM_CENTER * 3] = 0.25;
    flat[PALM_CENTER * 3 + 1] = 0.75;
    flat[PALM_CENTER * 3 + 2] = 0.1;
    let hand = HandLandmarks::from_flat(&flat).unwrap();
    assert_eq!(hand.0[PALM_CENTER], Vec3::new(0.25, 0.75, 0.1));
}

#[test]
fn openness_is_mean_fingertip_distance() {
    let hand = make_hand(Vec3::new(0.5, 0.5, 0.0), 0.12);
    assert!((hand.openness() - 0.12).abs() < 1e-6);
}

#[test]
fn closed_fist_maps_to_minimum_zoom() {
    // avg fingertip distance at the lower normalization bound
    assert_eq!(normalized_openness(0.08), 0.0);
    assert!((zoom_for_openness(0.08) - 0.5).abs() < 1e-6);
    // and below it
    assert!((zoom_for_openness(0.02) - 0.5).abs() < 1e-6);
}

#[test]
fn open_hand_maps_to_maximum_zoom() {
    assert!((normalized_openness(0.23) - 1.0).abs() < 1e-6);
    assert!((zoom_for_openness(0.23) - 2.0).abs() < 1e-5);
    assert!((zoom_for_openness(0.5) - 2.0).abs() < 1e-5);
}

#[test]
fn hand_presence_flips_immediately_without_debounce() {
    let mut state = GestureState::default();
    assert!(!state.hand_present);
    let hand = make_hand(Vec3::new(0.5, 0.5, 0.0), 0.1);
    state.update(Some(&hand));
    assert!(state.hand_present);
    state.update(None);
    assert!(!state.hand_present);
    state.update(Some(&hand));
    assert!(state.hand_present);
}

#[test]
fn signals_persist_across_empty_ticks() {
    let mut state = GestureState::default();
    let hand = make_hand(Vec3::new(0.8, 0.2, 0.05), 0.2);
    for _ in 0..50 {
        state.update(Some(&hand));
    }
    let before = state;
    state.update(None);
    assert!(!state.hand_present);
    assert_eq!(state.position, before.position);
    assert_eq!(state.rotation, before.rotation);
    assert_eq!(state.zoom, before.zoom);
}

#[test]
fn smoothing_converges_geometrically_to_constant_input() {
    let mut state = GestureState::default();
    let palm = Vec3::new(0.7, 0.3, 0.08);
    let hand = make_hand(palm, 0.23);
    for _ in 0..200 {
        state.update(Some(&hand));
    }
    assert!(
        (state.position - palm).length() < 1e-3,
        "position did not converge: {:?}",
        state.position
    );
    // fully open hand, zoom target 2.0
    assert!((state.zoom - 2.0).abs() < 1e-3, "zoom was {}", state.zoom);
    // rotation targets derived from the same constant landmarks
    let expected_pitch = palm.y - hand.0[WRIST].y;
    let expected_yaw = hand.0[INDEX_TIP].x - 0.5;
    let expected_roll = hand.0[THUMB_TIP].y - hand.0[PINKY_TIP].y;
    assert!((state.rotation.x - expected_pitch).abs() < 1e-3);
    assert!((state.rotation.y - expected_yaw).abs() < 1e-3);
    assert!((state.rotation.z - expected_roll).abs() < 1e-3);
}

#[test]
fn restarted_detection_loop_supersedes_the_old_one() {
    // Models a fast toggle off/on: the first loop holds a stamp from the
    // first enable, the second enable mints a new one. Only the newest
    // stamp is current, so the stale loop stops feeding the filter.
    let mut counter = DetectionGeneration::default();
    let first = counter.bump();
    assert!(counter.is_current(first));
    let second = counter.bump();
    assert!(!counter.is_current(first), "stale loop must see itself superseded");
    assert!(counter.is_current(second));
}

#[test]
fn single_tick_moves_a_fixed_fraction() {
    let mut state = GestureState::default();
    let palm = Vec3::new(1.0, 0.5, 0.0);
    let hand = make_hand(palm, 0.1);
    let start = state.position;
    state.update(Some(&hand));
    let expected = start + (palm - start) * 0.15;
    assert!((state.position - expected).length() < 1e-6);
}

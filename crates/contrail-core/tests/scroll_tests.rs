use contrail_core::{ease_in_out_cubic, ScrollState, SECTION_COUNT};

#[test]
fn ease_is_identity_at_boundaries() {
    assert_eq!(ease_in_out_cubic(0.0), 0.0);
    assert!((ease_in_out_cubic(1.0) - 1.0).abs() < 1e-6);
    assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
}

#[test]
fn ease_is_monotonic_on_unit_interval() {
    let mut prev = ease_in_out_cubic(0.0);
    for i in 1..=1000 {
        let t = i as f32 / 1000.0;
        let e = ease_in_out_cubic(t);
        assert!(e >= prev, "ease decreased at t={t}: {e} < {prev}");
        prev = e;
    }
}

#[test]
fn progress_zero_is_hero_state() {
    let s = ScrollState::from_progress(0.0);
    assert_eq!(s.section, 0);
    assert_eq!(s.blend, 0.0);
    assert_eq!(s.progress, 0.0);
}

#[test]
fn midpoint_lands_on_section_three() {
    // 7 sections: 0.5 * 6 = 3.0 exactly
    let s = ScrollState::from_progress(0.5);
    assert_eq!(s.section, 3);
    assert!(s.blend.abs() < 1e-6);
}

#[test]
fn blend_fraction_within_a_section() {
    // 3.5 / 6 sits halfway between keyframes 3 and 4
    let s = ScrollState::from_progress(3.5 / 6.0);
    assert_eq!(s.section, 3);
    assert!((s.blend - 0.5).abs() < 1e-5, "blend was {}", s.blend);
}

#[test]
fn full_progress_reports_last_section_unblended() {
    let s = ScrollState::from_progress(1.0);
    assert_eq!(s.section, SECTION_COUNT - 1);
    assert_eq!(s.blend, 0.0);
    assert!(s.at_end());
}

#[test]
fn section_stays_in_blend_range_below_full_progress() {
    for i in 0..1000 {
        let p = i as f32 / 1000.0;
        let s = ScrollState::from_progress(p);
        assert!(
            s.section <= SECTION_COUNT - 2,
            "section {} out of blend range at progress {p}",
            s.section
        );
        assert!((0.0..=1.0).contains(&s.blend));
    }
}

#[test]
fn from_offset_is_deterministic() {
    let a = ScrollState::from_offset(1234.0, 6000.0);
    let b = ScrollState::from_offset(1234.0, 6000.0);
    assert_eq!(a, b);
}

#[test]
fn offset_outside_range_is_clamped() {
    let below = ScrollState::from_offset(-500.0, 6000.0);
    assert_eq!(below.progress, 0.0);
    let above = ScrollState::from_offset(9000.0, 6000.0);
    assert_eq!(above.progress, 1.0);
}

#[test]
fn zero_scrollable_range_never_produces_nan() {
    // Page shorter than the viewport: the mapper clamps to the hero
    // state instead of dividing by zero.
    let s = ScrollState::from_offset(120.0, 0.0);
    assert!(s.progress.is_finite());
    assert_eq!(s, ScrollState::default());

    let negative = ScrollState::from_offset(120.0, -10.0);
    assert_eq!(negative, ScrollState::default());
}

#[test]
fn non_finite_progress_collapses_to_hero_state() {
    assert_eq!(ScrollState::from_progress(f32::NAN), ScrollState::default());
    assert_eq!(
        ScrollState::from_progress(f32::INFINITY),
        ScrollState::default()
    );
    assert_eq!(ScrollState::from_offset(f32::NAN, 6000.0), ScrollState::default());
}

use contrail_core::{AssetError, BeaconClip, MeshAsset};

const VALID: &str = r#"{
    "name": "test-wedge",
    "positions": [[0,0,0],[1,0,0],[0,1,0]],
    "normals": [[0,0,1],[0,0,1],[0,0,1]],
    "indices": [0,1,2]
}"#;

#[test]
fn valid_asset_parses() {
    let mesh = MeshAsset::from_json("mem", VALID).unwrap();
    assert_eq!(mesh.name, "test-wedge");
    assert_eq!(mesh.triangle_count(), 1);
    assert!(mesh.beacon.is_none());
}

#[test]
fn beacon_clip_is_optional_and_deserialized() {
    let body = r#"{
        "name": "b",
        "positions": [[0,0,0],[1,0,0],[0,1,0]],
        "normals": [[0,0,1],[0,0,1],[0,0,1]],
        "indices": [0,1,2],
        "beacon": { "rate_hz": 1.5 }
    }"#;
    let mesh = MeshAsset::from_json("mem", body).unwrap();
    let beacon = mesh.beacon.unwrap();
    assert!((beacon.rate_hz - 1.5).abs() < 1e-6);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = MeshAsset::from_json("assets/broken.json", "{ not json").unwrap_err();
    match err {
        AssetError::Parse { path, .. } => assert_eq!(path, "assets/broken.json"),
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn empty_positions_fail_validation() {
    let body = r#"{"name":"x","positions":[],"normals":[],"indices":[]}"#;
    assert!(matches!(
        MeshAsset::from_json("mem", body),
        Err(AssetError::Invalid { .. })
    ));
}

#[test]
fn mismatched_normals_fail_validation() {
    let body = r#"{
        "name": "x",
        "positions": [[0,0,0],[1,0,0],[0,1,0]],
        "normals": [[0,0,1]],
        "indices": [0,1,2]
    }"#;
    let err = MeshAsset::from_json("mem", body).unwrap_err();
    match err {
        AssetError::Invalid { reason, .. } => assert!(reason.contains("normals")),
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
fn non_triangle_index_count_fails_validation() {
    let body = r#"{
        "name": "x",
        "positions": [[0,0,0],[1,0,0],[0,1,0]],
        "normals": [[0,0,1],[0,0,1],[0,0,1]],
        "indices": [0,1]
    }"#;
    assert!(matches!(
        MeshAsset::from_json("mem", body),
        Err(AssetError::Invalid { .. })
    ));
}

#[test]
fn out_of_range_index_fails_validation() {
    let body = r#"{
        "name": "x",
        "positions": [[0,0,0],[1,0,0],[0,1,0]],
        "normals": [[0,0,1],[0,0,1],[0,0,1]],
        "indices": [0,1,9]
    }"#;
    let err = MeshAsset::from_json("mem", body).unwrap_err();
    match err {
        AssetError::Invalid { reason, .. } => assert!(reason.contains('9')),
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
fn beacon_intensity_stays_in_unit_range() {
    let clip = BeaconClip { rate_hz: 2.0 };
    for i in 0..500 {
        let t = i as f32 * 0.01;
        let v = clip.intensity(t);
        assert!((0.0..=1.0).contains(&v), "intensity {v} at t={t}");
    }
}

#[test]
fn beacon_intensity_peaks_once_per_cycle() {
    let clip = BeaconClip { rate_hz: 1.0 };
    // quarter cycle is the sine peak
    assert!(clip.intensity(0.25) > 0.99);
    // three quarters is the trough
    assert!(clip.intensity(0.75) < 0.01);
}

use time_range_slider::api::{
    MountGuard, RangeSlider, RangeSliderConfig, SLIDER_SNAPSHOT_JSON_SCHEMA_V1, SliderSnapshot,
    SliderSnapshotJsonContractV1,
};
use time_range_slider::core::{HandleKind, InvertedRangePolicy, StaticTrack};
use time_range_slider::interaction::TouchPoint;
use time_range_slider::platform::EventBus;

fn dragged_slider() -> (RangeSlider<StaticTrack>, MountGuard) {
    let slider = RangeSlider::new(
        StaticTrack::new(300.0),
        RangeSliderConfig::new("Arrival", 0, 24),
    );
    let guard = slider.mount(&EventBus::new()).expect("mount");
    slider.drag_begin(HandleKind::Start, &[TouchPoint::new(1, 0.0)]);
    slider.drag_move(HandleKind::Start, &[TouchPoint::new(1, 150.0)]);
    (slider, guard)
}

#[test]
fn snapshot_reflects_live_state() {
    let (slider, _guard) = dragged_slider();
    let snapshot = slider.snapshot();

    assert_eq!(snapshot.title, "Arrival");
    assert_eq!(snapshot.start_percent, 50.0);
    assert_eq!(snapshot.end_percent, 100.0);
    assert_eq!(
        (snapshot.last_external_start_hours, snapshot.last_external_end_hours),
        (0, 24)
    );
    assert_eq!(snapshot.derived.start_label, "12:00");
    assert_eq!(snapshot.track_width_px, Some(300.0));
    assert!(snapshot.start_dragging);
    assert!(!snapshot.end_dragging);
    assert!(snapshot.mounted);
    assert_eq!(snapshot.inverted_range_policy, InvertedRangePolicy::Permissive);
}

#[test]
fn contract_v1_round_trips() {
    let (slider, _guard) = dragged_slider();
    let json = slider
        .snapshot_json_contract_v1_pretty()
        .expect("serialize contract");

    let payload: SliderSnapshotJsonContractV1 =
        serde_json::from_str(&json).expect("parse contract");
    assert_eq!(payload.schema_version, SLIDER_SNAPSHOT_JSON_SCHEMA_V1);

    let restored = SliderSnapshot::from_json_compat_str(&json).expect("compat parse");
    assert_eq!(restored, slider.snapshot());
}

#[test]
fn bare_snapshot_is_accepted() {
    let (slider, _guard) = dragged_slider();
    let snapshot = slider.snapshot();
    let json = serde_json::to_string(&snapshot).expect("serialize bare snapshot");

    let restored = SliderSnapshot::from_json_compat_str(&json).expect("compat parse");
    assert_eq!(restored, snapshot);
}

#[test]
fn unknown_schema_version_is_rejected() {
    let (slider, _guard) = dragged_slider();
    let json = slider
        .snapshot_json_contract_v1_pretty()
        .expect("serialize contract")
        .replace("\"schema_version\": 1", "\"schema_version\": 2");

    let err = SliderSnapshot::from_json_compat_str(&json).expect_err("must reject");
    assert!(format!("{err}").contains("unsupported snapshot schema version: 2"));
}

#[test]
fn garbage_input_is_invalid_data() {
    let err = SliderSnapshot::from_json_compat_str("{\"title\": 3}").expect_err("must fail");
    assert!(format!("{err}").contains("failed to parse snapshot json payload"));
}

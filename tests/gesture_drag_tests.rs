use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use time_range_slider::api::{RangeSlider, RangeSliderConfig};
use time_range_slider::core::{HandleKind, StaticTrack, Viewport};
use time_range_slider::interaction::{HandleDragState, TouchPoint};
use time_range_slider::platform::{EventBus, PointerEvent, PointerPhase};

fn recording_slider(
    track: StaticTrack,
    start: u32,
    end: u32,
) -> (RangeSlider<StaticTrack>, Rc<RefCell<Vec<u32>>>) {
    let starts = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&starts);
    let slider = RangeSlider::new(track, RangeSliderConfig::new("Arrival", start, end))
        .with_on_start_changed(move |hours| sink.borrow_mut().push(hours));
    (slider, starts)
}

#[test]
fn half_track_drag_moves_start_handle_to_noon() {
    let bus = EventBus::new();
    let (slider, starts) = recording_slider(StaticTrack::new(300.0), 0, 24);
    let _guard = slider.mount(&bus).expect("mount");

    bus.dispatch(
        HandleKind::Start,
        &PointerEvent::touch(PointerPhase::Begin, 1, 20.0),
    );
    bus.dispatch(
        HandleKind::Start,
        &PointerEvent::touch(PointerPhase::Move, 1, 170.0),
    );

    let derived = slider.derive();
    assert_abs_diff_eq!(derived.clamped_start_percent, 50.0, epsilon = 1e-12);
    assert_eq!(derived.start_hours, 12);
    assert_eq!(derived.start_label, "12:00");
    assert_eq!(starts.borrow().as_slice(), &[12]);
}

#[test]
fn deltas_are_incremental_between_moves() {
    let (slider, _starts) = recording_slider(StaticTrack::new(200.0), 0, 24);
    let bus = EventBus::new();
    let _guard = slider.mount(&bus).expect("mount");

    slider.drag_begin(HandleKind::Start, &[TouchPoint::new(1, 0.0)]);
    let first = slider.drag_move(HandleKind::Start, &[TouchPoint::new(1, 20.0)]);
    let second = slider.drag_move(HandleKind::Start, &[TouchPoint::new(1, 50.0)]);

    assert_abs_diff_eq!(first, 10.0, epsilon = 1e-12);
    assert_abs_diff_eq!(second, 15.0, epsilon = 1e-12);
    assert_abs_diff_eq!(
        slider.range_state().percent(HandleKind::Start),
        25.0,
        epsilon = 1e-12
    );
}

#[test]
fn unmeasured_track_makes_moves_inert_until_measured() {
    let (slider, starts) = recording_slider(StaticTrack::detached(), 0, 24);
    let bus = EventBus::new();
    let _guard = slider.mount(&bus).expect("mount");
    assert!(!slider.track_geometry().is_measured());
    assert_eq!(slider.measure_track(), None);

    slider.drag_begin(HandleKind::Start, &[TouchPoint::new(9, 0.0)]);
    let delta = slider.drag_move(HandleKind::Start, &[TouchPoint::new(9, 100.0)]);
    assert_eq!(delta, 0.0);
    assert_eq!(slider.derive().start_hours, 0);

    slider.with_track_mut(|track| track.set_width(300.0));
    assert_eq!(slider.measure_track(), Some(300.0));
    let delta = slider.drag_move(HandleKind::Start, &[TouchPoint::new(9, 250.0)]);
    assert_abs_diff_eq!(delta, 50.0, epsilon = 1e-12);
    assert_eq!(slider.derive().start_hours, 12);
    assert_eq!(starts.borrow().as_slice(), &[12]);
}

#[test]
fn move_without_begin_is_zero_delta() {
    let (slider, starts) = recording_slider(StaticTrack::new(300.0), 3, 24);
    let bus = EventBus::new();
    let _guard = slider.mount(&bus).expect("mount");

    let delta = slider.drag_move(HandleKind::Start, &[TouchPoint::new(1, 500.0)]);
    assert_eq!(delta, 0.0);
    assert_eq!(slider.derive().start_hours, 3);
    assert!(starts.borrow().is_empty());
}

#[test]
fn non_finite_pointer_coordinates_are_ignored() {
    let (slider, _starts) = recording_slider(StaticTrack::new(300.0), 0, 24);
    let bus = EventBus::new();
    let _guard = slider.mount(&bus).expect("mount");

    assert!(!slider.drag_begin(HandleKind::Start, &[TouchPoint::new(1, f64::NAN)]));
    slider.drag_begin(HandleKind::Start, &[TouchPoint::new(1, 10.0)]);
    let delta = slider.drag_move(HandleKind::Start, &[TouchPoint::new(1, f64::INFINITY)]);
    assert_eq!(delta, 0.0);

    let delta = slider.drag_move(HandleKind::Start, &[TouchPoint::new(1, 40.0)]);
    assert_abs_diff_eq!(delta, 10.0, epsilon = 1e-12);
}

#[test]
fn both_handles_can_drag_concurrently() {
    let bus = EventBus::new();
    let (slider, _starts) = recording_slider(StaticTrack::new(240.0), 0, 24);
    let _guard = slider.mount(&bus).expect("mount");

    bus.dispatch(HandleKind::Start, &PointerEvent::touch(PointerPhase::Begin, 1, 0.0));
    bus.dispatch(HandleKind::End, &PointerEvent::touch(PointerPhase::Begin, 2, 240.0));
    bus.dispatch(HandleKind::Start, &PointerEvent::touch(PointerPhase::Move, 1, 60.0));
    bus.dispatch(HandleKind::End, &PointerEvent::touch(PointerPhase::Move, 2, 180.0));

    assert_eq!(slider.derive().hours(), (6, 18));
    assert!(slider.drag_state(HandleKind::Start).is_dragging());
    assert!(slider.drag_state(HandleKind::End).is_dragging());

    bus.dispatch(HandleKind::Start, &PointerEvent::touch(PointerPhase::End, 1, 60.0));
    assert_eq!(slider.drag_state(HandleKind::Start), HandleDragState::Idle);
    assert!(slider.drag_state(HandleKind::End).is_dragging());
}

#[test]
fn mouse_pointer_drives_handle_like_single_touch() {
    let bus = EventBus::new();
    let (slider, _starts) = recording_slider(StaticTrack::new(480.0), 0, 24);
    let _guard = slider.mount(&bus).expect("mount");

    bus.dispatch(HandleKind::End, &PointerEvent::mouse(PointerPhase::Begin, 480.0));
    bus.dispatch(HandleKind::End, &PointerEvent::mouse(PointerPhase::Move, 240.0));
    bus.dispatch(HandleKind::End, &PointerEvent::mouse(PointerPhase::End, 240.0));

    assert_eq!(slider.derive().end_hours, 12);
    assert_eq!(slider.drag_state(HandleKind::End), HandleDragState::Idle);
}

#[test]
fn viewport_width_change_recalibrates_subsequent_deltas() {
    let bus = EventBus::new();
    let (slider, _starts) = recording_slider(StaticTrack::new(300.0), 0, 24);
    let _guard = slider.mount(&bus).expect("mount");

    slider.with_track_mut(|track| track.set_width(600.0));
    assert_eq!(slider.on_viewport_resize(Viewport::new(800, 600)), Some(600.0));

    slider.with_track_mut(|track| track.set_width(200.0));
    assert_eq!(slider.on_viewport_resize(Viewport::new(800, 400)), None);
    assert_eq!(slider.track_geometry().width_px(), Some(600.0));

    bus.dispatch(HandleKind::Start, &PointerEvent::touch(PointerPhase::Begin, 1, 0.0));
    bus.dispatch(HandleKind::Start, &PointerEvent::touch(PointerPhase::Move, 1, 150.0));
    assert_eq!(slider.derive().start_hours, 6);
}

#[test]
fn cancel_returns_handle_to_idle() {
    let (slider, _starts) = recording_slider(StaticTrack::new(300.0), 0, 24);
    let bus = EventBus::new();
    let _guard = slider.mount(&bus).expect("mount");
    slider.handle_pointer_event(
        HandleKind::Start,
        &PointerEvent::touch(PointerPhase::Begin, 5, 10.0),
    );
    assert!(slider.drag_state(HandleKind::Start).is_dragging());

    slider.handle_pointer_event(
        HandleKind::Start,
        &PointerEvent::new(PointerPhase::Cancel, Vec::<TouchPoint>::new()),
    );
    assert_eq!(slider.drag_state(HandleKind::Start), HandleDragState::Idle);
}

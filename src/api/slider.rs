use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, trace};

use crate::core::{
    DeltaOutcome, DerivedRange, GeometryCalibrator, HandleKind, RangeState, TrackElement,
    TrackGeometry, Viewport,
};
use crate::extensions::{SliderContext, SliderEvent, SliderObserver};
use crate::interaction::{GestureTracker, HandleDragState, TouchPoint};
use crate::platform::{PointerEvent, PointerPhase};

use super::{ChangeNotifier, RangeSliderConfig};

type HoursCallback = Box<dyn FnMut(u32)>;

/// Mutable slider state. Only borrowed for the duration of one operation.
pub(super) struct SliderCore<T> {
    pub(super) title: String,
    pub(super) track: T,
    pub(super) range: RangeState,
    pub(super) gestures: GestureTracker,
    pub(super) calibrator: GeometryCalibrator,
    pub(super) notifier: ChangeNotifier,
    pub(super) mounted: bool,
    outbox: Vec<(SliderEvent, SliderContext)>,
}

impl<T: TrackElement> SliderCore<T> {
    fn new(track: T, config: RangeSliderConfig) -> Self {
        let range = RangeState::new(config.current_start_hours, config.current_end_hours)
            .with_inverted_range_policy(config.inverted_range_policy);
        let notifier = if config.notify_on_mount {
            ChangeNotifier::unseeded()
        } else {
            ChangeNotifier::seeded(&range.derive())
        };
        Self {
            title: config.title,
            track,
            range,
            gestures: GestureTracker::new(),
            calibrator: GeometryCalibrator::new(),
            notifier,
            mounted: false,
            outbox: Vec::new(),
        }
    }

    pub(super) fn context(&self) -> SliderContext {
        let derived = self.range.derive();
        SliderContext {
            start_hours: derived.start_hours,
            end_hours: derived.end_hours,
            clamped_start_percent: derived.clamped_start_percent,
            clamped_end_percent: derived.clamped_end_percent,
            track_width_px: self.calibrator.geometry().width_px(),
            start_dragging: self.gestures.is_dragging(HandleKind::Start),
            end_dragging: self.gestures.is_dragging(HandleKind::End),
            mounted: self.mounted,
        }
    }

    fn emit(&mut self, event: SliderEvent) {
        let context = self.context();
        self.outbox.push((event, context));
    }

    fn observe_hour_changes(&mut self) {
        let derived = self.range.derive();
        for change in self.notifier.observe(&derived) {
            let event = match change.handle {
                HandleKind::Start => SliderEvent::StartHoursChanged {
                    hours: change.hours,
                },
                HandleKind::End => SliderEvent::EndHoursChanged {
                    hours: change.hours,
                },
            };
            self.emit(event);
        }
    }

    fn apply_external(&mut self, start_hours: u32, end_hours: u32) -> bool {
        let reset = self.range.apply_external(start_hours, end_hours);
        if reset {
            self.emit(SliderEvent::ExternalApplied {
                start_hours,
                end_hours,
            });
            self.observe_hour_changes();
        }
        reset
    }

    fn apply_delta(&mut self, handle: HandleKind, percent_delta: f64) -> DeltaOutcome {
        let outcome = self.range.apply_delta(handle, percent_delta);
        if outcome.moved() {
            self.observe_hour_changes();
        }
        outcome
    }

    fn accepts_gestures(&self, handle: HandleKind) -> bool {
        if !self.mounted {
            trace!(?handle, "slider not mounted; ignoring gesture");
        }
        self.mounted
    }

    fn drag_begin(&mut self, handle: HandleKind, touches: &[TouchPoint]) -> bool {
        if !self.accepts_gestures(handle) {
            return false;
        }
        let began = self.gestures.on_drag_begin(handle, touches);
        if began {
            self.emit(SliderEvent::DragStarted { handle });
        }
        began
    }

    fn drag_move(&mut self, handle: HandleKind, touches: &[TouchPoint]) -> f64 {
        if !self.accepts_gestures(handle) {
            return 0.0;
        }
        let geometry = self.calibrator.geometry();
        let percent_delta = self.gestures.on_drag_move(handle, touches, geometry);
        if percent_delta != 0.0 {
            self.apply_delta(handle, percent_delta);
        }
        percent_delta
    }

    fn drag_end(&mut self, handle: HandleKind, touches: &[TouchPoint]) -> bool {
        if !self.accepts_gestures(handle) {
            return false;
        }
        let ended = self.gestures.on_drag_end(handle, touches);
        if ended {
            self.emit(SliderEvent::DragEnded { handle });
        }
        ended
    }

    fn handle_pointer(&mut self, handle: HandleKind, event: &PointerEvent) {
        match event.phase {
            PointerPhase::Begin => {
                self.drag_begin(handle, &event.touches);
            }
            PointerPhase::Move => {
                self.drag_move(handle, &event.touches);
            }
            PointerPhase::End | PointerPhase::Cancel => {
                self.drag_end(handle, &event.touches);
            }
        }
    }

    fn measure_track(&mut self) -> Option<f64> {
        let width_px = self.calibrator.measure(&self.track);
        if let Some(width_px) = width_px {
            self.emit(SliderEvent::TrackMeasured { width_px });
        }
        width_px
    }

    fn on_viewport_resize(&mut self, viewport: Viewport) -> Option<f64> {
        let width_px = self.calibrator.on_viewport_resize(viewport, &self.track);
        if let Some(width_px) = width_px {
            self.emit(SliderEvent::TrackMeasured { width_px });
        }
        width_px
    }

    pub(super) fn mount(&mut self) {
        self.mounted = true;
        debug!(title = %self.title, "range slider mounted");
        self.emit(SliderEvent::Mounted);
        if let Some(width_px) = self.calibrator.recalibrate(&self.track) {
            self.emit(SliderEvent::TrackMeasured { width_px });
        }
        self.observe_hour_changes();
    }

    pub(super) fn apply_requested_unmount(&mut self, requested: &Cell<bool>) {
        if requested.take() {
            self.unmount();
        }
    }

    pub(super) fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.gestures.reset();
        debug!(title = %self.title, "range slider unmounted");
        self.emit(SliderEvent::Unmounted);
    }
}

/// Owner callbacks and observers, borrowed only while delivering events.
#[derive(Default)]
pub(super) struct SliderListeners {
    on_start_changed: Option<HoursCallback>,
    on_end_changed: Option<HoursCallback>,
    pub(super) observers: Vec<Box<dyn SliderObserver>>,
}

impl SliderListeners {
    fn deliver(&mut self, event: SliderEvent, context: SliderContext) {
        match event {
            SliderEvent::StartHoursChanged { hours } => {
                if let Some(callback) = self.on_start_changed.as_mut() {
                    callback(hours);
                }
            }
            SliderEvent::EndHoursChanged { hours } => {
                if let Some(callback) = self.on_end_changed.as_mut() {
                    callback(hours);
                }
            }
            _ => {}
        }
        for observer in &mut self.observers {
            observer.on_event(event, context);
        }
    }
}

pub(super) struct SliderShared<T> {
    pub(super) core: RefCell<SliderCore<T>>,
    pub(super) listeners: RefCell<SliderListeners>,
    /// Set when teardown ran while `core` was borrowed; applied on next flush.
    pub(super) unmount_requested: Cell<bool>,
}

impl<T: TrackElement> SliderShared<T> {
    /// Drains queued events into owner callbacks and observers.
    ///
    /// Callbacks run with `core` released, so they may call back into the
    /// slider. Events queued by such nested calls are drained by the outermost
    /// delivery loop.
    pub(super) fn flush(&self) {
        let Ok(mut listeners) = self.listeners.try_borrow_mut() else {
            return;
        };
        loop {
            let pending = {
                let Ok(mut core) = self.core.try_borrow_mut() else {
                    trace!("slider state borrowed; delivery deferred");
                    return;
                };
                core.apply_requested_unmount(&self.unmount_requested);
                std::mem::take(&mut core.outbox)
            };
            if pending.is_empty() {
                break;
            }
            for (event, context) in pending {
                listeners.deliver(event, context);
            }
        }
    }

    fn update<O>(&self, operation: impl FnOnce(&mut SliderCore<T>) -> O) -> O {
        let output = operation(&mut self.core.borrow_mut());
        self.flush();
        output
    }

    /// Entry point for bus listeners; ignored once the slider is unmounted.
    pub(super) fn on_pointer_event(&self, handle: HandleKind, event: &PointerEvent) {
        {
            let Ok(mut core) = self.core.try_borrow_mut() else {
                debug!(?handle, "slider busy; dropping pointer event");
                return;
            };
            core.handle_pointer(handle, event);
        }
        self.flush();
    }
}

/// Dual-handle hour range control.
///
/// `RangeSlider` owns the handle percents, the gesture trackers and the cached
/// track geometry. Owners push authoritative hours with
/// [`RangeSlider::apply_external`] and receive quantized hours through the
/// start/end callbacks, which fire only when a derived hour actually changes.
///
/// The slider is externally controlled at rest and internally authoritative
/// while a handle is dragged: re-applying unchanged external hours never
/// resets a drag in progress.
pub struct RangeSlider<T: TrackElement> {
    pub(super) shared: Rc<SliderShared<T>>,
}

impl<T: TrackElement> RangeSlider<T> {
    #[must_use]
    pub fn new(track: T, config: RangeSliderConfig) -> Self {
        Self {
            shared: Rc::new(SliderShared {
                core: RefCell::new(SliderCore::new(track, config)),
                listeners: RefCell::new(SliderListeners::default()),
                unmount_requested: Cell::new(false),
            }),
        }
    }

    /// Sets the owner callback fired with each new start hour.
    #[must_use]
    pub fn with_on_start_changed(self, callback: impl FnMut(u32) + 'static) -> Self {
        self.shared.listeners.borrow_mut().on_start_changed = Some(Box::new(callback));
        self
    }

    /// Sets the owner callback fired with each new end hour.
    #[must_use]
    pub fn with_on_end_changed(self, callback: impl FnMut(u32) + 'static) -> Self {
        self.shared.listeners.borrow_mut().on_end_changed = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn title(&self) -> String {
        self.shared.core.borrow().title.clone()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.shared.core.borrow_mut().title = title.into();
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.shared.core.borrow().mounted
    }

    /// Syncs externally controlled hours into the slider.
    ///
    /// Handles whose hours equal the last observed external value are left
    /// alone. Returns `true` when a handle was re-seeded.
    pub fn apply_external(&self, start_hours: u32, end_hours: u32) -> bool {
        self.shared.update(|core| core.apply_external(start_hours, end_hours))
    }

    /// Moves one handle by `percent_delta` percent of the track.
    pub fn apply_delta(&self, handle: HandleKind, percent_delta: f64) -> DeltaOutcome {
        self.shared.update(|core| core.apply_delta(handle, percent_delta))
    }

    #[must_use]
    pub fn derive(&self) -> DerivedRange {
        self.shared.core.borrow().range.derive()
    }

    #[must_use]
    pub fn range_state(&self) -> RangeState {
        self.shared.core.borrow().range
    }

    #[must_use]
    pub fn drag_state(&self, handle: HandleKind) -> HandleDragState {
        self.shared.core.borrow().gestures.state(handle)
    }

    /// Starts tracking the first of `touches` on `handle`.
    ///
    /// Gesture entry points are inert unless the slider is mounted.
    pub fn drag_begin(&self, handle: HandleKind, touches: &[TouchPoint]) -> bool {
        self.shared.update(|core| core.drag_begin(handle, touches))
    }

    /// Feeds a move on `handle` and returns the applied percent delta.
    pub fn drag_move(&self, handle: HandleKind, touches: &[TouchPoint]) -> f64 {
        self.shared.update(|core| core.drag_move(handle, touches))
    }

    pub fn drag_end(&self, handle: HandleKind, touches: &[TouchPoint]) -> bool {
        self.shared.update(|core| core.drag_end(handle, touches))
    }

    /// Routes a raw pointer event to the matching drag operation.
    pub fn handle_pointer_event(&self, handle: HandleKind, event: &PointerEvent) {
        self.shared.update(|core| core.handle_pointer(handle, event));
    }

    #[must_use]
    pub fn track_geometry(&self) -> TrackGeometry {
        self.shared.core.borrow().calibrator.geometry()
    }

    /// Measures the track now. Returns `None` when measurement was skipped.
    pub fn measure_track(&self) -> Option<f64> {
        self.shared.update(SliderCore::measure_track)
    }

    /// Re-measures the track when the viewport width changed.
    pub fn on_viewport_resize(&self, viewport: Viewport) -> Option<f64> {
        self.shared.update(|core| core.on_viewport_resize(viewport))
    }

    /// Gives mutable access to the track element, e.g. to model a relayout.
    ///
    /// Slider state stays borrowed while `operation` runs, so it must not call
    /// back into this slider. Dropping a [`MountGuard`](super::MountGuard)
    /// inside it is fine: the unmount is applied once the borrow ends.
    pub fn with_track_mut<O>(&self, operation: impl FnOnce(&mut T) -> O) -> O {
        self.shared.update(|core| operation(&mut core.track))
    }
}

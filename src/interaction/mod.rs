use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{HandleKind, TrackGeometry};

/// Identifier reported for mouse pointers, which behave like a single touch.
pub const MOUSE_POINTER_ID: u64 = 0;

/// One pointer contact targeted at a handle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: u64,
    pub page_x: f64,
}

impl TouchPoint {
    #[must_use]
    pub fn new(id: u64, page_x: f64) -> Self {
        Self { id, page_x }
    }

    #[must_use]
    pub fn mouse(page_x: f64) -> Self {
        Self::new(MOUSE_POINTER_ID, page_x)
    }
}

/// Per-handle drag state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum HandleDragState {
    #[default]
    Idle,
    /// `last_x` is the reference point for the next incremental delta.
    Dragging { touch_id: u64, last_x: f64 },
}

impl HandleDragState {
    #[must_use]
    pub fn is_dragging(self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// Converts per-handle pointer displacement into incremental percent deltas.
///
/// The two handles run independent `Idle -> Dragging -> Idle` machines and
/// may be dragged at the same time. Each handle follows only the first touch
/// that landed on it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureTracker {
    start: HandleDragState,
    end: HandleDragState,
}

impl GestureTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self, handle: HandleKind) -> HandleDragState {
        match handle {
            HandleKind::Start => self.start,
            HandleKind::End => self.end,
        }
    }

    #[must_use]
    pub fn is_dragging(&self, handle: HandleKind) -> bool {
        self.state(handle).is_dragging()
    }

    fn state_mut(&mut self, handle: HandleKind) -> &mut HandleDragState {
        match handle {
            HandleKind::Start => &mut self.start,
            HandleKind::End => &mut self.end,
        }
    }

    /// Records the reference point for `handle`.
    ///
    /// Returns `true` when the handle entered `Dragging`. Extra touches on a
    /// handle that is already dragging are ignored.
    pub fn on_drag_begin(&mut self, handle: HandleKind, touches: &[TouchPoint]) -> bool {
        let state = self.state_mut(handle);
        if state.is_dragging() {
            trace!(?handle, "ignoring additional touch on dragging handle");
            return false;
        }
        let Some(touch) = touches.first() else {
            return false;
        };
        if !touch.page_x.is_finite() {
            debug!(?handle, page_x = touch.page_x, "ignoring non-finite drag begin");
            return false;
        }
        *state = HandleDragState::Dragging {
            touch_id: touch.id,
            last_x: touch.page_x,
        };
        debug!(?handle, touch_id = touch.id, page_x = touch.page_x, "drag begin");
        true
    }

    /// Returns the percent displacement since the previous event for `handle`.
    ///
    /// The reference point advances on every move, so deltas are incremental.
    /// Moves without a prior begin, without the tracked touch, with a
    /// non-finite coordinate or against unmeasured geometry yield `0.0`.
    pub fn on_drag_move(
        &mut self,
        handle: HandleKind,
        touches: &[TouchPoint],
        geometry: TrackGeometry,
    ) -> f64 {
        let state = self.state_mut(handle);
        let HandleDragState::Dragging { touch_id, last_x } = *state else {
            debug!(?handle, "drag move without begin");
            return 0.0;
        };
        let Some(touch) = touches.iter().find(|touch| touch.id == touch_id) else {
            trace!(?handle, touch_id, "move does not include tracked touch");
            return 0.0;
        };
        if !touch.page_x.is_finite() {
            debug!(?handle, page_x = touch.page_x, "ignoring non-finite drag move");
            return 0.0;
        }

        *state = HandleDragState::Dragging {
            touch_id,
            last_x: touch.page_x,
        };
        let percent_delta = geometry.pixels_to_percent(touch.page_x - last_x);
        trace!(?handle, pixel_delta = touch.page_x - last_x, percent_delta, "drag move");
        percent_delta
    }

    /// Returns `handle` to `Idle` when the tracked touch lifted.
    ///
    /// An empty `touches` list ends the drag unconditionally.
    pub fn on_drag_end(&mut self, handle: HandleKind, touches: &[TouchPoint]) -> bool {
        let state = self.state_mut(handle);
        let HandleDragState::Dragging { touch_id, .. } = *state else {
            return false;
        };
        if !touches.is_empty() && !touches.iter().any(|touch| touch.id == touch_id) {
            return false;
        }
        *state = HandleDragState::Idle;
        debug!(?handle, touch_id, "drag end");
        true
    }

    /// Drops both drag states without emitting deltas.
    pub fn reset(&mut self) {
        self.start = HandleDragState::Idle;
        self.end = HandleDragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::{GestureTracker, HandleDragState, TouchPoint};
    use crate::core::{HandleKind, TrackGeometry};

    #[test]
    fn second_touch_on_same_handle_does_not_steal_reference() {
        let geometry = TrackGeometry::from_width(200.0).expect("valid width");
        let mut tracker = GestureTracker::new();
        assert!(tracker.on_drag_begin(HandleKind::Start, &[TouchPoint::new(7, 10.0)]));
        assert!(!tracker.on_drag_begin(HandleKind::Start, &[TouchPoint::new(8, 150.0)]));

        let delta = tracker.on_drag_move(
            HandleKind::Start,
            &[TouchPoint::new(8, 170.0), TouchPoint::new(7, 30.0)],
            geometry,
        );
        assert!((delta - 10.0).abs() <= 1e-12);
    }

    #[test]
    fn end_with_foreign_touch_keeps_dragging() {
        let mut tracker = GestureTracker::new();
        tracker.on_drag_begin(HandleKind::End, &[TouchPoint::new(3, 0.0)]);
        assert!(!tracker.on_drag_end(HandleKind::End, &[TouchPoint::new(4, 0.0)]));
        assert!(tracker.is_dragging(HandleKind::End));
        assert!(tracker.on_drag_end(HandleKind::End, &[TouchPoint::new(3, 0.0)]));
        assert_eq!(tracker.state(HandleKind::End), HandleDragState::Idle);
    }
}

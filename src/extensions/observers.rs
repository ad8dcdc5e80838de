use serde::{Deserialize, Serialize};

use crate::core::HandleKind;

/// Read-only state snapshot passed to observer hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderContext {
    pub start_hours: u32,
    pub end_hours: u32,
    pub clamped_start_percent: f64,
    pub clamped_end_percent: f64,
    pub track_width_px: Option<f64>,
    pub start_dragging: bool,
    pub end_dragging: bool,
    pub mounted: bool,
}

/// Event stream exposed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SliderEvent {
    Mounted,
    Unmounted,
    TrackMeasured { width_px: f64 },
    DragStarted { handle: HandleKind },
    DragEnded { handle: HandleKind },
    ExternalApplied { start_hours: u32, end_hours: u32 },
    StartHoursChanged { hours: u32 },
    EndHoursChanged { hours: u32 },
}

/// Observation hook for diagnostics and host integrations.
///
/// Observers see every event after the owner callbacks ran and cannot mutate
/// slider internals.
pub trait SliderObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: SliderEvent, context: SliderContext);
}

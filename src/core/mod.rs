pub mod geometry;
pub mod hour_scale;
pub mod range_state;
pub mod types;

pub use geometry::{GeometryCalibrator, StaticTrack, TrackElement, TrackGeometry};
pub use hour_scale::{
    FULL_TRACK_PERCENT, HOURS_PER_TRACK, clamp_percent, format_hour_label, hours_to_percent,
    percent_to_hours,
};
pub use range_state::{DeltaOutcome, DerivedRange, InvertedRangePolicy, RangeState};
pub use types::{HandleKind, Viewport};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::Viewport;
use crate::core::hour_scale::FULL_TRACK_PERCENT;
use crate::error::{SliderError, SliderResult};

/// Host-side view of the track rail.
///
/// Implemented by whatever owns the rendered rail (a DOM node, a toolkit
/// widget, a test double). Returns `None` while the rail is not attached.
pub trait TrackElement {
    fn measured_width_px(&self) -> Option<f64>;
}

/// Fixed-width track used by headless hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StaticTrack {
    width_px: Option<f64>,
}

impl StaticTrack {
    #[must_use]
    pub fn new(width_px: f64) -> Self {
        Self {
            width_px: Some(width_px),
        }
    }

    /// Track that is not yet attached; measurement is skipped.
    #[must_use]
    pub fn detached() -> Self {
        Self { width_px: None }
    }

    pub fn set_width(&mut self, width_px: f64) {
        self.width_px = Some(width_px);
    }

    pub fn detach(&mut self) {
        self.width_px = None;
    }
}

impl TrackElement for StaticTrack {
    fn measured_width_px(&self) -> Option<f64> {
        self.width_px
    }
}

/// Cached track width used for pixel <-> percent conversion.
///
/// Unmeasured geometry makes every pixel delta inert.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackGeometry {
    width_px: Option<f64>,
}

impl TrackGeometry {
    #[must_use]
    pub fn unmeasured() -> Self {
        Self { width_px: None }
    }

    pub fn from_width(width_px: f64) -> SliderResult<Self> {
        if !is_usable_width(width_px) {
            return Err(SliderError::InvalidTrackWidth { width: width_px });
        }
        Ok(Self {
            width_px: Some(width_px),
        })
    }

    #[must_use]
    pub fn width_px(self) -> Option<f64> {
        self.width_px
    }

    #[must_use]
    pub fn is_measured(self) -> bool {
        self.width_px.is_some()
    }

    /// Converts a horizontal pixel displacement into percent-of-track.
    #[must_use]
    pub fn pixels_to_percent(self, pixel_delta: f64) -> f64 {
        match self.width_px {
            Some(width) if pixel_delta.is_finite() => pixel_delta / width * FULL_TRACK_PERCENT,
            _ => 0.0,
        }
    }

    /// Maps a percent-of-track to an x offset inside the rail.
    #[must_use]
    pub fn percent_to_pixel(self, percent: f64) -> Option<f64> {
        self.width_px.map(|width| percent / FULL_TRACK_PERCENT * width)
    }
}

fn is_usable_width(width_px: f64) -> bool {
    width_px.is_finite() && width_px > 0.0
}

/// Owns the cached [`TrackGeometry`] and decides when to re-measure.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeometryCalibrator {
    geometry: TrackGeometry,
    last_viewport_width: Option<u32>,
}

impl GeometryCalibrator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn geometry(&self) -> TrackGeometry {
        self.geometry
    }

    #[must_use]
    pub fn last_viewport_width(&self) -> Option<u32> {
        self.last_viewport_width
    }

    /// Measures `track` and replaces the cached geometry.
    ///
    /// Returns the new width, or `None` when measurement was skipped and the
    /// previous geometry is retained.
    pub fn measure<T: TrackElement + ?Sized>(&mut self, track: &T) -> Option<f64> {
        let Some(width_px) = track.measured_width_px() else {
            debug!("track not attached; keeping previous geometry");
            return None;
        };
        if !is_usable_width(width_px) {
            warn!(width_px, "track reported unusable width; keeping previous geometry");
            return None;
        }
        self.geometry = TrackGeometry {
            width_px: Some(width_px),
        };
        debug!(width_px, "track measured");
        Some(width_px)
    }

    /// Drops the cached geometry and viewport width, then measures afresh.
    pub fn recalibrate<T: TrackElement + ?Sized>(&mut self, track: &T) -> Option<f64> {
        self.geometry = TrackGeometry::unmeasured();
        self.last_viewport_width = None;
        self.measure(track)
    }

    /// Re-measures when the viewport width differs from the last one seen.
    ///
    /// Height-only changes never trigger a measurement.
    pub fn on_viewport_resize<T: TrackElement + ?Sized>(
        &mut self,
        viewport: Viewport,
        track: &T,
    ) -> Option<f64> {
        if self.last_viewport_width == Some(viewport.width) {
            return None;
        }
        self.last_viewport_width = Some(viewport.width);
        self.measure(track)
    }
}

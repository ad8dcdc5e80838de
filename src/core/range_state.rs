use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::HandleKind;
use crate::core::hour_scale::{
    clamp_percent, format_hour_label, hours_to_percent, percent_to_hours,
};

/// How the control treats a start handle that ends up right of the end handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InvertedRangePolicy {
    /// Inverted ranges are surfaced to the owner as-is.
    #[default]
    Permissive,
    /// Derived output is reordered so start never exceeds end.
    Swap,
    /// A handle dragged toward the other one stops at it instead of passing.
    Reject,
}

/// Result of feeding one percent delta into [`RangeState::apply_delta`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeltaOutcome {
    Applied,
    /// Moved, but pinned to the other handle by [`InvertedRangePolicy::Reject`].
    Pinned,
    /// Non-finite delta; state untouched.
    Ignored,
    /// Discarded by [`InvertedRangePolicy::Reject`]; the handle could not move.
    Rejected,
}

impl DeltaOutcome {
    /// `true` when the handle position changed.
    #[must_use]
    pub fn moved(self) -> bool {
        matches!(self, Self::Applied | Self::Pinned)
    }
}

/// Clamped, quantized view of a [`RangeState`]. Recomputed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRange {
    pub clamped_start_percent: f64,
    pub clamped_end_percent: f64,
    pub start_hours: u32,
    pub end_hours: u32,
    pub start_label: String,
    pub end_label: String,
}

impl DerivedRange {
    #[must_use]
    pub fn hours(&self) -> (u32, u32) {
        (self.start_hours, self.end_hours)
    }

    #[must_use]
    pub fn hours_for(&self, handle: HandleKind) -> u32 {
        match handle {
            HandleKind::Start => self.start_hours,
            HandleKind::End => self.end_hours,
        }
    }

    #[must_use]
    pub fn clamped_percent_for(&self, handle: HandleKind) -> f64 {
        match handle {
            HandleKind::Start => self.clamped_start_percent,
            HandleKind::End => self.clamped_end_percent,
        }
    }

    #[must_use]
    pub fn label_for(&self, handle: HandleKind) -> &str {
        match handle {
            HandleKind::Start => &self.start_label,
            HandleKind::End => &self.end_label,
        }
    }

    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.clamped_start_percent > self.clamped_end_percent
    }
}

/// Authoritative handle positions plus shadow copies of the last external hours.
///
/// Percents are never clamped here and may sit outside `[0, 100]` mid-drag;
/// only [`RangeState::derive`] clamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeState {
    start_percent: f64,
    end_percent: f64,
    last_external_start: u32,
    last_external_end: u32,
    inverted_range_policy: InvertedRangePolicy,
}

impl RangeState {
    #[must_use]
    pub fn new(start_hours: u32, end_hours: u32) -> Self {
        Self {
            start_percent: hours_to_percent(start_hours),
            end_percent: hours_to_percent(end_hours),
            last_external_start: start_hours,
            last_external_end: end_hours,
            inverted_range_policy: InvertedRangePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_inverted_range_policy(mut self, policy: InvertedRangePolicy) -> Self {
        self.inverted_range_policy = policy;
        self
    }

    #[must_use]
    pub fn inverted_range_policy(self) -> InvertedRangePolicy {
        self.inverted_range_policy
    }

    #[must_use]
    pub fn percent(self, handle: HandleKind) -> f64 {
        match handle {
            HandleKind::Start => self.start_percent,
            HandleKind::End => self.end_percent,
        }
    }

    #[must_use]
    pub fn last_external_hours(self) -> (u32, u32) {
        (self.last_external_start, self.last_external_end)
    }

    /// Re-seeds handles whose externally supplied hours changed.
    ///
    /// Each handle is compared against its own shadow copy, so an owner
    /// echoing an unchanged value never disturbs a drag in progress.
    /// Returns `true` when at least one handle was reset.
    pub fn apply_external(&mut self, start_hours: u32, end_hours: u32) -> bool {
        let mut reset = false;
        if start_hours != self.last_external_start {
            self.start_percent = hours_to_percent(start_hours);
            self.last_external_start = start_hours;
            reset = true;
        }
        if end_hours != self.last_external_end {
            self.end_percent = hours_to_percent(end_hours);
            self.last_external_end = end_hours;
            reset = true;
        }
        if reset {
            debug!(start_hours, end_hours, "external hours re-seeded range");
        }
        reset
    }

    /// Accumulates an incremental percent delta onto one handle, unclamped.
    pub fn apply_delta(&mut self, handle: HandleKind, percent_delta: f64) -> DeltaOutcome {
        if !percent_delta.is_finite() {
            debug!(?handle, percent_delta, "ignoring non-finite percent delta");
            return DeltaOutcome::Ignored;
        }

        let current = self.percent(handle);
        let mut candidate = current + percent_delta;
        let mut outcome = DeltaOutcome::Applied;
        if self.inverted_range_policy == InvertedRangePolicy::Reject
            && widens_inversion(handle, candidate, self.percent(handle.other()), percent_delta)
        {
            let limit = clamp_percent(self.percent(handle.other()));
            let can_reach_limit = match handle {
                HandleKind::Start => current < limit,
                HandleKind::End => current > limit,
            };
            if !can_reach_limit {
                debug!(?handle, percent_delta, "rejecting delta that inverts range");
                return DeltaOutcome::Rejected;
            }
            debug!(?handle, percent_delta, limit, "pinning handle to the other handle");
            candidate = limit;
            outcome = DeltaOutcome::Pinned;
        }

        match handle {
            HandleKind::Start => self.start_percent = candidate,
            HandleKind::End => self.end_percent = candidate,
        }
        outcome
    }

    #[must_use]
    pub fn derive(&self) -> DerivedRange {
        let mut start = clamp_percent(self.start_percent);
        let mut end = clamp_percent(self.end_percent);
        if self.inverted_range_policy == InvertedRangePolicy::Swap && start > end {
            std::mem::swap(&mut start, &mut end);
        }

        let start_hours = percent_to_hours(start);
        let end_hours = percent_to_hours(end);
        DerivedRange {
            clamped_start_percent: start,
            clamped_end_percent: end,
            start_hours,
            end_hours,
            start_label: format_hour_label(start_hours),
            end_label: format_hour_label(end_hours),
        }
    }
}

fn widens_inversion(
    handle: HandleKind,
    candidate_percent: f64,
    other_percent: f64,
    percent_delta: f64,
) -> bool {
    let candidate = clamp_percent(candidate_percent);
    let other = clamp_percent(other_percent);
    match handle {
        HandleKind::Start => candidate > other && percent_delta > 0.0,
        HandleKind::End => candidate < other && percent_delta < 0.0,
    }
}

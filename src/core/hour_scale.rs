//! Percent-of-track <-> hour quantization.
//!
//! Hours are derived with `f64::round`, which rounds half away from zero.
//! Inputs are clamped to `[0, 100]` first, so the sign never matters and the
//! result matches a round-half-up rule: 6.25% (1.5h) maps to hour 2.
//!
//! `hours_to_percent` followed by `percent_to_hours` is exact for every
//! integer hour in `[0, 24]`; the float error of `h / 24 * 100 * 24 / 100`
//! stays far below the 0.5 rounding threshold.

/// Number of hours spanned by a full track.
pub const HOURS_PER_TRACK: u32 = 24;

/// Percent value of the right track edge.
pub const FULL_TRACK_PERCENT: f64 = 100.0;

#[must_use]
pub fn hours_to_percent(hours: u32) -> f64 {
    f64::from(hours) / f64::from(HOURS_PER_TRACK) * FULL_TRACK_PERCENT
}

/// Clamps a raw handle percent to the visible track.
///
/// NaN collapses to the left edge.
#[must_use]
pub fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, FULL_TRACK_PERCENT)
}

/// Quantizes a percent to a whole hour in `[0, 24]`.
#[must_use]
pub fn percent_to_hours(percent: f64) -> u32 {
    let hours = (clamp_percent(percent) * f64::from(HOURS_PER_TRACK) / FULL_TRACK_PERCENT).round();
    // Clamped input keeps `hours` within [0, 24].
    hours as u32
}

/// Formats an hour as a zero-padded `HH:00` label.
#[must_use]
pub fn format_hour_label(hours: u32) -> String {
    format!("{hours:02}:00")
}

//! time-range-slider: headless dual-handle hour range control.
//!
//! The crate converts raw pointer/touch drags into a bounded hour range,
//! keeps two independently draggable handles consistent, reconciles
//! externally supplied hours with live drag state and re-calibrates track
//! geometry on viewport resize. Drawing is left to host UIs via
//! backend-agnostic render frames.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod platform;
pub mod render;
pub mod telemetry;

pub use api::{RangeSlider, RangeSliderConfig};
pub use error::{SliderError, SliderResult};

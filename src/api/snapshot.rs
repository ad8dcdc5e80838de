use serde::{Deserialize, Serialize};

use crate::core::{DerivedRange, HandleKind, InvertedRangePolicy, TrackElement};
use crate::error::{SliderError, SliderResult};

use super::RangeSlider;

pub const SLIDER_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderSnapshot {
    pub title: String,
    pub start_percent: f64,
    pub end_percent: f64,
    pub last_external_start_hours: u32,
    pub last_external_end_hours: u32,
    pub derived: DerivedRange,
    pub track_width_px: Option<f64>,
    pub start_dragging: bool,
    pub end_dragging: bool,
    pub mounted: bool,
    pub inverted_range_policy: InvertedRangePolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: SliderSnapshot,
}

impl SliderSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> SliderResult<String> {
        let payload = SliderSnapshotJsonContractV1 {
            schema_version: SLIDER_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            SliderError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts both a bare snapshot and a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> SliderResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<SliderSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: SliderSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            SliderError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != SLIDER_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(SliderError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<T: TrackElement> RangeSlider<T> {
    #[must_use]
    pub fn snapshot(&self) -> SliderSnapshot {
        let core = self.shared.core.borrow();
        let (last_external_start_hours, last_external_end_hours) =
            core.range.last_external_hours();
        SliderSnapshot {
            title: core.title.clone(),
            start_percent: core.range.percent(HandleKind::Start),
            end_percent: core.range.percent(HandleKind::End),
            last_external_start_hours,
            last_external_end_hours,
            derived: core.range.derive(),
            track_width_px: core.calibrator.geometry().width_px(),
            start_dragging: core.gestures.is_dragging(HandleKind::Start),
            end_dragging: core.gestures.is_dragging(HandleKind::End),
            mounted: core.mounted,
            inverted_range_policy: core.range.inverted_range_policy(),
        }
    }

    pub fn snapshot_json_contract_v1_pretty(&self) -> SliderResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}

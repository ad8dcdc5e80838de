use serde::{Deserialize, Serialize};

use crate::core::InvertedRangePolicy;
use crate::error::{SliderError, SliderResult};

/// Public slider bootstrap configuration.
///
/// Serializable so host applications can persist or ship filter setups
/// without inventing their own format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSliderConfig {
    /// Display label, passed through unmodified.
    pub title: String,
    /// Initial externally controlled start hour.
    ///
    /// Values above 24 are accepted; derivation clamps them to hour 24.
    pub current_start_hours: u32,
    /// Initial externally controlled end hour.
    pub current_end_hours: u32,
    #[serde(default)]
    pub inverted_range_policy: InvertedRangePolicy,
    /// Notify the owner with the initial hours right after mount.
    #[serde(default)]
    pub notify_on_mount: bool,
}

impl RangeSliderConfig {
    #[must_use]
    pub fn new(title: impl Into<String>, current_start_hours: u32, current_end_hours: u32) -> Self {
        Self {
            title: title.into(),
            current_start_hours,
            current_end_hours,
            inverted_range_policy: InvertedRangePolicy::default(),
            notify_on_mount: false,
        }
    }

    #[must_use]
    pub fn with_inverted_range_policy(mut self, policy: InvertedRangePolicy) -> Self {
        self.inverted_range_policy = policy;
        self
    }

    #[must_use]
    pub fn with_notify_on_mount(mut self, notify_on_mount: bool) -> Self {
        self.notify_on_mount = notify_on_mount;
        self
    }

    pub fn from_json_str(input: &str) -> SliderResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            SliderError::InvalidData(format!("failed to parse slider config json: {e}"))
        })
    }

    pub fn to_json_pretty(&self) -> SliderResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            SliderError::InvalidData(format!("failed to serialize slider config json: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::RangeSliderConfig;
    use crate::core::InvertedRangePolicy;

    #[test]
    fn optional_fields_fall_back_to_defaults() {
        let config = RangeSliderConfig::from_json_str(
            r#"{"title":"Departure","current_start_hours":0,"current_end_hours":24}"#,
        )
        .expect("minimal config");
        assert_eq!(config.inverted_range_policy, InvertedRangePolicy::Permissive);
        assert!(!config.notify_on_mount);
    }

    #[test]
    fn malformed_config_is_invalid_data() {
        let err = RangeSliderConfig::from_json_str(r#"{"title":1}"#).expect_err("must fail");
        assert!(format!("{err}").contains("slider config json"));
    }
}

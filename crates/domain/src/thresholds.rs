//! Threshold configuration — the trip points for the automatic LED/fan
//! control.
//!
//! The two thresholds are independent controls; no ordering between them is
//! enforced.

use serde::{Deserialize, Serialize};

use crate::snapshot::lenient;

/// Configured trip points, in °C. Both comparisons are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Temperature at or above which the LED turns on.
    pub temperature_led: f64,
    /// Temperature at or above which the fan runs at full speed.
    pub temperature_fan: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            temperature_led: 30.0,
            temperature_fan: 28.0,
        }
    }
}

impl ThresholdConfig {
    /// Apply a partial update; fields absent from `update` keep their value.
    pub fn apply(&mut self, update: &ThresholdUpdate) {
        if let Some(value) = update.temperature_led {
            self.temperature_led = value;
        }
        if let Some(value) = update.temperature_fan {
            self.temperature_fan = value;
        }
    }
}

/// A partial threshold update, as received from the configuration API.
///
/// Unrecognized keys are ignored; recognized values are coerced to float
/// (plain numbers or decimal text).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ThresholdUpdate {
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub temperature_led: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub temperature_fan: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_led_30_fan_28() {
        let config = ThresholdConfig::default();
        assert_eq!(config.temperature_led, 30.0);
        assert_eq!(config.temperature_fan, 28.0);
    }

    #[test]
    fn should_apply_partial_update_and_keep_other_field() {
        let mut config = ThresholdConfig::default();
        config.apply(&ThresholdUpdate {
            temperature_fan: Some(25.0),
            ..ThresholdUpdate::default()
        });
        assert_eq!(config.temperature_fan, 25.0);
        assert_eq!(config.temperature_led, 30.0);
    }

    #[test]
    fn should_apply_empty_update_as_no_op() {
        let mut config = ThresholdConfig::default();
        config.apply(&ThresholdUpdate::default());
        assert_eq!(config, ThresholdConfig::default());
    }

    #[test]
    fn should_parse_update_with_unrecognized_keys() {
        let update: ThresholdUpdate =
            serde_json::from_str(r#"{"temperature_fan": 25.0, "brightness": 80}"#).unwrap();
        assert_eq!(update.temperature_fan, Some(25.0));
        assert_eq!(update.temperature_led, None);
    }

    #[test]
    fn should_coerce_decimal_text_in_update() {
        let update: ThresholdUpdate =
            serde_json::from_str(r#"{"temperature_led": "31.5"}"#).unwrap();
        assert_eq!(update.temperature_led, Some(31.5));
    }
}

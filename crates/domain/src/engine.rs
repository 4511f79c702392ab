//! Threshold engine — the pure decision function mapping a temperature
//! reading to actuator targets.
//!
//! No IO, no mutable state. When no temperature has been observed yet the
//! engine has no opinion: callers must preserve the current actuator state
//! rather than resetting to off.

use crate::thresholds::ThresholdConfig;

/// Actuator targets derived from one temperature reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorDecision {
    /// Whether the LED should be lit.
    pub led_on: bool,
    /// Fan duty cycle in percent (`0` or `100`).
    pub fan_speed: u8,
}

/// Decide actuator targets for the given temperature.
///
/// Returns `None` when `temperature` is absent — no opinion, leave the
/// current actuator state untouched. Both comparisons are inclusive, so a
/// boundary-equal temperature trips the corresponding actuator on.
#[must_use]
pub fn decide(temperature: Option<f64>, thresholds: &ThresholdConfig) -> Option<ActuatorDecision> {
    let temperature = temperature?;
    Some(ActuatorDecision {
        led_on: temperature >= thresholds.temperature_led,
        fan_speed: if temperature >= thresholds.temperature_fan {
            100
        } else {
            0
        },
    })
}

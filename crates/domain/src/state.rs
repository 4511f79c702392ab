//! Device state — the authoritative in-memory view of the simulated device.
//!
//! Sensor fields (`temperature`, `humidity`, `pressure`) are owned by the
//! external ingestion side and absent until the first reading arrives.
//! Actuator fields (`led`, `fan`) are owned by this system and always
//! present. `fan_status` is derived and must be recomputed after every
//! mutation that can touch the fan speed.

use serde::{Deserialize, Serialize};

use crate::snapshot::Snapshot;

/// The LED actuator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Led {
    /// GPIO identifier on the simulated device (e.g. `extraLed`).
    pub id: String,
    /// Whether the LED is lit.
    pub value: bool,
}

impl Default for Led {
    fn default() -> Self {
        Self {
            id: "extraLed".to_string(),
            value: false,
        }
    }
}

/// The fan actuator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fan {
    /// GPIO identifier on the simulated device (e.g. `fan0`).
    pub id: String,
    /// Duty cycle in percent, `0..=100`.
    pub speed: u8,
}

impl Fan {
    /// Whether the fan is currently spinning.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.speed > 0
    }
}

impl Default for Fan {
    fn default() -> Self {
        Self {
            id: "fan0".to_string(),
            speed: 0,
        }
    }
}

/// Derived fan status, recomputed on every reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FanStatus {
    Running,
    #[default]
    Stopped,
}

impl std::fmt::Display for FanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Running => f.write_str("Running"),
            Self::Stopped => f.write_str("Stopped"),
        }
    }
}

/// The authoritative in-memory snapshot of the device.
///
/// Created once at process start with neutral values, mutated only inside
/// the reconciler's critical section, alive for the process lifetime.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeviceState {
    /// Last observed temperature in °C, absent until the first sensor read.
    pub temperature: Option<f64>,
    /// Relative humidity in percent, present in some configurations.
    pub humidity: Option<f64>,
    /// Barometric pressure in hPa, present in some configurations.
    pub pressure: Option<f64>,
    /// LED actuator, never absent.
    pub led: Led,
    /// Fan actuator, never absent.
    pub fan: Fan,
    /// Derived from `fan.speed`; `Running` iff the speed is non-zero.
    pub fan_status: FanStatus,
}

impl DeviceState {
    /// Merge an incoming snapshot using the per-field rule table.
    ///
    /// Scalar sensor fields present in `incoming` replace the stored value;
    /// structured actuator fields merge field-by-field (present fields
    /// overwrite, absent fields are preserved). The `thresholds` and
    /// `fan_status` keys are never merged here: thresholds are routed to
    /// [`ThresholdConfig`](crate::thresholds::ThresholdConfig) by the
    /// caller, and the status is derived.
    ///
    /// Merging an empty snapshot is a no-op, and merging the same snapshot
    /// twice is equivalent to merging it once.
    pub fn merge(&mut self, incoming: &Snapshot) {
        if let Some(value) = incoming.temperature {
            self.temperature = Some(value);
        }
        if let Some(value) = incoming.humidity {
            self.humidity = Some(value);
        }
        if let Some(value) = incoming.pressure {
            self.pressure = Some(value);
        }
        if let Some(led) = &incoming.led {
            if let Some(id) = &led.id {
                self.led.id.clone_from(id);
            }
            if let Some(value) = led.value {
                self.led.value = value;
            }
        }
        if let Some(fan) = &incoming.fan {
            if let Some(id) = &fan.id {
                self.fan.id.clone_from(id);
            }
            if let Some(speed) = fan.speed {
                self.fan.speed = speed.min(100);
            }
        }
        self.refresh_fan_status();
    }

    /// Recompute the derived fan status from the current fan speed.
    pub fn refresh_fan_status(&mut self) {
        self.fan_status = if self.fan.is_running() {
            FanStatus::Running
        } else {
            FanStatus::Stopped
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{FanPatch, LedPatch};

    fn populated() -> DeviceState {
        let mut state = DeviceState {
            temperature: Some(21.0),
            humidity: Some(40.0),
            led: Led {
                id: "extraLed".to_string(),
                value: true,
            },
            fan: Fan {
                id: "fan0".to_string(),
                speed: 100,
            },
            ..DeviceState::default()
        };
        state.refresh_fan_status();
        state
    }

    #[test]
    fn should_default_to_neutral_actuators() {
        let state = DeviceState::default();
        assert_eq!(state.temperature, None);
        assert!(!state.led.value);
        assert_eq!(state.fan.speed, 0);
        assert_eq!(state.fan_status, FanStatus::Stopped);
    }

    #[test]
    fn should_not_change_anything_when_merging_empty_snapshot() {
        let mut state = populated();
        let before = state.clone();
        state.merge(&Snapshot::default());
        assert_eq!(state, before);
    }

    #[test]
    fn should_preserve_actuators_when_merging_sensor_only_snapshot() {
        let mut state = populated();
        let incoming = Snapshot {
            temperature: Some(22.5),
            ..Snapshot::default()
        };
        state.merge(&incoming);
        assert_eq!(state.temperature, Some(22.5));
        assert!(state.led.value);
        assert_eq!(state.fan.speed, 100);
        assert_eq!(state.humidity, Some(40.0));
    }

    #[test]
    fn should_be_idempotent_when_merging_same_snapshot_twice() {
        let mut once = populated();
        let incoming = Snapshot {
            temperature: Some(30.0),
            led: Some(LedPatch {
                id: None,
                value: Some(false),
            }),
            fan: Some(FanPatch {
                id: None,
                speed: Some(50),
            }),
            ..Snapshot::default()
        };
        once.merge(&incoming);
        let mut twice = once.clone();
        twice.merge(&incoming);
        assert_eq!(once, twice);
    }

    #[test]
    fn should_merge_structured_fields_field_by_field() {
        let mut state = populated();
        let incoming = Snapshot {
            fan: Some(FanPatch {
                id: None,
                speed: Some(0),
            }),
            ..Snapshot::default()
        };
        state.merge(&incoming);
        assert_eq!(state.fan.id, "fan0");
        assert_eq!(state.fan.speed, 0);
        assert_eq!(state.fan_status, FanStatus::Stopped);
    }

    #[test]
    fn should_clamp_merged_fan_speed_to_100() {
        let mut state = DeviceState::default();
        let incoming = Snapshot {
            fan: Some(FanPatch {
                id: None,
                speed: Some(250),
            }),
            ..Snapshot::default()
        };
        state.merge(&incoming);
        assert_eq!(state.fan.speed, 100);
    }

    #[test]
    fn should_derive_running_status_for_any_positive_speed() {
        let mut state = DeviceState::default();
        for speed in [1, 50, 100] {
            state.fan.speed = speed;
            state.refresh_fan_status();
            assert_eq!(state.fan_status, FanStatus::Running);
        }
        state.fan.speed = 0;
        state.refresh_fan_status();
        assert_eq!(state.fan_status, FanStatus::Stopped);
    }

    #[test]
    fn should_serialize_fan_status_as_capitalized_word() {
        let json = serde_json::to_string(&FanStatus::Running).unwrap();
        assert_eq!(json, "\"Running\"");
        let json = serde_json::to_string(&FanStatus::Stopped).unwrap();
        assert_eq!(json, "\"Stopped\"");
    }

    #[test]
    fn should_serialize_absent_sensors_as_null() {
        let state = DeviceState::default();
        let value = serde_json::to_value(&state).unwrap();
        assert!(value["temperature"].is_null());
        assert_eq!(value["led"]["id"], "extraLed");
        assert_eq!(value["fan"]["speed"], 0);
        assert_eq!(value["fan_status"], "Stopped");
    }
}

//! Snapshot — the flat persisted document shared with the sensor ingestion
//! side.
//!
//! The file is co-owned: the ingestion process writes sensor keys, this
//! system writes actuator keys and thresholds. Every field is therefore
//! optional on read — a snapshot holding only `temperature` is the common
//! case, not an error.
//!
//! The ingestion side writes numbers as decimal text in some configurations,
//! so scalar fields accept both JSON numbers and numeric strings.

use serde::{Deserialize, Serialize};

use crate::state::{DeviceState, FanStatus};
use crate::thresholds::ThresholdConfig;

/// Partial update for the LED actuator as found in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<bool>,
}

/// Partial update for the fan actuator as found in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FanPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_speed")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<u8>,
}

/// The persisted flat document: device state fields plus thresholds.
///
/// Unknown keys are ignored on read. `fan_status` is write-only — it is
/// derived state and recomputed from the fan speed after every merge.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub led: Option<LedPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fan: Option<FanPatch>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub fan_status: Option<FanStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<ThresholdConfig>,
}

impl Snapshot {
    /// Capture the current device state and thresholds as a full snapshot,
    /// ready to be persisted.
    #[must_use]
    pub fn capture(device: &DeviceState, thresholds: &ThresholdConfig) -> Self {
        Self {
            temperature: device.temperature,
            humidity: device.humidity,
            pressure: device.pressure,
            led: Some(LedPatch {
                id: Some(device.led.id.clone()),
                value: Some(device.led.value),
            }),
            fan: Some(FanPatch {
                id: Some(device.fan.id.clone()),
                speed: Some(device.fan.speed),
            }),
            fan_status: Some(device.fan_status),
            thresholds: Some(thresholds.clone()),
        }
    }
}

pub(crate) mod lenient {
    //! Deserializers accepting the loosely-typed values the ingestion side
    //! produces (decimal text, stringly booleans).

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Number(f64),
        Text(String),
    }

    fn to_f64<E: serde::de::Error>(scalar: Scalar) -> Result<f64, E> {
        match scalar {
            Scalar::Number(value) => Ok(value),
            Scalar::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid decimal text {text:?}"))),
        }
    }

    pub(crate) fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Scalar>::deserialize(deserializer)?
            .map(to_f64)
            .transpose()
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub(crate) fn opt_speed<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(scalar) = Option::<Scalar>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let value = to_f64::<D::Error>(scalar)?.round();
        if !(0.0..=f64::from(u8::MAX)).contains(&value) {
            return Err(D::Error::custom(format!("fan speed {value} out of range")));
        }
        Ok(Some(value as u8))
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Number(i64),
        Text(String),
    }

    pub(crate) fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(flag) = Option::<Flag>::deserialize(deserializer)? else {
            return Ok(None);
        };
        match flag {
            Flag::Bool(value) => Ok(Some(value)),
            Flag::Number(value) => Ok(Some(value != 0)),
            Flag::Text(text) => match text.trim() {
                "true" | "True" | "1" => Ok(Some(true)),
                "false" | "False" | "0" => Ok(Some(false)),
                other => Err(D::Error::custom(format!("invalid boolean text {other:?}"))),
            },
        }
    }
}

//! Pollutant Readings - Request-scoped input
//!
//! Each request owns its readings. They are never stored in shared state,
//! so concurrent requests cannot observe each other's values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::layout::{Pollutant, FEATURE_COUNT};
use crate::error::{AqiError, AqiResult};

/// A single measured value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PollutantReading {
    pub pollutant: Pollutant,
    pub value: f64,
}

impl PollutantReading {
    /// Validated constructor: value must be finite and non-negative
    pub fn new(pollutant: Pollutant, value: f64) -> AqiResult<Self> {
        if !value.is_finite() {
            return Err(AqiError::invalid_input(format!(
                "{} must be a finite number",
                pollutant
            )));
        }
        if value < 0.0 {
            return Err(AqiError::invalid_input(format!(
                "{} must be non-negative, got {}",
                pollutant, value
            )));
        }
        Ok(Self { pollutant, value })
    }
}

/// Exactly one reading per pollutant, stored in layout order
///
/// Serialized as a plain array in layout order; deserialization validates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; FEATURE_COUNT]", into = "[f64; FEATURE_COUNT]")]
pub struct PollutantReadings {
    values: [f64; FEATURE_COUNT],
}

impl PollutantReadings {
    /// Build from the six values in layout order
    pub fn new(pm25: f64, pm10: f64, no2: f64, so2: f64, co: f64, o3: f64) -> AqiResult<Self> {
        Self::from_array([pm25, pm10, no2, so2, co, o3])
    }

    /// Build from a raw array in layout order
    pub fn from_array(values: [f64; FEATURE_COUNT]) -> AqiResult<Self> {
        for p in Pollutant::ALL {
            PollutantReading::new(p, values[p.index()])?;
        }
        Ok(Self { values })
    }

    /// Build from individual readings in any order
    ///
    /// Every pollutant must appear exactly once.
    pub fn from_readings<I>(readings: I) -> AqiResult<Self>
    where
        I: IntoIterator<Item = PollutantReading>,
    {
        let mut slots: [Option<f64>; FEATURE_COUNT] = [None; FEATURE_COUNT];

        for reading in readings {
            let checked = PollutantReading::new(reading.pollutant, reading.value)?;
            let slot = &mut slots[checked.pollutant.index()];
            if slot.is_some() {
                return Err(AqiError::invalid_input(format!(
                    "duplicate reading for {}",
                    checked.pollutant
                )));
            }
            *slot = Some(checked.value);
        }

        let mut values = [0.0; FEATURE_COUNT];
        let mut missing = Vec::new();
        for p in Pollutant::ALL {
            match slots[p.index()] {
                Some(v) => values[p.index()] = v,
                None => missing.push(p.as_str()),
            }
        }

        if !missing.is_empty() {
            return Err(AqiError::invalid_input(format!(
                "missing readings: {}",
                missing.join(", ")
            )));
        }

        Ok(Self { values })
    }

    /// Value for a pollutant
    pub fn get(&self, pollutant: Pollutant) -> f64 {
        self.values[pollutant.index()]
    }

    /// Raw feature vector in layout order
    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// Iterate readings in layout order
    pub fn iter(&self) -> impl Iterator<Item = PollutantReading> + '_ {
        Pollutant::ALL.iter().map(move |&p| PollutantReading {
            pollutant: p,
            value: self.values[p.index()],
        })
    }
}

impl TryFrom<[f64; FEATURE_COUNT]> for PollutantReadings {
    type Error = AqiError;

    fn try_from(values: [f64; FEATURE_COUNT]) -> Result<Self, Self::Error> {
        Self::from_array(values)
    }
}

impl From<PollutantReadings> for [f64; FEATURE_COUNT] {
    fn from(readings: PollutantReadings) -> Self {
        readings.values
    }
}

impl TryFrom<&HashMap<Pollutant, f64>> for PollutantReadings {
    type Error = AqiError;

    fn try_from(map: &HashMap<Pollutant, f64>) -> Result<Self, Self::Error> {
        Self::from_readings(
            map.iter()
                .map(|(&pollutant, &value)| PollutantReading { pollutant, value }),
        )
    }
}

impl TryFrom<HashMap<Pollutant, f64>> for PollutantReadings {
    type Error = AqiError;

    fn try_from(map: HashMap<Pollutant, f64>) -> Result<Self, Self::Error> {
        Self::try_from(&map)
    }
}

//! Feature Layout - Centralized Pollutant Definition
//!
//! **CRITICAL: This file controls the feature schema shared with training**
//!
//! ## Rules (NEVER break these):
//! 1. Add pollutant → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove pollutant → increment FEATURE_VERSION
//!
//! The scaler and all four regressors of a city were fitted on columns in
//! exactly this order. A mismatch silently corrupts predictions.

use std::fmt;

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Pollutant column names in exact training order
pub const FEATURE_LAYOUT: &[&str] = &[
    "PM2.5", // 0: fine particulate matter (µg/m³)
    "PM10",  // 1: coarse particulate matter (µg/m³)
    "NO2",   // 2: nitrogen dioxide (µg/m³)
    "SO2",   // 3: sulphur dioxide (µg/m³)
    "CO",    // 4: carbon monoxide (mg/m³)
    "O3",    // 5: ozone (µg/m³)
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 6;

/// Optimal ceilings per pollutant, in layout order
pub const OPTIMAL_THRESHOLDS: [f64; FEATURE_COUNT] = [35.0, 50.0, 40.0, 40.0, 0.9, 180.0];

// ============================================================================
// POLLUTANT
// ============================================================================

/// One of the six measured pollutants
///
/// Declaration order is the feature order and the report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pollutant {
    #[serde(rename = "PM2.5")]
    Pm25,
    #[serde(rename = "PM10")]
    Pm10,
    #[serde(rename = "NO2")]
    No2,
    #[serde(rename = "SO2")]
    So2,
    #[serde(rename = "CO")]
    Co,
    #[serde(rename = "O3")]
    O3,
}

impl Pollutant {
    /// All pollutants in layout order
    pub const ALL: [Pollutant; FEATURE_COUNT] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::No2,
        Pollutant::So2,
        Pollutant::Co,
        Pollutant::O3,
    ];

    /// Position in the feature vector
    pub fn index(&self) -> usize {
        match self {
            Pollutant::Pm25 => 0,
            Pollutant::Pm10 => 1,
            Pollutant::No2 => 2,
            Pollutant::So2 => 3,
            Pollutant::Co => 4,
            Pollutant::O3 => 5,
        }
    }

    /// Display name, as used in reports
    pub fn as_str(&self) -> &'static str {
        FEATURE_LAYOUT[self.index()]
    }

    /// Fixed optimal ceiling
    pub fn optimal_threshold(&self) -> f64 {
        OPTIMAL_THRESHOLDS[self.index()]
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 hash of the feature layout
/// Used to detect layout mismatches between training and inference
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }

    hasher.finalize()
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when feature layout doesn't match expected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Feature layout mismatch: expected v{} (hash: {:08x}), got v{} (hash: {:08x})",
            self.expected_version,
            self.expected_hash,
            self.actual_version,
            self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

/// Validate that an artifact's layout matches the current one
pub fn validate_layout(
    incoming_version: u8,
    incoming_hash: u32,
) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

/// Check that a list of column names is exactly the layout, in order
pub fn matches_layout<S: AsRef<str>>(names: &[S]) -> bool {
    names.len() == FEATURE_COUNT
        && names
            .iter()
            .zip(FEATURE_LAYOUT.iter())
            .all(|(a, b)| a.as_ref() == *b)
}

// ============================================================================
// TESTS
// ============================================================================

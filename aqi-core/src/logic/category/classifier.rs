//! AQI Classifier
//!
//! Input: ensemble AQI. Output: `AqiCategory`, then advisory text.

use super::rules::{
    AQI_BREAKPOINTS, ADVICE_GOOD, ADVICE_HAZARDOUS, ADVICE_MODERATE, ADVICE_SENSITIVE,
    ADVICE_UNHEALTHY, ADVICE_VERY_UNHEALTHY,
};
use super::types::AqiCategory;
use crate::error::{AqiError, AqiResult};

/// Map an AQI to its band; first closed upper bound that holds wins
///
/// Negative values fall into Good. NaN and infinities are rejected.
pub fn categorize(aqi: f64) -> AqiResult<AqiCategory> {
    if !aqi.is_finite() {
        return Err(AqiError::InvalidAqiValue(aqi));
    }

    let category = AQI_BREAKPOINTS
        .iter()
        .find(|(upper, _)| aqi <= *upper)
        .map(|(_, category)| *category)
        .unwrap_or(AqiCategory::Hazardous);

    Ok(category)
}

/// Advisory text for a band
pub fn resolve(category: AqiCategory) -> &'static str {
    match category {
        AqiCategory::Good => ADVICE_GOOD,
        AqiCategory::Moderate => ADVICE_MODERATE,
        AqiCategory::UnhealthySensitive => ADVICE_SENSITIVE,
        AqiCategory::Unhealthy => ADVICE_UNHEALTHY,
        AqiCategory::VeryUnhealthy => ADVICE_VERY_UNHEALTHY,
        AqiCategory::Hazardous => ADVICE_HAZARDOUS,
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! AQI Breakpoints & Advisories
//!
//! Constants only, no classification logic.

use super::types::AqiCategory;

// ============================================================================
// BREAKPOINTS (closed upper bounds)
// ============================================================================

pub const GOOD_MAX: f64 = 50.0;
pub const MODERATE_MAX: f64 = 100.0;
pub const SENSITIVE_MAX: f64 = 150.0;
pub const UNHEALTHY_MAX: f64 = 200.0;
pub const VERY_UNHEALTHY_MAX: f64 = 300.0;

/// Upper bound per band, checked in order; anything above the last is Hazardous
pub const AQI_BREAKPOINTS: [(f64, AqiCategory); 5] = [
    (GOOD_MAX, AqiCategory::Good),
    (MODERATE_MAX, AqiCategory::Moderate),
    (SENSITIVE_MAX, AqiCategory::UnhealthySensitive),
    (UNHEALTHY_MAX, AqiCategory::Unhealthy),
    (VERY_UNHEALTHY_MAX, AqiCategory::VeryUnhealthy),
];

// ============================================================================
// ADVISORIES
// ============================================================================

pub const ADVICE_GOOD: &str = "Air quality is safe. Enjoy outdoor activities!";
pub const ADVICE_MODERATE: &str =
    "Air quality is acceptable. Sensitive individuals should avoid prolonged outdoor activities.";
pub const ADVICE_SENSITIVE: &str = "Sensitive groups should reduce outdoor exposure.";
pub const ADVICE_UNHEALTHY: &str = "Everyone should reduce prolonged outdoor exertion.";
pub const ADVICE_VERY_UNHEALTHY: &str = "Health alert: Avoid outdoor activities.";
pub const ADVICE_HAZARDOUS: &str = "Emergency: Stay indoors.";

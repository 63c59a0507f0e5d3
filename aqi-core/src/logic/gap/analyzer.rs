//! Gap Analyzer
//!
//! One finding per pollutant, always in layout order. The message text is
//! consumed verbatim downstream, so its wording and number formatting must
//! stay stable.

use super::types::GapFinding;
use crate::logic::features::{Pollutant, PollutantReadings};

/// Hint attached to every exceeding pollutant
pub const EMISSIONS_SUGGESTION: &str =
    "Implement measures to reduce emissions from vehicles and industries.";

/// Compare every reading with its optimal ceiling
pub fn analyze(readings: &PollutantReadings) -> Vec<GapFinding> {
    Pollutant::ALL
        .iter()
        .map(|&pollutant| finding_for(pollutant, readings.get(pollutant)))
        .collect()
}

fn finding_for(pollutant: Pollutant, current: f64) -> GapFinding {
    let threshold = pollutant.optimal_threshold();
    let exceeds = current > threshold;
    let excess = if exceeds { current - threshold } else { 0.0 };

    log::debug!(
        "Checking {}: current level is {}, optimal level is {}",
        pollutant,
        current,
        threshold
    );

    let message = if exceeds {
        format!(
            "{p}: Exceeds optimal range. Current: {c} µg/m³ | Optimal: ≤{t} µg/m³. Reduce {p} by {e:.2} µg/m³.",
            p = pollutant,
            c = format_reading(current),
            t = threshold,
            e = excess,
        )
    } else {
        format!(
            "{p}: Within optimal range. Current: {c} µg/m³ | Optimal: ≤{t} µg/m³.",
            p = pollutant,
            c = format_reading(current),
            t = threshold,
        )
    };

    GapFinding {
        pollutant,
        current,
        threshold,
        exceeds,
        excess,
        message,
        suggestion: exceeds.then(|| EMISSIONS_SUGGESTION.to_string()),
    }
}

/// Readings always show a fractional part (`40.0`, `0.5`)
fn format_reading(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

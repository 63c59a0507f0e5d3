//! Assessment Pipeline
//!
//! ```text
//! readings + city ─► store.load ─► normalize ─► ensemble ─► categorize ─► resolve
//!        │                                                                  │
//!        └──────────────────────► gap analysis ──────────────────────────────┴─► AqiReport
//! ```
//!
//! Everything a request needs travels in its own `AssessmentRequest`;
//! the only shared state is the read-only artifact cache.

use serde::{Deserialize, Serialize};

use crate::error::AqiResult;
use crate::logic::artifacts::{ArtifactStore, ModelArtifactSet};
use crate::logic::category::{categorize, resolve, AqiCategory};
use crate::logic::features::PollutantReadings;
use crate::logic::gap::{analyze, GapFinding};
use crate::logic::model::{self, EnsemblePrediction};

/// One inference request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub city: String,
    pub readings: PollutantReadings,
}

impl AssessmentRequest {
    pub fn new(city: impl Into<String>, readings: PollutantReadings) -> Self {
        Self {
            city: city.into(),
            readings,
        }
    }
}

/// Combined result of one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AqiReport {
    pub city: String,
    pub average_aqi: f64,
    pub category: AqiCategory,
    pub category_label: String,
    pub model_outputs: EnsemblePrediction,
    pub findings: Vec<GapFinding>,
    pub recommendation_text: String,
}

/// Run the full pipeline for one request
pub fn assess(store: &ArtifactStore, request: &AssessmentRequest) -> AqiResult<AqiReport> {
    let artifacts = store.load(&request.city)?;
    assess_with(&artifacts, &request.readings)
}

/// Pipeline against an already loaded artifact set
pub fn assess_with(
    artifacts: &ModelArtifactSet,
    readings: &PollutantReadings,
) -> AqiResult<AqiReport> {
    let scaled = model::normalize(&artifacts.scaler, readings.as_array());
    let prediction = model::predict(artifacts, &scaled)?;
    let category = categorize(prediction.average)?;

    let report = AqiReport {
        city: artifacts.key.city().to_string(),
        average_aqi: prediction.average,
        category,
        category_label: category.label().to_string(),
        model_outputs: prediction,
        findings: analyze(readings),
        recommendation_text: resolve(category).to_string(),
    };

    log::info!(
        "AQI for {}: {:.2} ({})",
        report.city,
        report.average_aqi,
        report.category_label
    );

    Ok(report)
}

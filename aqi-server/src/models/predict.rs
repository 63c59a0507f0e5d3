//! Prediction request/response models

use aqi_core::{AqiReport, AqiResult, AssessmentRequest, PollutantReadings};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Predict request, accepted as JSON or as form fields
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(length(min = 1, max = 64, message = "city must be 1-64 characters"))]
    pub city: String,

    #[validate(range(min = 0.0, message = "pm25 must be non-negative"))]
    pub pm25: f64,
    #[validate(range(min = 0.0, message = "pm10 must be non-negative"))]
    pub pm10: f64,
    #[validate(range(min = 0.0, message = "no2 must be non-negative"))]
    pub no2: f64,
    #[validate(range(min = 0.0, message = "so2 must be non-negative"))]
    pub so2: f64,
    #[validate(range(min = 0.0, message = "co must be non-negative"))]
    pub co: f64,
    #[validate(range(min = 0.0, message = "o3 must be non-negative"))]
    pub o3: f64,
}

impl PredictRequest {
    /// Request-owned readings for the pipeline
    pub fn into_assessment(self) -> AqiResult<AssessmentRequest> {
        let readings =
            PollutantReadings::new(self.pm25, self.pm10, self.no2, self.so2, self.co, self.o3)?;
        Ok(AssessmentRequest::new(self.city, readings))
    }
}

/// Predict response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    #[serde(flatten)]
    pub report: AqiReport,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

impl From<AqiReport> for PredictResponse {
    fn from(report: AqiReport) -> Self {
        Self {
            report,
            generated_at: chrono::Utc::now(),
        }
    }
}

//! Error taxonomy for the inference core
//!
//! Every failure is scoped to a single request. Nothing here is fatal to the
//! process and no variant is retried.

use thiserror::Error;

pub type AqiResult<T> = Result<T, AqiError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AqiError {
    /// Malformed or missing request fields
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// City has no trained artifacts (or is not a known city)
    #[error("No trained models found for city '{city}'")]
    ArtifactNotFound { city: String },

    /// An artifact file exists but cannot be read or is structurally invalid
    #[error("Artifact {file} is unusable: {reason}")]
    ArtifactCorrupt { file: String, reason: String },

    /// Regressor rejected the input (shape mismatch, non-finite output)
    #[error("Model inference failed ({model}): {reason}")]
    ModelInference { model: String, reason: String },

    /// Aggregate AQI is NaN or infinite
    #[error("Invalid AQI value: {0}")]
    InvalidAqiValue(f64),
}

impl AqiError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        AqiError::InvalidInput(msg.into())
    }

    pub fn not_found(city: impl Into<String>) -> Self {
        AqiError::ArtifactNotFound { city: city.into() }
    }

    pub fn corrupt(file: impl Into<String>, reason: impl ToString) -> Self {
        AqiError::ArtifactCorrupt {
            file: file.into(),
            reason: reason.to_string(),
        }
    }

    pub fn inference(model: impl Into<String>, reason: impl Into<String>) -> Self {
        AqiError::ModelInference {
            model: model.into(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code, used by the HTTP layer
    pub fn code(&self) -> &'static str {
        match self {
            AqiError::InvalidInput(_) => "invalid_input",
            AqiError::ArtifactNotFound { .. } => "artifact_not_found",
            AqiError::ArtifactCorrupt { .. } => "artifact_corrupt",
            AqiError::ModelInference { .. } => "model_inference_error",
            AqiError::InvalidAqiValue(_) => "invalid_aqi_value",
        }
    }
}

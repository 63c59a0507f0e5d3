//! Error handling

use aqi_core::AqiError;
use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    // Request errors
    #[error("validation failed: {0}")]
    ValidationError(String),

    // Resource errors
    #[error("not found: {0}")]
    NotFound(String),

    // Inference errors
    #[error("invalid aqi: {0}")]
    InvalidAqi(String),
    #[error("inference failed: {0}")]
    InferenceError(String),

    // Generic errors
    #[error("internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.as_str()),
            AppError::InvalidAqi(msg) => {
                tracing::warn!("Invalid AQI: {}", msg);
                (StatusCode::UNPROCESSABLE_ENTITY, "Model ensemble produced an invalid AQI value")
            }
            AppError::InferenceError(msg) => {
                tracing::error!("Inference error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Model inference failed")
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<AqiError> for AppError {
    fn from(err: AqiError) -> Self {
        match err {
            AqiError::InvalidInput(_) => AppError::ValidationError(err.to_string()),
            AqiError::ArtifactNotFound { .. } => AppError::NotFound(err.to_string()),
            AqiError::InvalidAqiValue(_) => AppError::InvalidAqi(err.to_string()),
            AqiError::ModelInference { .. } | AqiError::ArtifactCorrupt { .. } => {
                AppError::InferenceError(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(format!("Invalid input: {}", errors))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

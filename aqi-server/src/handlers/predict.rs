//! Prediction handlers

use std::sync::Arc;

use aqi_core::{assess, ArtifactStore, AssessmentRequest};
use axum::{
    extract::{rejection::FormRejection, rejection::JsonRejection, State},
    Form, Json,
};
use validator::Validate;

use crate::models::{PredictRequest, PredictResponse};
use crate::{AppResult, AppState};

/// JSON predict endpoint
pub async fn predict_json(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(req) = payload?;
    run(state, req).await
}

/// Form predict endpoint (`city`, `pm25`, `pm10`, `no2`, `so2`, `co`, `o3`)
pub async fn predict_form(
    State(state): State<AppState>,
    payload: Result<Form<PredictRequest>, FormRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Form(req) = payload?;
    run(state, req).await
}

async fn run(state: AppState, req: PredictRequest) -> AppResult<Json<PredictResponse>> {
    req.validate()?;
    let request = req.into_assessment()?;
    tracing::debug!("Predict request for '{}'", request.city);

    let report = assess_blocking(Arc::clone(&state.store), request).await?;
    Ok(Json(report.into()))
}

/// Artifact loading reads files, so keep it off the async workers
async fn assess_blocking(
    store: Arc<ArtifactStore>,
    request: AssessmentRequest,
) -> AppResult<aqi_core::AqiReport> {
    let report = tokio::task::spawn_blocking(move || assess(&store, &request)).await??;
    Ok(report)
}

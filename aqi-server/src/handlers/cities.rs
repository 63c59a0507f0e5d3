//! City artifact status handler

use std::sync::Arc;

use aqi_core::logic::catalog;
use aqi_core::BatchReport;
use axum::{extract::State, Json};

use crate::{AppResult, AppState};

/// Audit configured cities (loads any that are not cached yet)
pub async fn list(State(state): State<AppState>) -> AppResult<Json<BatchReport>> {
    let store = Arc::clone(&state.store);
    let report = tokio::task::spawn_blocking(move || catalog::audit_known(&store)).await?;
    Ok(Json(report))
}

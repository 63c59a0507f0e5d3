//! AQI Estimator Server
//!
//! HTTP front end over the per-city inference core.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      AQI ESTIMATOR                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────────┐  ┌─────────────────────┐ │
//! │  │  API      │  │  Assessment   │  │  Artifact Catalog   │ │
//! │  │  (Axum)   │─►│  Pipeline     │  │  (startup preload)  │ │
//! │  └───────────┘  └───────┬───────┘  └──────────┬──────────┘ │
//! │                         └────────────┬────────┘            │
//! │                                      ▼                     │
//! │                         ┌────────────────────────┐         │
//! │                         │ ArtifactStore (cache)  │         │
//! │                         └────────────────────────┘         │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod models;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use aqi_core::logic::catalog;
use aqi_core::ArtifactStore;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "aqi_server=debug,aqi_core=info,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("AQI Estimator server starting ({})...", config.environment);
    tracing::info!("Artifacts: {}", config.artifacts_dir.display());

    let store = Arc::new(config.build_store());

    if config.preload {
        tracing::info!("Preloading artifacts for {} cities...", config.cities.len());
        let preload_store = Arc::clone(&store);
        let report = tokio::task::spawn_blocking(move || catalog::audit_known(&preload_store))
            .await
            .context("artifact preload task failed")?;

        for outcome in report.failed() {
            tracing::warn!("City '{}' unavailable: {:?}", outcome.city, outcome.status);
        }
        if config.is_production() && report.ready_count() == 0 && !report.outcomes.is_empty() {
            anyhow::bail!(
                "no city artifacts could be loaded from {}",
                config.artifacts_dir.display()
            );
        }
    }

    // Build application state
    let state = AppState {
        store,
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ArtifactStore>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/cities", get(handlers::cities::list))
        .route("/api/v1/predict", post(handlers::predict::predict_json))
        // Form-encoded variant
        .route("/predict", post(handlers::predict::predict_form))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

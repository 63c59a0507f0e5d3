use std::path::Path;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use crate::config::Config;
use crate::{create_router, AppState};

fn leaf(value: f64) -> Value {
    json!({
        "feature": [-2],
        "threshold": [-2.0],
        "left_child": [-1],
        "right_child": [-1],
        "value": [value]
    })
}

/// Artifacts whose four models return fixed values
fn write_city(dir: &Path, city: &str, [rf, xgb, gb, svr]: [f64; 4]) {
    let files = [
        (
            "scaler",
            json!({
                "mean": [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                "scale": [1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
                "feature_names": ["PM2.5", "PM10", "NO2", "SO2", "CO", "O3"]
            }),
        ),
        (
            "model",
            json!({ "kind": "random_forest", "n_features": 6, "trees": [leaf(rf)] }),
        ),
        (
            "xgb_model",
            json!({ "kind": "xgboost", "n_features": 6, "base_score": 0.0, "trees": [leaf(xgb)] }),
        ),
        (
            "gb_model",
            json!({
                "kind": "gradient_boosting",
                "n_features": 6,
                "init_prediction": gb,
                "learning_rate": 0.1,
                "trees": [leaf(0.0)]
            }),
        ),
        (
            "svm_model",
            json!({
                "kind": "svr",
                "n_features": 6,
                "support_vectors": [[0.0, 0.0, 0.0, 0.0, 0.0, 0.0]],
                "dual_coef": [0.0],
                "intercept": svr,
                "kernel": { "type": "linear" }
            }),
        ),
    ];

    for (suffix, doc) in files {
        let path = dir.join(format!("{}_{}.json", city, suffix));
        std::fs::write(path, serde_json::to_vec(&doc).unwrap()).unwrap();
    }
}

fn test_app() -> (Router, AppState, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    write_city(dir.path(), "warangal", [60.0, 70.0, 80.0, 90.0]);
    write_city(dir.path(), "rajendranagar", [250.0, 260.0, 270.0, 280.0]);

    let config = Config {
        port: 0,
        artifacts_dir: dir.path().to_path_buf(),
        cities: vec!["warangal".into(), "palwancha".into(), "rajendranagar".into()],
        preload: false,
        environment: "test".into(),
    };
    let state = AppState {
        store: Arc::new(config.build_store()),
        config,
    };

    (create_router(state.clone()), state, dir)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn reference_request(city: &str) -> Value {
    json!({
        "city": city,
        "pm25": 40.0, "pm10": 45.0, "no2": 35.0,
        "so2": 20.0, "co": 0.5, "o3": 150.0
    })
}

#[tokio::test]
async fn test_health() {
    let (app, _, _dir) = test_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["cachedCities"], json!([]));
}

#[tokio::test]
async fn test_predict_json() {
    let (app, state, _dir) = test_app();
    let response = app
        .oneshot(post_json("/api/v1/predict", reference_request("Warangal")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["city"], "warangal");
    assert_eq!(body["averageAqi"], 75.0);
    assert_eq!(body["category"], "moderate");
    assert_eq!(body["categoryLabel"], "Moderate");
    assert_eq!(body["findings"].as_array().unwrap().len(), 6);
    assert_eq!(body["findings"][0]["exceeds"], true);
    assert_eq!(body["findings"][1]["exceeds"], false);
    assert!(body["generatedAt"].is_string());

    assert_eq!(state.store.cached_cities(), vec!["warangal"]);
}

#[tokio::test]
async fn test_predict_form() {
    let (app, _, _dir) = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(
            "city=rajendranagar&pm25=12&pm10=20&no2=10&so2=5&co=0.3&o3=40",
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["averageAqi"], 265.0);
    assert_eq!(body["category"], "very_unhealthy");
    assert_eq!(body["recommendationText"], "Health alert: Avoid outdoor activities.");
}

#[tokio::test]
async fn test_configured_city_without_artifacts_is_404() {
    let (app, _, _dir) = test_app();
    let response = app
        .oneshot(post_json("/api/v1/predict", reference_request("palwancha")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "No trained models found for city 'palwancha'");
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_unknown_city_is_404() {
    let (app, _, _dir) = test_app();
    let response = app
        .oneshot(post_json("/api/v1/predict", reference_request("atlantis")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_negative_reading_is_400() {
    let (app, _, _dir) = test_app();
    let mut body = reference_request("warangal");
    body["co"] = json!(-1.0);

    let response = app.oneshot(post_json("/api/v1/predict", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_field_is_400() {
    let (app, _, _dir) = test_app();
    let response = app
        .oneshot(post_json("/api/v1/predict", json!({ "city": "warangal", "pm25": 40.0 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_path_like_city_is_400() {
    let (app, _, _dir) = test_app();
    let response = app
        .oneshot(post_json("/api/v1/predict", reference_request("../warangal")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_corrupt_artifact_is_500() {
    let (app, _, dir) = test_app();
    std::fs::write(dir.path().join("warangal_svm_model.json"), b"{ broken").unwrap();

    let response = app
        .oneshot(post_json("/api/v1/predict", reference_request("warangal")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Model inference failed");
}

#[tokio::test]
async fn test_cities_reports_partial_failure() {
    let (app, _, _dir) = test_app();
    let response = app
        .oneshot(Request::builder().uri("/api/v1/cities").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let outcomes = body["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 3);

    let statuses: Vec<(&str, &str)> = outcomes
        .iter()
        .map(|o| (o["city"].as_str().unwrap(), o["status"].as_str().unwrap()))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("palwancha", "failed"),
            ("rajendranagar", "ready"),
            ("warangal", "ready"),
        ]
    );
}

#[tokio::test]
async fn test_overflowing_ensemble_is_422() {
    let (app, _, dir) = test_app();
    write_city(dir.path(), "palwancha", [1.0, 1e308, 1e308, 1e308]);

    let response = app
        .oneshot(post_json("/api/v1/predict", reference_request("palwancha")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Model ensemble produced an invalid AQI value");
    assert_eq!(body["status"], 422);
}

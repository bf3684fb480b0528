//! Router tests against an in-memory model

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use price_core::logic::features::layout::feature_index;
use price_core::logic::model::{Activation, DenseLayer, DenseNetwork};
use price_core::{HouseFeatures, LoadedModel, PredictionAdapter, FEATURE_COUNT};

use crate::{config::Config, create_router, AppState};

/// price = 100 * sqft_living + 50000
fn living_area_model() -> DenseNetwork {
    let mut weights = vec![vec![0.0]; FEATURE_COUNT];
    weights[feature_index("sqft_living").unwrap()] = vec![100.0];
    DenseNetwork::new(vec![DenseLayer::new(weights, vec![50000.0], Activation::Linear).unwrap()]).unwrap()
}

fn state_with(network: DenseNetwork) -> AppState {
    AppState {
        adapter: Arc::new(PredictionAdapter::new(LoadedModel::in_memory(network))),
        config: Config::default(),
    }
}

fn app() -> (Router, AppState) {
    let state = state_with(living_area_model());
    (create_router(state.clone()), state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn example_body() -> Value {
    serde_json::to_value(HouseFeatures::example()).unwrap()
}

#[tokio::test]
async fn test_root_returns_readiness_string() {
    let (app, _) = app();
    let (status, body) = send(app, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("house predict classifier is all ready to go!".to_string()));
}

#[tokio::test]
async fn test_health() {
    let (app, _) = app();
    let (status, body) = send(app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_i64());
}

#[tokio::test]
async fn test_predict_returns_result_string() {
    let (app, state) = app();
    let (status, body) = send(app, post_json("/predict", &example_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("Prediction Result: 307000".to_string()));
    assert_eq!(state.adapter.status().inference_count, 1);
}

#[tokio::test]
async fn test_predict_v1_structured() {
    let (app, _) = app();
    let (status, body) = send(app, post_json("/api/v1/predict", &example_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 307000.0);
    assert_eq!(body["message"], "Prediction Result: 307000");
    assert_eq!(body["feature_version"], 1);
    assert_eq!(body["model"], "dense_network");
    assert!(body["prediction_id"].is_string());
}

#[tokio::test]
async fn test_missing_field_never_reaches_model() {
    let (app, state) = app();
    let mut body = example_body();
    body.as_object_mut().unwrap().remove("sqft_living");

    let (status, _) = send(app, post_json("/predict", &body)).await;

    assert!(status.is_client_error());
    assert_eq!(state.adapter.status().inference_count, 0);
}

#[tokio::test]
async fn test_non_numeric_field_rejected() {
    let (app, state) = app();
    let mut body = example_body();
    body["bedrooms"] = Value::String("three".to_string());

    let (status, _) = send(app, post_json("/predict", &body)).await;

    assert!(status.is_client_error());
    assert_eq!(state.adapter.status().inference_count, 0);
}

#[tokio::test]
async fn test_out_of_range_month_is_bad_request() {
    let (app, state) = app();
    let mut body = example_body();
    body["month"] = serde_json::json!(13.0);

    let (status, body) = send(app, post_json("/predict", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("month"));
    assert_eq!(state.adapter.status().inference_count, 0);
}

#[tokio::test]
async fn test_area_beyond_f32_is_bad_request() {
    let (app, state) = app();
    let mut body = example_body();
    body["sqft_living"] = serde_json::json!(1e39);

    let (status, body) = send(app, post_json("/predict", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("sqft_living"));
    assert_eq!(state.adapter.status().inference_count, 0);
}

#[tokio::test]
async fn test_inference_failure_is_server_error() {
    let narrow = DenseNetwork::new(vec![
        DenseLayer::new(vec![vec![1.0]; 5], vec![0.0], Activation::Linear).unwrap(),
    ])
    .unwrap();
    let state = state_with(narrow);

    let (status, body) = send(create_router(state.clone()), post_json("/predict", &example_body())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);

    // the next request is served normally
    let (status, _) = send(create_router(state), get("/")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_schema_endpoint() {
    let (app, _) = app();
    let (status, body) = send(app, get("/api/v1/schema")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["feature_count"], 19);
    assert_eq!(body["feature_names"][15], "sqft_lot15");
    assert_eq!(body["feature_names"][16], "sqft_living15");
}

#[tokio::test]
async fn test_status_endpoint() {
    let (app, state) = app();
    state.adapter.predict(&HouseFeatures::example()).unwrap();

    let (status, body) = send(app, get("/api/v1/status")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["model_type"], "dense_network");
    assert_eq!(body["scaler_enabled"], false);
    assert_eq!(body["inference_count"], 1);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (app, _) = app();
    let (status, body) = send(app, get("/nope")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

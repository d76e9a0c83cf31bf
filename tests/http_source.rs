//! Integration tests for the HTTP reading source against an in-process
//! axum endpoint: decode, status mapping, and body errors.

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use vitals_dash::config::EndpointConfig;
use vitals_dash::{FetchError, HttpSource, ReadingSource};

// ============================================================================
// Helpers
// ============================================================================

/// Serve `app` on an ephemeral loopback port and return its base url.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn source_for(base_url: String) -> HttpSource {
    HttpSource::new(&EndpointConfig {
        base_url,
        path: "/api/data".into(),
        timeout_ms: 2_000,
    })
    .unwrap()
}

fn payload() -> serde_json::Value {
    json!([
        {
            "timestamp": "2025-03-01 10:15:28",
            "heart_rate": 72.0,
            "temperature": 36.9,
            "accel_x": 0.02, "accel_y": -0.1, "accel_z": 1.01,
            "hrv": 55.0,
            "stress_score": 10.0,
            "alert": ""
        },
        {
            "timestamp": "2025-03-01 10:15:30",
            "heart_rate": 115.0,
            "temperature": 37.2,
            "accel_x": 0.0, "accel_y": 0.0, "accel_z": 1.0,
            "hrv": 30.0,
            "stress_score": 25.0,
            "alert": "High Heart Rate"
        }
    ])
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn decodes_served_batch_in_server_order() {
    let app = Router::new().route("/api/data", get(|| async { Json(payload()) }));
    let source = source_for(serve(app).await);

    let batch = source.fetch().await.unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].timestamp, "2025-03-01 10:15:28");
    assert_eq!(batch[1].heart_rate, 115.0);
    assert_eq!(batch[1].alert_label(), "High Heart Rate");
}

#[tokio::test]
async fn empty_array_is_an_empty_batch() {
    let app = Router::new().route("/api/data", get(|| async { Json(json!([])) }));
    let source = source_for(serve(app).await);
    assert!(source.fetch().await.unwrap().is_empty());
}

#[tokio::test]
async fn server_error_maps_to_status() {
    let app = Router::new().route(
        "/api/data",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database is locked") }),
    );
    let source = source_for(serve(app).await);

    match source.fetch().await {
        Err(FetchError::Status { status }) => assert_eq!(status, 500),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn missing_route_maps_to_status_404() {
    let app = Router::new().route("/other", get(|| async { "nope" }));
    let source = source_for(serve(app).await);

    let err = source.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404 }));
}

#[tokio::test]
async fn html_body_is_a_decode_error() {
    let app = Router::new().route(
        "/api/data",
        get(|| async { "<!doctype html><title>maintenance</title>" }),
    );
    let source = source_for(serve(app).await);

    let err = source.fetch().await.unwrap_err();
    assert_eq!(err.kind(), "decode");
}

#[tokio::test]
async fn wrong_shape_is_a_decode_error() {
    let app = Router::new().route(
        "/api/data",
        get(|| async { Json(json!({"message": "Data received"})) }),
    );
    let source = source_for(serve(app).await);

    assert!(matches!(source.fetch().await, Err(FetchError::Decode(_))));
}

//! Integration tests for the API Server
//!
//! Tests HTTP endpoints, health checks, metrics, and degradation without a
//! database connection.

#[path = "api_server/test_utils.rs"]
mod test_utils;

use serde_json::{json, Value};

use test_utils::TestApiServer;

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "backtrix-api");
}

#[tokio::test]
async fn health_endpoint_reports_database_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    // No database connection in the test state
    let body: Value = response.json();
    assert_eq!(body["database"], "unavailable");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(
        body.contains("http_requests_total"),
        "Expected http_requests_total metric"
    );
    assert!(
        body.contains("http_request_duration_seconds"),
        "Expected http_request_duration_seconds metric"
    );
    assert!(
        body.contains("http_requests_in_flight"),
        "Expected http_requests_in_flight metric"
    );
}

#[tokio::test]
async fn metrics_endpoint_tracks_request_count() {
    let app = TestApiServer::new().await;

    for _ in 0..3 {
        let _ = app.server.get("/health").await;
    }

    assert!(app.metrics.http_requests_total.get() >= 3);
}

#[tokio::test]
async fn data_endpoints_degrade_without_database() {
    let app = TestApiServer::new().await;

    let response = app.server.get("/data").await;
    assert_eq!(response.status_code(), 503);

    let payload = json!({
        "datetime": "2024-01-01T10:00:00Z",
        "open": 100.5,
        "high": 105.0,
        "low": 99.5,
        "close": 102.0,
        "volume": 1000
    });
    let response = app.server.post("/data").json(&payload).await;
    assert_eq!(response.status_code(), 503);
}

#[tokio::test]
async fn performance_endpoint_degrades_without_database() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/strategy/performance").await;
    assert_eq!(response.status_code(), 503);

    let body: Value = response.json();
    assert_eq!(body["error"], "Database unavailable");
}

#[tokio::test]
async fn post_data_rejects_malformed_body() {
    let app = TestApiServer::new().await;

    // String where a price is expected
    let payload = json!({
        "datetime": "2024-01-01T10:00:00Z",
        "open": "invalid_price",
        "high": 105.0,
        "low": 99.5,
        "close": 102.0,
        "volume": 1000
    });
    let response = app.server.post("/data").json(&payload).await;
    assert_eq!(response.status_code(), 422);
}

#[tokio::test]
async fn post_data_rejects_missing_field() {
    let app = TestApiServer::new().await;

    // volume is missing
    let payload = json!({
        "datetime": "2024-01-01T10:00:00Z",
        "open": 100.5,
        "high": 105.0,
        "low": 99.5,
        "close": 102.0
    });
    let response = app.server.post("/data").json(&payload).await;
    assert_eq!(response.status_code(), 422);
}

#[tokio::test]
async fn performance_endpoint_rejects_bad_query_params() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .get("/strategy/performance?short_window=abc")
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn api_server_is_stateless() {
    let app = TestApiServer::new().await;

    let response1 = app.server.get("/health").await;
    let response2 = app.server.get("/health").await;

    assert_eq!(response1.status_code(), 200);
    assert_eq!(response2.status_code(), 200);

    let body1: Value = response1.json();
    let body2: Value = response2.json();
    assert_eq!(body1["status"], "healthy");
    assert_eq!(body2["status"], "healthy");
}

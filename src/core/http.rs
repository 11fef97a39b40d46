//! HTTP endpoint server using Axum

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::db::TickerDatabase;
use crate::engine::{self, BacktestOutcome, BacktestParams, EngineError};
use crate::metrics::Metrics;
use crate::models::{PricePoint, TickerRecord};

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub database: Option<Arc<TickerDatabase>>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    let database = match state.database.as_ref() {
        Some(db) if db.is_available().await => "connected",
        _ => "unavailable",
    };
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "database": database,
        "service": "backtrix-api"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();
    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

/// List all ticker records, ascending by datetime
async fn read_data(State(state): State<AppState>) -> Result<Json<Vec<TickerRecord>>, StatusCode> {
    let db = state
        .database
        .as_ref()
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)?;

    let records = db.fetch_all().await.map_err(|e| {
        error!(error = %e, "Failed to load ticker data");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(records))
}

/// Add a new ticker record. Malformed bodies are rejected by the JSON
/// extractor before this handler runs.
async fn add_data(
    State(state): State<AppState>,
    Json(record): Json<TickerRecord>,
) -> Result<Json<TickerRecord>, StatusCode> {
    let db = state
        .database
        .as_ref()
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)?;

    db.insert_record(&record).await.map_err(|e| {
        error!(error = %e, "Failed to insert ticker record");
        StatusCode::BAD_REQUEST
    })?;

    Ok(Json(record))
}

#[derive(Debug, Deserialize)]
struct PerformanceQuery {
    short_window: Option<usize>,
    long_window: Option<usize>,
    initial_capital: Option<f64>,
}

impl PerformanceQuery {
    fn params(&self) -> BacktestParams {
        let defaults = BacktestParams::default();
        BacktestParams {
            short_window: self.short_window.unwrap_or(defaults.short_window),
            long_window: self.long_window.unwrap_or(defaults.long_window),
            initial_capital: self.initial_capital.unwrap_or(defaults.initial_capital),
        }
    }
}

/// Run the crossover backtest over all stored closes and return the
/// performance summary
async fn strategy_performance(
    State(state): State<AppState>,
    Query(query): Query<PerformanceQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let db = state.database.as_ref().ok_or((
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({"error": "Database unavailable"})),
    ))?;

    let records = db.fetch_all().await.map_err(|e| {
        error!(error = %e, "Failed to load ticker data for backtest");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Failed to load ticker data"})),
        )
    })?;

    let series: Vec<PricePoint> = records.iter().map(TickerRecord::price_point).collect();
    let params = query.params();

    state.metrics.backtests_total.inc();

    match engine::run_backtest(&series, &params) {
        Ok(BacktestOutcome::Summary(summary)) => {
            info!(
                strategy = %summary.strategy_name,
                total_trades = summary.total_trades,
                "Backtest complete"
            );
            Ok(Json(json!(summary)))
        }
        Ok(BacktestOutcome::NoData) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({"error": "No data available"})),
        )),
        Err(e @ EngineError::ZeroWindow) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": e.to_string()})),
        )),
        Err(e) => {
            error!(error = %e, "Backtest failed on stored series");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            ))
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/data", get(read_data))
        .route("/data", post(add_data))
        .route("/strategy/performance", get(strategy_performance))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let start_time = Arc::new(Instant::now());

    // Data endpoints degrade to 503 when the database is unreachable
    let database = match TickerDatabase::new().await {
        Ok(db) => {
            info!("Postgres connected for API server");
            Some(Arc::new(db))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to connect to Postgres - data endpoints will be unavailable");
            None
        }
    };

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics,
        start_time,
        database,
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}

//! Axum route handlers.
//!
//! # Routes
//!
//! - `GET  /health`    — Returns `{"ok": true, "service", "time", "version"}`
//! - `GET  /positions` — Validates the query, builds a chart, returns JSON
//! - `POST /chat`      — Accepts `{message, chart}`, returns `{reply}`
//!
//! Failure mapping follows the error taxonomy: validation failures are `400`
//! naming the field, provider degradation stays inside the `200` payload,
//! and anything unexpected is caught at this boundary as a `500`.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::chat::{compose, ChatChart};
use crate::ephemeris::{build_chart, verify_source, Dialect, EphemerisSource, ProviderError};
use crate::server::params::RawPositionsQuery;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// The provider selected at startup.
    pub source: Arc<dyn EphemerisSource>,
    /// Payload dialect classified by the startup probe.
    pub dialect: Dialect,
}

impl AppState {
    /// Probe the source once and fix its dialect for the process lifetime.
    ///
    /// Fails when the provider build is incompatible, so a broken
    /// integration stops the server at startup instead of degrading every
    /// request.
    pub fn new(source: Arc<dyn EphemerisSource>) -> Result<Self, ProviderError> {
        let dialect = verify_source(source.as_ref())?;
        tracing::info!(source = source.name(), dialect = ?dialect, "ephemeris source verified");
        Ok(Self { source, dialect })
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/positions", get(positions_handler))
        .route("/chat", post(chat_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health — liveness probe, never cached.
async fn health_handler() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-store")],
        Json(json!({
            "ok": true,
            "service": crate::SERVICE,
            "time": chrono::Utc::now().to_rfc3339(),
            "version": crate::VERSION,
        })),
    )
}

/// GET /positions — compute a chart for a validated time and place.
///
/// Query: `date`, `time`, `lat`, `lng`, optional `house_system`/`hsys`
/// (default `P`) and `tz_offset_minutes` (default `0`).
async fn positions_handler(
    State(state): State<AppState>,
    Query(raw): Query<RawPositionsQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let request = raw.validate().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": e.to_string()})),
        )
    })?;

    // Echo of the validated input, so callers can see what was computed.
    let input = json!({
        "date": request.date.to_string(),
        "time": request.time.to_string(),
        "lat": request.lat,
        "lng": request.lng,
        "house_system": request.house_system.to_string(),
        "tz_offset_minutes": request.tz_offset_minutes,
    });

    // The provider API blocks; keep it off the async workers.
    let source = state.source.clone();
    let dialect = state.dialect;
    let worker_request = request.clone();
    let chart = tokio::task::spawn_blocking(move || {
        build_chart(source.as_ref(), dialect, &worker_request)
    })
    .await
    .map_err(|join_error| {
        tracing::error!(error = %join_error, "chart computation panicked");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "chart computation failed"})),
        )
    })?;

    let mut body = json!({
        "success": true,
        "jd_ut": chart.jd_ut,
        "input": input,
        "planets": chart.planets,
    });
    if let Some(houses) = &chart.houses {
        body["houses"] = json!({ "cusps": houses.angles() });
    }
    if let Some(angles) = &chart.angles {
        body["angles"] = json!(angles);
    }
    Ok(Json(body))
}

/// POST /chat — compose a reply from a message and a previously computed
/// chart.
///
/// Request body: `{ "message": "...", "chart": { ... } }`
async fn chat_handler(
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let message = body
        .get("message")
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "missing 'message' in request body"})),
            )
        })?;

    let chart_value = body.get("chart").cloned().ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "missing 'chart' in request body"})),
        )
    })?;

    let chart: ChatChart = serde_json::from_value(chart_value).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": format!("invalid 'chart': {}", e)})),
        )
    })?;

    Ok(Json(json!({ "reply": compose(message, &chart) })))
}

// ============================================================================
// Tests
// ============================================================================

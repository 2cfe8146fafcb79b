//! # Health Check Handlers
//!
//! Thin adapters over [`HealthService`](crate::health::HealthService).

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::health::{HealthReport, LivenessResponse};
use crate::web::state::AppState;

/// Readiness probe: GET /__gtg
///
/// 200 `OK` when both dependencies are good to go, 503 with the first
/// failing probe's message otherwise.
pub async fn good_to_go(State(state): State<Arc<AppState>>) -> (StatusCode, String) {
    match state.health.gtg().await {
        Ok(()) => (StatusCode::OK, "OK".to_string()),
        Err(message) => (StatusCode::SERVICE_UNAVAILABLE, message),
    }
}

/// Detailed health report: GET /__health
///
/// Always 200; the report's `ok` flag carries the outcome.
pub async fn detailed_health(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    Json(state.health.detailed_health().await)
}

/// Liveness probe: GET /__live
pub async fn liveness(State(state): State<Arc<AppState>>) -> Json<LivenessResponse> {
    Json(state.health.liveness())
}

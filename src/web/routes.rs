//! Route definitions grouped by concern

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::web::{handlers, state::AppState};

/// Publishing routes
pub fn publish_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/drafts/content/{uuid}/annotations/publish",
        post(handlers::publish::publish_annotations),
    )
}

/// Operational endpoints for probes and discovery
pub fn admin_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/__gtg", get(handlers::health::good_to_go))
        .route("/__health", get(handlers::health::detailed_health))
        .route("/__live", get(handlers::health::liveness))
        .route("/__build-info", get(handlers::admin::build_info))
        .route("/__api", get(handlers::admin::api_description))
}

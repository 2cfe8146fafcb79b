//! # Web API Module
//!
//! axum application exposing the publish endpoint and the operational
//! endpoints (`/__gtg`, `/__health`, `/__live`, `/__build-info`, `/__api`).

use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use errors::{ApiError, ApiResult};
pub use state::AppState;

/// Headroom over the request deadline before the server abandons a request
const SERVER_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

/// Create the web application with all routes and middleware
pub fn create_app(state: Arc<AppState>) -> Router {
    let server_timeout = state.request_deadline + SERVER_TIMEOUT_MARGIN;

    let common_middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(axum::middleware::from_fn(
            middleware::assign_transaction_id,
        ))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            server_timeout,
        ));

    let app = Router::new()
        .merge(routes::publish_routes())
        .merge(routes::admin_routes())
        .layer(common_middleware)
        .with_state(state);

    info!("Web application created with all routes and middleware");
    app
}

/// Request span with an empty `transaction_id` field, filled in by
/// [`middleware::assign_transaction_id`]
fn request_span(request: &Request) -> tracing::Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        version = ?request.version(),
        transaction_id = tracing::field::Empty,
    )
}

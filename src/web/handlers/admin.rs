//! Build and API description endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::web::errors::{ApiError, ApiResult};
use crate::web::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// GET /__build-info
pub async fn build_info() -> Json<BuildInfo> {
    Json(BuildInfo::current())
}

/// GET /__api
pub async fn api_description(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let description = state
        .api_description
        .clone()
        .ok_or_else(|| ApiError::not_found("API description is not available"))?;

    Ok(([(CONTENT_TYPE, "text/vnd.yaml")], description))
}

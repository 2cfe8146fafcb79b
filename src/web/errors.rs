//! # Web API Error Types
//!
//! Every failure leaves the service as `{"message": "..."}` with a status code
//! reflecting the error kind.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::error::PublishError;
use crate::validation::ValidationError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    GatewayTimeout { message: String },

    #[error("{message}")]
    ServiceUnavailable { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::GatewayTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            Self::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<PublishError> for ApiError {
    fn from(err: PublishError) -> Self {
        match err {
            PublishError::DraftNotFound { .. } => Self::NotFound {
                message: "No draft annotations found to publish".to_string(),
            },
            PublishError::ServiceTimeout { .. } => Self::GatewayTimeout {
                message: "Timed out waiting for a downstream service".to_string(),
            },
            PublishError::Downstream(source) => Self::ServiceUnavailable {
                message: format!("Failed to publish annotations: {source}"),
            },
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

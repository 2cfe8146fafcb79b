//! # Transaction ID Middleware
//!
//! Reuses the caller's `X-Request-Id` when one is supplied, otherwise
//! generates a `tid_` id, and echoes it on the response.

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

use crate::models::{TransactionId, TRANSACTION_ID_HEADER};

const TRANSACTION_ID_RESPONSE_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Attach a [`TransactionId`] to the request extensions and response headers
pub async fn assign_transaction_id(mut request: Request, next: Next) -> Response {
    let transaction_id = request
        .headers()
        .get(TRANSACTION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(TransactionId::new)
        .unwrap_or_else(TransactionId::generate);

    request.extensions_mut().insert(transaction_id.clone());

    let span = tracing::Span::current();
    span.record("transaction_id", transaction_id.as_str());

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(transaction_id.as_str()) {
        response
            .headers_mut()
            .insert(TRANSACTION_ID_RESPONSE_HEADER, value);
    }

    response
}

//! # Publish Handler
//!
//! Request-shape validation for `POST /drafts/content/{uuid}/annotations/publish`.
//! Every caller error is rejected here, before the orchestrator makes any
//! downstream call.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::models::{
    DocumentHash, OriginSystemId, TransactionId, ORIGIN_SYSTEM_ID_HEADER,
    PREVIOUS_DOCUMENT_HASH_HEADER,
};
use crate::web::errors::{ApiError, ApiResult};
use crate::web::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PublishQuery {
    #[serde(rename = "fromStore")]
    pub from_store: Option<String>,
}

/// Publish annotations: POST /drafts/content/{uuid}/annotations/publish
///
/// With `fromStore=true` the current draft is published as is and no body is
/// accepted. Otherwise the body is validated, saved under the
/// `Previous-Document-Hash` precondition and then published.
pub async fn publish_annotations(
    State(state): State<Arc<AppState>>,
    Extension(transaction_id): Extension<TransactionId>,
    Path(uuid): Path<String>,
    query: Result<Query<PublishQuery>, QueryRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let uuid = uuid.trim().to_string();
    if uuid.is_empty() {
        return Err(ApiError::bad_request("Content uuid must be provided"));
    }
    if uuid == "." || uuid == ".." {
        return Err(ApiError::bad_request(format!("Invalid content uuid '{uuid}'")));
    }

    let origin_system_id = headers
        .get(ORIGIN_SYSTEM_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(OriginSystemId::parse)
        .ok_or_else(|| {
            ApiError::bad_request(format!("{ORIGIN_SYSTEM_ID_HEADER} header must be provided"))
        })?;

    let Query(query) =
        query.map_err(|e| ApiError::bad_request(format!("Invalid query string: {e}")))?;
    let from_store = match query.from_store.as_deref() {
        Some(value) => parse_flag(value).ok_or_else(|| {
            ApiError::bad_request(format!(
                "Invalid fromStore value '{value}': expected true or false"
            ))
        })?,
        None => false,
    };

    let ctx = state.request_context(transaction_id, origin_system_id);
    debug!(
        transaction_id = %ctx.transaction_id,
        uuid = %uuid,
        from_store,
        "Publish request received"
    );

    if from_store {
        if !is_blank(&body) {
            return Err(ApiError::bad_request(
                "A request body cannot be provided when fromStore=true",
            ));
        }
        state.publisher.publish_from_store(&ctx, &uuid).await?;
    } else {
        if is_blank(&body) {
            return Err(ApiError::bad_request(
                "A request body is required unless fromStore=true",
            ));
        }
        let annotations = state.validator.parse_annotations(&body)?;
        let hash = headers
            .get(PREVIOUS_DOCUMENT_HASH_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(DocumentHash::new)
            .unwrap_or_default();

        state
            .publisher
            .save_and_publish(&ctx, &uuid, &hash, &annotations)
            .await?;
    }

    info!(transaction_id = %ctx.transaction_id, uuid = %uuid, "Publish accepted");
    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "message": "Publish accepted" })),
    ))
}

/// Boolean query flag, accepting the usual spellings of true and false
fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

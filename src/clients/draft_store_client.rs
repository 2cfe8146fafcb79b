//! # Draft Annotations API Client
//!
//! HTTP client for the draft annotations read/write store. The store is
//! addressed through an endpoint template containing a `{uuid}` placeholder;
//! its health probe lives at `/__gtg` on the same host.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::clients::http::{parse_endpoint, probe, send, with_request_context};
use crate::clients::traits::{DraftAnnotations, DraftAnnotationsClient};
use crate::error::{ClientError, ClientResult};
use crate::models::{
    AnnotationSet, DocumentHash, RequestContext, DOCUMENT_HASH_HEADER, ORIGIN_SYSTEM_ID_HEADER,
    PREVIOUS_DOCUMENT_HASH_HEADER,
};

/// Placeholder substituted with the content uuid in the rw endpoint template
pub const UUID_PLACEHOLDER: &str = "{uuid}";

const GTG_PATH: &str = "/__gtg";

/// Configuration for the draft annotations client
#[derive(Debug, Clone)]
pub struct DraftAnnotationsApiConfig {
    /// Endpoint template, e.g. `http://draft-annotations-api:8080/drafts/content/{uuid}/annotations`
    pub rw_endpoint: String,
    /// Transport timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for DraftAnnotationsApiConfig {
    fn default() -> Self {
        Self {
            rw_endpoint: "http://draft-annotations-api:8080/drafts/content/{uuid}/annotations"
                .to_string(),
            timeout_ms: 8000,
        }
    }
}

/// HTTP client for the draft annotations store
#[derive(Clone)]
pub struct DraftAnnotationsApiClient {
    client: Client,
    rw_endpoint: String,
    gtg_url: Url,
    timeout: Duration,
}

impl std::fmt::Debug for DraftAnnotationsApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraftAnnotationsApiClient")
            .field("rw_endpoint", &self.rw_endpoint)
            .field("gtg_url", &self.gtg_url.as_str())
            .field("timeout_ms", &self.timeout.as_millis())
            .finish()
    }
}

impl DraftAnnotationsApiClient {
    /// Create a client on top of the shared HTTP connection pool.
    ///
    /// The health probe URL is resolved once here, relative to the rw endpoint.
    pub fn new(config: DraftAnnotationsApiConfig, client: Client) -> ClientResult<Self> {
        if !config.rw_endpoint.contains(UUID_PLACEHOLDER) {
            return Err(ClientError::invalid_endpoint(
                &config.rw_endpoint,
                format!("endpoint template must contain {UUID_PLACEHOLDER}"),
            ));
        }

        let base = parse_endpoint(&config.rw_endpoint)?;
        let gtg_url = base
            .join(GTG_PATH)
            .map_err(|e| ClientError::invalid_endpoint(&config.rw_endpoint, e.to_string()))?;

        debug!(
            rw_endpoint = %config.rw_endpoint,
            gtg_url = %gtg_url,
            timeout_ms = config.timeout_ms,
            "Created draft annotations API client"
        );

        Ok(Self {
            client,
            rw_endpoint: config.rw_endpoint,
            gtg_url,
            timeout: Duration::from_millis(config.timeout_ms),
        })
    }

    /// The resolved health probe URL
    pub fn gtg_url(&self) -> &str {
        self.gtg_url.as_str()
    }

    /// Substitute `uuid` into the endpoint template as a single path segment
    fn annotations_url(&self, uuid: &str) -> ClientResult<Url> {
        if uuid.is_empty() || uuid == "." || uuid == ".." {
            return Err(ClientError::invalid_endpoint(
                &self.rw_endpoint,
                format!("'{uuid}' is not a valid content identifier"),
            ));
        }

        let endpoint = self
            .rw_endpoint
            .replace(UUID_PLACEHOLDER, &urlencoding::encode(uuid));
        parse_endpoint(&endpoint)
    }
}

fn document_hash(headers: &HeaderMap) -> DocumentHash {
    headers
        .get(DOCUMENT_HASH_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(DocumentHash::new)
        .unwrap_or_default()
}

#[async_trait]
impl DraftAnnotationsClient for DraftAnnotationsApiClient {
    async fn get_annotations(
        &self,
        ctx: &RequestContext,
        uuid: &str,
    ) -> ClientResult<DraftAnnotations> {
        let mut url = self.annotations_url(uuid)?;
        url.query_pairs_mut().append_pair("sendHasBrand", "true");
        let endpoint = url.to_string();

        debug!(
            transaction_id = %ctx.transaction_id,
            uuid = %uuid,
            url = %endpoint,
            "Reading draft annotations"
        );

        let request = with_request_context(self.client.get(url), ctx, self.timeout, &endpoint)?;
        let response = send(request, &endpoint).await?;

        match response.status() {
            StatusCode::OK => {
                let hash = document_hash(response.headers());
                let body = response
                    .bytes()
                    .await
                    .map_err(|e| ClientError::from_transport(&endpoint, e))?;
                let annotations: AnnotationSet = serde_json::from_slice(&body)?;

                Ok(DraftAnnotations::new(annotations, hash))
            }
            StatusCode::NOT_FOUND => Err(ClientError::NotFound {
                uuid: uuid.to_string(),
            }),
            status => Err(ClientError::unexpected_status(endpoint, status.as_u16())),
        }
    }

    async fn save_annotations(
        &self,
        ctx: &RequestContext,
        uuid: &str,
        hash: &DocumentHash,
        annotations: &AnnotationSet,
    ) -> ClientResult<DraftAnnotations> {
        let url = self.annotations_url(uuid)?;
        let endpoint = url.to_string();
        let body = serde_json::to_vec(annotations)?;

        debug!(
            transaction_id = %ctx.transaction_id,
            uuid = %uuid,
            url = %endpoint,
            previous_hash = %hash,
            "Writing draft annotations"
        );

        let request = self
            .client
            .put(url)
            .header(CONTENT_TYPE, "application/json")
            .header(PREVIOUS_DOCUMENT_HASH_HEADER, hash.as_str())
            .header(ORIGIN_SYSTEM_ID_HEADER, ctx.origin_system_id.as_str())
            .body(body);
        let request = with_request_context(request, ctx, self.timeout, &endpoint)?;
        let response = send(request, &endpoint).await?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => {
                let new_hash = document_hash(response.headers());
                let body = response
                    .bytes()
                    .await
                    .map_err(|e| ClientError::from_transport(&endpoint, e))?;

                // Some store backends acknowledge a write without echoing the document.
                let stored = if body.iter().all(u8::is_ascii_whitespace) {
                    annotations.clone()
                } else {
                    serde_json::from_slice(&body)?
                };

                Ok(DraftAnnotations::new(stored, new_hash))
            }
            status => Err(ClientError::unexpected_status(endpoint, status.as_u16())),
        }
    }

    async fn gtg(&self) -> ClientResult<()> {
        probe(&self.client, &self.gtg_url, self.timeout).await
    }

    fn endpoint(&self) -> &str {
        &self.rw_endpoint
    }
}

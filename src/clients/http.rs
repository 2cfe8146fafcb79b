//! Shared outbound HTTP plumbing.
//!
//! One [`reqwest::Client`] (and therefore one connection pool) is built at
//! startup and cloned into both downstream clients; it is safe for concurrent
//! use by every in-flight request.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, Url};

use crate::error::{ClientError, ClientResult};
use crate::models::{RequestContext, TRANSACTION_ID_HEADER};

pub const USER_AGENT: &str = concat!("annotations-publisher/", env!("CARGO_PKG_VERSION"));

/// Build the shared outbound client with the configured transport timeout
pub fn build_http_client(timeout: Duration) -> ClientResult<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .pool_max_idle_per_host(32)
        .build()
        .map_err(ClientError::ClientBuild)
}

/// Parse an absolute endpoint URL
pub(crate) fn parse_endpoint(endpoint: &str) -> ClientResult<Url> {
    let url = Url::parse(endpoint)
        .map_err(|e| ClientError::invalid_endpoint(endpoint, e.to_string()))?;

    if url.cannot_be_a_base() {
        return Err(ClientError::invalid_endpoint(
            endpoint,
            "endpoint must be an absolute http(s) URL",
        ));
    }

    Ok(url)
}

/// Attach the transaction id and bound the call by whatever is left of the
/// request deadline.
///
/// Fails with a timeout without sending anything if the deadline has already passed.
pub(crate) fn with_request_context(
    builder: RequestBuilder,
    ctx: &RequestContext,
    transport_timeout: Duration,
    endpoint: &str,
) -> ClientResult<RequestBuilder> {
    let timeout = match ctx.remaining() {
        Some(remaining) if remaining.is_zero() => {
            return Err(ClientError::Timeout {
                endpoint: endpoint.to_string(),
            })
        }
        Some(remaining) => remaining.min(transport_timeout),
        None => transport_timeout,
    };

    Ok(builder
        .timeout(timeout)
        .header(TRANSACTION_ID_HEADER, ctx.transaction_id.as_str()))
}

pub(crate) async fn send(builder: RequestBuilder, endpoint: &str) -> ClientResult<Response> {
    builder
        .send()
        .await
        .map_err(|e| ClientError::from_transport(endpoint, e))
}

/// GET a health endpoint and require a 200
pub(crate) async fn probe(client: &Client, url: &Url, timeout: Duration) -> ClientResult<()> {
    let response = send(client.get(url.clone()).timeout(timeout), url.as_str()).await?;

    if response.status() == reqwest::StatusCode::OK {
        Ok(())
    } else {
        Err(ClientError::unexpected_status(
            url.as_str(),
            response.status().as_u16(),
        ))
    }
}

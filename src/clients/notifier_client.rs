//! # Publishing Notifier Client
//!
//! HTTP client for the downstream notifier that distributes annotations to
//! production consumers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::clients::http::{parse_endpoint, send, with_request_context};
use crate::clients::traits::PublishNotifier;
use crate::error::{ClientError, ClientResult};
use crate::models::{AnnotationSet, RequestContext, ORIGIN_SYSTEM_ID_HEADER};

/// Basic-auth credentials for the notifier
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    /// Parse a `user:password` pair. The password may itself contain colons.
    pub fn parse(value: &str) -> Option<Self> {
        let (username, password) = value.split_once(':')?;
        if username.is_empty() {
            return None;
        }
        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Configuration for the notifier client
#[derive(Debug, Clone)]
pub struct PublishingNotifierConfig {
    pub publish_endpoint: String,
    pub gtg_endpoint: String,
    pub auth: Option<BasicAuth>,
    /// Transport timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for PublishingNotifierConfig {
    fn default() -> Self {
        Self {
            publish_endpoint: "http://publishing-notifier:8080/notify".to_string(),
            gtg_endpoint: "http://publishing-notifier:8080/__gtg".to_string(),
            auth: None,
            timeout_ms: 8000,
        }
    }
}

/// HTTP client for the publishing notifier
#[derive(Clone)]
pub struct PublishingNotifierClient {
    client: Client,
    publish_url: Url,
    gtg_url: Url,
    auth: Option<BasicAuth>,
    timeout: Duration,
}

impl std::fmt::Debug for PublishingNotifierClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishingNotifierClient")
            .field("publish_url", &self.publish_url.as_str())
            .field("gtg_url", &self.gtg_url.as_str())
            .field("auth_enabled", &self.auth.is_some())
            .field("timeout_ms", &self.timeout.as_millis())
            .finish()
    }
}

impl PublishingNotifierClient {
    pub fn new(config: PublishingNotifierConfig, client: Client) -> ClientResult<Self> {
        let publish_url = parse_endpoint(&config.publish_endpoint)?;
        let gtg_url = parse_endpoint(&config.gtg_endpoint)?;

        debug!(
            publish_url = %publish_url,
            gtg_url = %gtg_url,
            auth_enabled = config.auth.is_some(),
            "Created publishing notifier client"
        );

        Ok(Self {
            client,
            publish_url,
            gtg_url,
            auth: config.auth,
            timeout: Duration::from_millis(config.timeout_ms),
        })
    }

    pub fn gtg_url(&self) -> &str {
        self.gtg_url.as_str()
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Some(auth) => request.basic_auth(&auth.username, Some(&auth.password)),
            None => request,
        }
    }
}

#[async_trait]
impl PublishNotifier for PublishingNotifierClient {
    async fn publish(
        &self,
        ctx: &RequestContext,
        uuid: &str,
        mut annotations: AnnotationSet,
    ) -> ClientResult<()> {
        annotations.set_uuid(uuid);
        let body = serde_json::to_vec(&annotations)?;
        let endpoint = self.publish_url.as_str();

        debug!(
            transaction_id = %ctx.transaction_id,
            uuid = %uuid,
            origin_system_id = %ctx.origin_system_id,
            url = %endpoint,
            "Publishing annotations"
        );

        let request = self
            .client
            .post(self.publish_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ORIGIN_SYSTEM_ID_HEADER, ctx.origin_system_id.as_str())
            .body(body);
        let request = with_request_context(self.authorize(request), ctx, self.timeout, endpoint)?;
        let response = send(request, endpoint).await?;

        match response.status() {
            StatusCode::OK => Ok(()),
            status => Err(ClientError::unexpected_status(endpoint, status.as_u16())),
        }
    }

    async fn gtg(&self) -> ClientResult<()> {
        let endpoint = self.gtg_url.as_str();
        let request = self
            .authorize(self.client.get(self.gtg_url.clone()))
            .timeout(self.timeout);
        let response = send(request, endpoint).await?;

        match response.status() {
            StatusCode::OK => Ok(()),
            status => Err(ClientError::unexpected_status(endpoint, status.as_u16())),
        }
    }

    fn endpoint(&self) -> &str {
        self.publish_url.as_str()
    }
}

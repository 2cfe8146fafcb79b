//! # Error Types
//!
//! Error taxonomy shared by the downstream clients, the publish orchestrator and
//! configuration loading. The web layer maps these onto HTTP responses in
//! [`crate::web::errors`].

use thiserror::Error;

/// Result type for draft store and notifier client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type for publish orchestration
pub type PublishResult<T> = Result<T, PublishError>;

/// Failures reported by the outbound HTTP clients
#[derive(Debug, Error)]
pub enum ClientError {
    /// The call exceeded its transport timeout or the request deadline.
    #[error("request to {endpoint} timed out")]
    Timeout { endpoint: String },

    /// The draft store holds no document for the requested content.
    #[error("annotations for content {uuid} not found")]
    NotFound { uuid: String },

    #[error("{endpoint} returned an unexpected status: {status}")]
    UnexpectedStatus { endpoint: String, status: u16 },

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to process annotations body: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl ClientError {
    /// Map a transport error, classifying timeouts via reqwest's own predicate.
    pub fn from_transport(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        let endpoint = endpoint.into();
        if source.is_timeout() {
            Self::Timeout { endpoint }
        } else {
            Self::Transport { endpoint, source }
        }
    }

    pub fn unexpected_status(endpoint: impl Into<String>, status: u16) -> Self {
        Self::UnexpectedStatus {
            endpoint: endpoint.into(),
            status,
        }
    }

    pub fn invalid_endpoint(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Whether the failure is a transport timeout
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            ClientError::Timeout { .. } => true,
            ClientError::Transport { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    /// Whether the draft store reported the document as missing
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }
}

/// Classified outcome of a failed publish workflow
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("draft annotations for content {uuid} not found")]
    DraftNotFound { uuid: String },

    #[error("downstream service timed out: {source}")]
    ServiceTimeout {
        #[source]
        source: ClientError,
    },

    #[error(transparent)]
    Downstream(ClientError),
}

impl PublishError {
    /// Classify a draft store failure: timeouts and missing drafts are distinguished.
    pub fn from_draft_store(uuid: &str, err: ClientError) -> Self {
        if err.is_not_found() {
            PublishError::DraftNotFound {
                uuid: uuid.to_string(),
            }
        } else {
            PublishError::from(err)
        }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, PublishError::ServiceTimeout { .. })
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, PublishError::DraftNotFound { .. })
    }
}

impl From<ClientError> for PublishError {
    fn from(err: ClientError) -> Self {
        if err.is_timeout() {
            PublishError::ServiceTimeout { source: err }
        } else {
            PublishError::Downstream(err)
        }
    }
}

/// Startup configuration problems
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigurationError {
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

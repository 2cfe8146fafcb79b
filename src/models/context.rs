//! Per-request metadata threaded explicitly through every client and
//! orchestrator call.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use uuid::Uuid;

/// Header carrying the transaction id on inbound and outbound requests
pub const TRANSACTION_ID_HEADER: &str = "X-Request-Id";

/// Header identifying the upstream system that triggered the publish
pub const ORIGIN_SYSTEM_ID_HEADER: &str = "X-Origin-System-Id";

/// Optimistic-concurrency precondition sent to the draft store
pub const PREVIOUS_DOCUMENT_HASH_HEADER: &str = "Previous-Document-Hash";

/// Version token returned by the draft store
pub const DOCUMENT_HASH_HEADER: &str = "Document-Hash";

/// Correlation id for one inbound request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generate a fresh id in the `tid_` format used across the platform.
    pub fn generate() -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!("tid_{}", &suffix[..10]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the upstream system that initiated a publish.
///
/// Never empty: construction rejects blank values, so a publish can only be
/// issued once the caller has supplied one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OriginSystemId(String);

impl OriginSystemId {
    pub fn parse(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OriginSystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque version token ("hash") issued by the draft store.
///
/// An empty token is allowed on writes; the draft store does not currently
/// enforce the precondition for it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct DocumentHash(String);

impl DocumentHash {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DocumentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata for one publish request
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub transaction_id: TransactionId,
    pub origin_system_id: OriginSystemId,
    /// Point in time after which outbound calls are reported as timed out
    pub deadline: Option<Instant>,
}

impl RequestContext {
    pub fn new(transaction_id: TransactionId, origin_system_id: OriginSystemId) -> Self {
        Self {
            transaction_id,
            origin_system_id,
            deadline: None,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Time left before the deadline, `None` when no deadline is set.
    ///
    /// Returns `Some(Duration::ZERO)` once the deadline has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    pub fn is_expired(&self) -> bool {
        matches!(self.remaining(), Some(remaining) if remaining.is_zero())
    }
}

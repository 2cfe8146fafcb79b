//! # Health Service
//!
//! Aggregates the draft store and notifier probes into the readiness check and
//! the detailed health report. Every call probes both dependencies afresh;
//! nothing is cached or retried.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::future::try_join;
use tracing::{debug, warn};

use crate::clients::{DraftAnnotationsClient, PublishNotifier};
use crate::health::types::{HealthCheckResult, HealthReport, LivenessResponse};

pub const DRAFT_STORE_CHECK_ID: &str = "check-connectivity-to-draft-annotations-rw";
pub const NOTIFIER_CHECK_ID: &str = "check-connectivity-to-publishing-notifier";

/// Identity of the running service, reported in the health payload
#[derive(Debug, Clone)]
pub struct ServiceIdentity {
    pub system_code: String,
    pub name: String,
    pub description: String,
    /// Runbook link attached to every check
    pub panic_guide: String,
}

impl Default for ServiceIdentity {
    fn default() -> Self {
        Self {
            system_code: "annotations-publisher".to_string(),
            name: "Annotations Publisher".to_string(),
            description: "Publishes draft annotations to the publishing pipeline".to_string(),
            panic_guide: "https://runbooks.example.com/annotations-publisher".to_string(),
        }
    }
}

pub struct HealthService {
    identity: ServiceIdentity,
    draft_store: Arc<dyn DraftAnnotationsClient>,
    notifier: Arc<dyn PublishNotifier>,
    start_time: Instant,
}

impl std::fmt::Debug for HealthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthService")
            .field("system_code", &self.identity.system_code)
            .field("draft_store", &self.draft_store.endpoint())
            .field("notifier", &self.notifier.endpoint())
            .field("uptime_seconds", &self.uptime_seconds())
            .finish()
    }
}

impl HealthService {
    pub fn new(
        identity: ServiceIdentity,
        draft_store: Arc<dyn DraftAnnotationsClient>,
        notifier: Arc<dyn PublishNotifier>,
    ) -> Self {
        Self {
            identity,
            draft_store,
            notifier,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub fn identity(&self) -> &ServiceIdentity {
        &self.identity
    }

    /// Readiness probe: GET /__gtg
    ///
    /// Probes both dependencies concurrently and fails as soon as either
    /// fails, carrying that probe's message.
    pub async fn gtg(&self) -> Result<(), String> {
        debug!("Performing readiness probe");

        let result = try_join(self.draft_store_gtg(), self.notifier_gtg())
            .await
            .map(|_| ());

        if let Err(message) = &result {
            warn!(reason = %message, "Readiness probe failed");
        }
        result
    }

    /// Liveness probe: GET /__live
    pub fn liveness(&self) -> LivenessResponse {
        LivenessResponse {
            status: "alive".to_string(),
            timestamp: Utc::now(),
            uptime_seconds: self.uptime_seconds(),
        }
    }

    /// Detailed health report: GET /__health
    ///
    /// Runs every check to completion regardless of the others' outcome.
    pub async fn detailed_health(&self) -> HealthReport {
        let (draft_store, notifier) =
            futures::join!(self.draft_store_check(), self.notifier_check());
        let checks = vec![draft_store, notifier];

        let ok = checks.iter().all(|check| check.ok);
        let severity = checks
            .iter()
            .filter(|check| !check.ok)
            .map(|check| check.severity)
            .min()
            .unwrap_or(1);

        HealthReport {
            schema_version: 1,
            system_code: self.identity.system_code.clone(),
            name: self.identity.name.clone(),
            description: self.identity.description.clone(),
            ok,
            severity,
            checks,
        }
    }

    /// Connectivity check against the draft annotations store
    pub async fn draft_store_check(&self) -> HealthCheckResult {
        let outcome = self.draft_store_gtg().await;
        HealthCheckResult {
            id: DRAFT_STORE_CHECK_ID.to_string(),
            name: "Check connectivity to Draft Annotations RW API".to_string(),
            ok: outcome.is_ok(),
            severity: 1,
            business_impact: "Annotations cannot be published".to_string(),
            technical_summary: format!(
                "Checks that the draft annotations store at {} is reachable. Publishing \
                 reads from and writes to this service.",
                self.draft_store.endpoint()
            ),
            panic_guide: self.identity.panic_guide.clone(),
            check_output: check_output(outcome),
            last_updated: Utc::now(),
        }
    }

    /// Connectivity check against the publishing notifier
    pub async fn notifier_check(&self) -> HealthCheckResult {
        let outcome = self.notifier_gtg().await;
        HealthCheckResult {
            id: NOTIFIER_CHECK_ID.to_string(),
            name: "Check connectivity to the publishing notifier".to_string(),
            ok: outcome.is_ok(),
            severity: 1,
            business_impact: "Annotations cannot be published".to_string(),
            technical_summary: format!(
                "Checks that the notifier at {} is reachable. Published annotations are \
                 submitted to this service.",
                self.notifier.endpoint()
            ),
            panic_guide: self.identity.panic_guide.clone(),
            check_output: check_output(outcome),
            last_updated: Utc::now(),
        }
    }

    async fn draft_store_gtg(&self) -> Result<(), String> {
        self.draft_store.gtg().await.map_err(|e| {
            format!(
                "Draft annotations RW API at {} is not good-to-go: {e}",
                self.draft_store.endpoint()
            )
        })
    }

    async fn notifier_gtg(&self) -> Result<(), String> {
        self.notifier.gtg().await.map_err(|e| {
            format!(
                "Publishing notifier at {} is not good-to-go: {e}",
                self.notifier.endpoint()
            )
        })
    }
}

fn check_output(outcome: Result<(), String>) -> String {
    match outcome {
        Ok(()) => "OK".to_string(),
        Err(message) => message,
    }
}

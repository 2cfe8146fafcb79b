//! Health monitoring for the two downstream dependencies

pub mod service;
pub mod types;

pub use service::{HealthService, ServiceIdentity, DRAFT_STORE_CHECK_ID, NOTIFIER_CHECK_ID};
pub use types::{HealthCheckResult, HealthReport, LivenessResponse};

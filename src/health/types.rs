use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one dependency check in the detailed health report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResult {
    pub id: String,
    pub name: String,
    pub ok: bool,
    /// 1 is the most severe
    pub severity: u8,
    pub business_impact: String,
    pub technical_summary: String,
    pub panic_guide: String,
    pub check_output: String,
    pub last_updated: DateTime<Utc>,
}

/// Aggregate health report served on `/__health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub schema_version: u8,
    pub system_code: String,
    pub name: String,
    pub description: String,
    pub ok: bool,
    pub severity: u8,
    pub checks: Vec<HealthCheckResult>,
}

impl HealthReport {
    pub fn check(&self, id: &str) -> Option<&HealthCheckResult> {
        self.checks.iter().find(|check| check.id == id)
    }
}

/// Liveness probe response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
}

//! Response bodies for the informational routes.

use serde::{Deserialize, Serialize};

pub const SERVICE_STATUS: &str = "Keyword Lookup Proxy is running";
pub const ENDPOINTS: [&str; 2] = ["/ranked_keywords", "/health"];

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
    pub endpoints: Vec<String>,
}

impl Default for ServiceStatus {
    fn default() -> Self {
        Self {
            status: SERVICE_STATUS.to_string(),
            endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// ISO-8601, millisecond precision, UTC (`2026-01-02T03:04:05.678Z`).
    pub timestamp: String,
}

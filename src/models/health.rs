use serde::Deserialize;

/// Liveness report from the backend. The system/resources/uptime blocks are
/// free-form and only logged, never inspected.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub system: serde_json::Value,
    #[serde(default)]
    pub resources: serde_json::Value,
    #[serde(default)]
    pub uptime: serde_json::Value,
}

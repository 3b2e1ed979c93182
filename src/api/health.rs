use std::sync::Arc;

use tracing::error;

use crate::error::ApiError;
use crate::http::{ApiClient, ApiRequest};
use crate::models::HealthReport;

/// Pre-flight liveness probe. Callers that see a failure here are expected
/// to switch to a degraded data path instead of surfacing a hard error.
#[derive(Clone)]
pub struct HealthClient {
    core: Arc<ApiClient>,
}

impl HealthClient {
    pub fn new(core: Arc<ApiClient>) -> Self {
        Self { core }
    }

    pub async fn check(&self) -> Result<HealthReport, ApiError> {
        let request = ApiRequest::get(self.core.url("/api/health/"));
        let response = self
            .core
            .send(request)
            .await
            .inspect_err(|e| error!("health check failed: {e}"))?;

        serde_json::from_str(&response.body).map_err(|e| ApiError::Parse {
            message: format!("invalid health response: {e}"),
            status: response.status,
        })
    }
}

use std::sync::Arc;

use serde_json::json;
use tracing::error;

use crate::error::ApiError;
use crate::http::{ApiClient, ApiRequest};
use crate::models::{ActivityItem, NewProfileRequest, ProfileUpdate, UserProfile, UserStats};

use super::{parse_envelope, url_with_params};

#[derive(Clone)]
pub struct DashboardClient {
    core: Arc<ApiClient>,
}

impl DashboardClient {
    pub fn new(core: Arc<ApiClient>) -> Self {
        Self { core }
    }

    /// A profile that does not exist yet arrives as HTTP 404; callers use
    /// that to fall into the create-profile path.
    pub async fn user_profile(&self, user_id: &str) -> Result<UserProfile, ApiError> {
        let url = url_with_params(
            self.core.url("/api/dashboard/user-profile"),
            &[("user_id", user_id.to_string())],
        )?;
        let response = self
            .core
            .send(ApiRequest::get(url))
            .await
            .inspect_err(|e| error!("failed to fetch user profile for {user_id}: {e}"))?;
        parse_envelope(&response, "Failed to fetch user profile")
    }

    pub async fn user_stats(&self, user_id: &str) -> Result<UserStats, ApiError> {
        let url = url_with_params(
            self.core.url("/api/dashboard/stats"),
            &[("user_id", user_id.to_string())],
        )?;
        let response = self
            .core
            .send(ApiRequest::get(url))
            .await
            .inspect_err(|e| error!("failed to fetch user stats for {user_id}: {e}"))?;
        parse_envelope(&response, "Failed to fetch user stats")
    }

    pub async fn recent_activity(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<ActivityItem>, ApiError> {
        let url = url_with_params(
            self.core.url("/api/dashboard/recent-activity"),
            &[
                ("user_id", user_id.to_string()),
                ("limit", limit.to_string()),
            ],
        )?;
        let response = self
            .core
            .send(ApiRequest::get(url))
            .await
            .inspect_err(|e| error!("failed to fetch recent activity for {user_id}: {e}"))?;
        parse_envelope(&response, "Failed to fetch recent activity")
    }

    pub async fn create_profile(&self, profile: &NewProfileRequest) -> Result<UserProfile, ApiError> {
        if profile.clerk_user_id.trim().is_empty() {
            return Err(ApiError::Validation {
                missing: vec!["clerk_user_id".to_string()],
            });
        }

        let body = json!({ "user_data": profile });
        let request = ApiRequest::post(self.core.url("/api/dashboard/create-profile"), body);
        let response = self
            .core
            .send(request)
            .await
            .inspect_err(|e| error!("failed to create user profile: {e}"))?;
        parse_envelope(&response, "Failed to create profile")
    }

    pub async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, ApiError> {
        let body = json!({
            "user_id": user_id,
            "profile_data": update,
        });
        let request = ApiRequest::post(self.core.url("/api/dashboard/update-profile"), body);
        let response = self
            .core
            .send(request)
            .await
            .inspect_err(|e| error!("failed to update user profile for {user_id}: {e}"))?;
        parse_envelope(&response, "Failed to update profile")
    }
}

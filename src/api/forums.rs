use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::error::ApiError;
use crate::http::{ApiClient, ApiRequest};
use crate::models::{Course, NewPostRequest, NewReplyRequest, Post, Reply, UpvoteOutcome};
use crate::utils;

use super::{parse_envelope, url_with_params};

pub const DEFAULT_POST_LIMIT: u32 = 20;

#[derive(Clone)]
pub struct ForumsClient {
    core: Arc<ApiClient>,
}

impl ForumsClient {
    pub fn new(core: Arc<ApiClient>) -> Self {
        Self { core }
    }

    pub async fn get_courses(&self) -> Result<Vec<Course>, ApiError> {
        let request = ApiRequest::get(self.core.url("/api/forums/courses"));
        let response = self
            .core
            .send(request)
            .await
            .inspect_err(|e| error!("failed to fetch courses: {e}"))?;
        parse_envelope(&response, "Failed to fetch courses")
    }

    pub async fn get_posts(
        &self,
        course: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Post>, ApiError> {
        if course.trim().is_empty() {
            return Err(ApiError::Validation {
                missing: vec!["course".to_string()],
            });
        }

        let url = url_with_params(
            self.core.url("/api/forums/posts"),
            &[
                ("course", course.to_string()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ],
        )?;
        let response = self
            .core
            .send(ApiRequest::get(url))
            .await
            .inspect_err(|e| error!("failed to fetch posts for course {course}: {e}"))?;
        parse_envelope(&response, "Failed to fetch posts")
    }

    /// All five fields are mandatory; blank ones are rejected here, before
    /// any network call, naming every missing field.
    pub async fn create_post(&self, post: &NewPostRequest) -> Result<Post, ApiError> {
        let missing = utils::missing_fields(&[
            ("title", &post.title),
            ("content", &post.content),
            ("course", &post.course),
            ("user_id", &post.user_id),
            ("user_name", &post.user_name),
        ]);
        if !missing.is_empty() {
            return Err(ApiError::Validation { missing });
        }

        info!("creating post for course {}", post.course);
        let body = json!({
            "title": post.title,
            "content": post.content,
            "course": post.course,
            "user_id": post.user_id,
            "user_name": post.user_name,
        });
        let request = ApiRequest::post(self.core.url("/api/forums/posts"), body);
        let response = self
            .core
            .send(request)
            .await
            .inspect_err(|e| error!("failed to create post: {e}"))?;
        parse_envelope(&response, "Failed to create post")
    }

    /// Each call flips the (post, user) upvote state on the server, so the
    /// caller must keep the control disabled while a request is in flight.
    pub async fn toggle_upvote(&self, post_id: i64, user_id: &str) -> Result<UpvoteOutcome, ApiError> {
        let url = self.core.url(&format!("/api/forums/posts/{post_id}/upvote"));
        let request = ApiRequest::post(url, json!({ "user_id": user_id }));
        let response = self
            .core
            .send(request)
            .await
            .inspect_err(|e| error!("failed to toggle upvote for post {post_id}: {e}"))?;

        let parsed: UpvoteResponse = decode(&response, "Failed to toggle upvote")?;
        match (parsed.action, parsed.upvoted) {
            (Some(action), Some(upvoted)) => Ok(UpvoteOutcome { action, upvoted }),
            _ => Err(ApiError::Parse {
                message: "upvote response is missing action/upvoted".to_string(),
                status: response.status,
            }),
        }
    }

    pub async fn upvote_status(&self, post_id: i64, user_id: &str) -> Result<bool, ApiError> {
        let url = url_with_params(
            self.core
                .url(&format!("/api/forums/posts/{post_id}/upvote-status")),
            &[("user_id", user_id.to_string())],
        )?;
        let response = self
            .core
            .send(ApiRequest::get(url))
            .await
            .inspect_err(|e| error!("failed to get upvote status for post {post_id}: {e}"))?;

        let parsed: UpvoteResponse = decode(&response, "Failed to get upvote status")?;
        parsed.upvoted.ok_or_else(|| ApiError::Parse {
            message: "upvote status response is missing upvoted".to_string(),
            status: response.status,
        })
    }

    pub async fn get_replies(&self, post_id: i64) -> Result<Vec<Reply>, ApiError> {
        let url = self.core.url(&format!("/api/forums/posts/{post_id}/replies"));
        let response = self
            .core
            .send(ApiRequest::get(url))
            .await
            .inspect_err(|e| error!("failed to fetch replies for post {post_id}: {e}"))?;
        parse_envelope(&response, "Failed to fetch replies")
    }

    /// Reply content is trimmed before send; blank fields are rejected
    /// without a network call.
    pub async fn create_reply(
        &self,
        post_id: i64,
        reply: &NewReplyRequest,
    ) -> Result<Reply, ApiError> {
        let content = reply.content.trim();
        let missing = utils::missing_fields(&[
            ("user_id", &reply.user_id),
            ("user_name", &reply.user_name),
            ("content", content),
        ]);
        if !missing.is_empty() {
            return Err(ApiError::Validation { missing });
        }

        let url = self.core.url(&format!("/api/forums/posts/{post_id}/replies"));
        let body = json!({
            "user_id": reply.user_id,
            "user_name": reply.user_name,
            "content": content,
        });
        let response = self
            .core
            .send(ApiRequest::post(url, body))
            .await
            .inspect_err(|e| error!("failed to create reply for post {post_id}: {e}"))?;
        parse_envelope(&response, "Failed to create reply")
    }
}

/// Upvote endpoints answer outside the usual envelope: the flip result sits
/// next to `success` rather than under `data`.
#[derive(Debug, Deserialize)]
struct UpvoteResponse {
    success: bool,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    upvoted: Option<bool>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

fn decode(
    response: &crate::http::ApiResponse,
    fallback_message: &str,
) -> Result<UpvoteResponse, ApiError> {
    let parsed: UpvoteResponse =
        serde_json::from_str(&response.body).map_err(|e| ApiError::Parse {
            message: format!("invalid JSON response: {e}"),
            status: response.status,
        })?;

    if !parsed.success {
        let message = parsed
            .error
            .or(parsed.message)
            .unwrap_or_else(|| fallback_message.to_string());
        return Err(ApiError::Api {
            message,
            status: 500,
            body: response.body.clone(),
        });
    }

    Ok(parsed)
}

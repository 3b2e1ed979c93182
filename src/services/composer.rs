use tokio::sync::Mutex;
use tracing::error;

use crate::api::ForumsClient;
use crate::models::{NewPostRequest, Post};

/// Loading/error pair tracked by the mutation controllers, independent of
/// the feeds they end up refreshing.
#[derive(Debug, Clone, Default)]
pub struct ActionState {
    pub loading: bool,
    pub error: Option<String>,
}

/// Open/close/reset state machine for the new-post composer.
#[derive(Debug, Clone, Default)]
pub struct ComposerForm {
    open: bool,
    title: String,
    content: String,
}

impl ComposerForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn reset(&mut self) {
        self.title.clear();
        self.content.clear();
        self.open = false;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && !self.content.trim().is_empty()
    }

    pub fn draft(&self, course: &str, user_id: &str, user_name: &str) -> NewPostRequest {
        NewPostRequest {
            title: self.title.clone(),
            content: self.content.clone(),
            course: course.to_string(),
            user_id: user_id.to_string(),
            user_name: user_name.to_string(),
        }
    }
}

/// Submits new posts. Failures, including client-side validation, land in
/// the action state instead of propagating; the created post is returned
/// only once the server confirms it, so the caller knows when to reset the
/// form and refetch the feed.
pub struct PostCreator {
    forums: ForumsClient,
    state: Mutex<ActionState>,
}

impl PostCreator {
    pub fn new(forums: ForumsClient) -> Self {
        Self {
            forums,
            state: Mutex::new(ActionState::default()),
        }
    }

    pub async fn submit(&self, draft: &NewPostRequest) -> Option<Post> {
        {
            let mut state = self.state.lock().await;
            state.loading = true;
            state.error = None;
        }

        let result = self.forums.create_post(draft).await;

        let mut state = self.state.lock().await;
        state.loading = false;
        match result {
            Ok(post) => {
                state.error = None;
                Some(post)
            }
            Err(e) => {
                error!("error creating post: {e}");
                state.error = Some(e.to_string());
                None
            }
        }
    }

    pub async fn state(&self) -> ActionState {
        self.state.lock().await.clone()
    }

    pub async fn clear_error(&self) {
        self.state.lock().await.error = None;
    }
}

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use tracing::error;

use crate::api::ForumsClient;
use crate::models::UpvoteOutcome;

use super::composer::ActionState;

/// Upvote toggling. The server flips state on every call, so overlapping
/// submissions (a double-click) must collapse to at most one request; the
/// in-flight flag drops the duplicates. The caller refetches the feed after
/// a confirmed toggle since the server owns the count.
pub struct UpvoteControl {
    forums: ForumsClient,
    in_flight: AtomicBool,
    state: Mutex<ActionState>,
}

impl UpvoteControl {
    pub fn new(forums: ForumsClient) -> Self {
        Self {
            forums,
            in_flight: AtomicBool::new(false),
            state: Mutex::new(ActionState::default()),
        }
    }

    pub async fn toggle(&self, post_id: i64, user_id: &str) -> Option<UpvoteOutcome> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return None;
        }

        {
            let mut state = self.state.lock().await;
            state.loading = true;
            state.error = None;
        }

        let result = self.forums.toggle_upvote(post_id, user_id).await;

        let mut state = self.state.lock().await;
        state.loading = false;
        self.in_flight.store(false, Ordering::SeqCst);
        match result {
            Ok(outcome) => {
                state.error = None;
                Some(outcome)
            }
            Err(e) => {
                error!("error toggling upvote for post {post_id}: {e}");
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

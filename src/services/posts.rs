use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::warn;

use crate::api::{DEFAULT_POST_LIMIT, ForumsClient};
use crate::models::Post;
use crate::utils;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostView {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub course: String,
    pub upvotes: i64,
    pub replies: i64,
    pub time_ago: String,
    pub is_upvoted: bool,
    pub created_at: String,
}

impl PostView {
    fn from_post(post: Post, fallback_course: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: post.id,
            title: if post.title.is_empty() {
                "Untitled".to_string()
            } else {
                post.title
            },
            content: post.content,
            author: if post.user_name.is_empty() {
                "Anonymous".to_string()
            } else {
                post.user_name
            },
            course: if post.course.is_empty() {
                fallback_course.to_string()
            } else {
                post.course
            },
            upvotes: post.upvotes,
            // reply counts and per-user upvote state are not part of the
            // list payload; see upvote_status for the per-post flag
            replies: 0,
            is_upvoted: false,
            time_ago: utils::format_time_ago(Some(&post.created_at), now),
            created_at: post.created_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostsState {
    pub course: Option<String>,
    pub posts: Vec<PostView>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Post list for the selected course. Selections are numbered; a fetch only
/// applies its result while its number is still the newest, so a slow
/// response for a previously selected course can never overwrite the
/// current one.
pub struct PostFeed {
    forums: ForumsClient,
    state: Mutex<PostsState>,
    seq: AtomicU64,
}

impl PostFeed {
    pub fn new(forums: ForumsClient) -> Self {
        Self {
            forums,
            state: Mutex::new(PostsState::default()),
            seq: AtomicU64::new(0),
        }
    }

    pub async fn select_course(&self, course: &str) {
        if course.trim().is_empty() {
            return;
        }

        let my_seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock().await;
            state.course = Some(course.to_string());
            state.loading = true;
            state.error = None;
        }

        let result = self.forums.get_posts(course, DEFAULT_POST_LIMIT, 0).await;

        let mut state = self.state.lock().await;
        if self.seq.load(Ordering::SeqCst) != my_seq {
            // a newer selection is in flight; drop the stale result
            return;
        }

        match result {
            Ok(posts) => {
                let now = Utc::now();
                state.posts = posts
                    .into_iter()
                    .map(|post| PostView::from_post(post, course, now))
                    .collect();
                state.error = None;
            }
            Err(e) => {
                warn!("error fetching posts for course {course}: {e}");
                state.posts.clear();
                state.error = Some("Failed to load posts. Please try again.".to_string());
            }
        }
        state.loading = false;
    }

    pub async fn refetch(&self) {
        let course = { self.state.lock().await.course.clone() };
        if let Some(course) = course {
            self.select_course(&course).await;
        }
    }

    pub async fn snapshot(&self) -> PostsState {
        self.state.lock().await.clone()
    }
}

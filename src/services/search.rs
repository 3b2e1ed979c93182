use chrono::{DateTime, Utc};

use super::posts::PostView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Recent,
    Popular,
    Replies,
}

/// Client-side search and sort over an in-memory post list. Matching is a
/// case-insensitive substring check on title and content.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    query: String,
    sort: SortOrder,
}

impl PostFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn apply(&self, posts: &[PostView]) -> Vec<PostView> {
        let query = self.query.to_lowercase();
        let mut matched: Vec<PostView> = posts
            .iter()
            .filter(|post| !post.title.is_empty() && !post.content.is_empty())
            .filter(|post| {
                post.title.to_lowercase().contains(&query)
                    || post.content.to_lowercase().contains(&query)
            })
            .cloned()
            .collect();

        match self.sort {
            SortOrder::Recent => {
                matched.sort_by(|a, b| parse_created(&b.created_at).cmp(&parse_created(&a.created_at)));
            }
            SortOrder::Popular => matched.sort_by(|a, b| b.upvotes.cmp(&a.upvotes)),
            SortOrder::Replies => matched.sort_by(|a, b| b.replies.cmp(&a.replies)),
        }
        matched
    }
}

fn parse_created(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH)
}

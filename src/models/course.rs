use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub course_code: String,
    pub course_name: String,
    #[serde(default)]
    pub university: Option<String>,
    #[serde(default)]
    pub post_count: i64,
    #[serde(default)]
    pub recent_activity: Option<String>,
}

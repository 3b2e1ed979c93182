use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{error, warn};

use crate::api::{ForumsClient, HealthClient};
use crate::models::Course;
use crate::utils;

/// Shown when the backend is unreachable, so the course directory stays
/// usable in degraded mode.
const FALLBACK_COURSES: [(&str, &str); 3] = [
    ("CSC 111", "Introduction to Computing"),
    ("CSC 112", "Fundamentals of Programming"),
    ("MATH 231", "Calculus I"),
];

const DEGRADED_MESSAGE: &str = "Backend server is not responding. Some features may be limited.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSummary {
    pub id: String,
    pub course_code: String,
    pub course_name: String,
    pub post_count: i64,
    pub recent_activity: String,
}

impl CourseSummary {
    fn from_course(course: Course, now: DateTime<Utc>) -> Self {
        Self {
            id: course.course_code.clone(),
            course_code: course.course_code,
            course_name: course.course_name,
            post_count: course.post_count,
            recent_activity: utils::format_time_ago(course.recent_activity.as_deref(), now),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CoursesState {
    pub courses: Vec<CourseSummary>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Course directory screen state. `refresh` probes health first; when the
/// probe fails the fixed fallback list is installed and the real courses
/// call is never attempted.
pub struct CourseDirectory {
    health: HealthClient,
    forums: ForumsClient,
    state: Mutex<CoursesState>,
}

impl CourseDirectory {
    pub fn new(health: HealthClient, forums: ForumsClient) -> Self {
        Self {
            health,
            forums,
            state: Mutex::new(CoursesState {
                loading: true,
                ..CoursesState::default()
            }),
        }
    }

    pub async fn refresh(&self) {
        {
            let mut state = self.state.lock().await;
            state.loading = true;
            state.error = None;
        }

        if let Err(e) = self.health.check().await {
            warn!("backend health check failed, using fallback data: {e}");
            let mut state = self.state.lock().await;
            state.courses = fallback_courses();
            state.error = Some(DEGRADED_MESSAGE.to_string());
            state.loading = false;
            return;
        }

        match self.forums.get_courses().await {
            Ok(courses) => {
                let now = Utc::now();
                let mapped = courses
                    .into_iter()
                    .map(|course| CourseSummary::from_course(course, now))
                    .collect();
                let mut state = self.state.lock().await;
                state.courses = mapped;
                state.error = None;
                state.loading = false;
            }
            Err(e) => {
                error!("error fetching courses: {e}");
                let mut state = self.state.lock().await;
                state.error = Some(
                    "Failed to load courses. Please check your connection and try again."
                        .to_string(),
                );
                state.loading = false;
            }
        }
    }

    pub async fn snapshot(&self) -> CoursesState {
        self.state.lock().await.clone()
    }
}

fn fallback_courses() -> Vec<CourseSummary> {
    FALLBACK_COURSES
        .iter()
        .map(|(code, name)| CourseSummary {
            id: (*code).to_string(),
            course_code: (*code).to_string(),
            course_name: (*name).to_string(),
            post_count: 0,
            recent_activity: "No activity".to_string(),
        })
        .collect()
}

pub mod composer;
pub mod courses;
pub mod dashboard;
pub mod posts;
pub mod search;
pub mod upvote;

pub use composer::{ActionState, ComposerForm, PostCreator};
pub use courses::{CourseDirectory, CourseSummary, CoursesState};
pub use dashboard::{DashboardController, DashboardState, LocalUser};
pub use posts::{PostFeed, PostView, PostsState};
pub use search::{PostFilter, SortOrder};
pub use upvote::UpvoteControl;

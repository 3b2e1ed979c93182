use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::api::DashboardClient;
use crate::models::{ActivityItem, NewProfileRequest, UserProfile, UserStats};

const ACTIVITY_LIMIT: u32 = 5;

/// Identity data handed over by the external sign-in provider. Only an
/// opaque id and display fields; the provider itself is out of scope.
#[derive(Debug, Clone)]
pub struct LocalUser {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub university: Option<String>,
    pub major: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub profile: Option<UserProfile>,
    pub stats: UserStats,
    pub activity: Vec<ActivityItem>,
    pub loading: bool,
}

/// Dashboard screen state. Profile, stats, and activity are fetched
/// concurrently and joined; each one is defaulted on its own when it fails,
/// so a bad stats call never blanks the profile.
pub struct DashboardController {
    dashboard: DashboardClient,
    state: Mutex<DashboardState>,
}

impl DashboardController {
    pub fn new(dashboard: DashboardClient) -> Self {
        Self {
            dashboard,
            state: Mutex::new(DashboardState {
                loading: true,
                ..DashboardState::default()
            }),
        }
    }

    pub async fn load(&self, user: &LocalUser) {
        {
            let mut state = self.state.lock().await;
            state.loading = true;
        }

        let (profile, stats, activity) = tokio::join!(
            self.dashboard.user_profile(&user.user_id),
            self.dashboard.user_stats(&user.user_id),
            self.dashboard.recent_activity(&user.user_id, ACTIVITY_LIMIT),
        );

        let profile = match profile {
            Ok(profile) => profile,
            Err(e) if e.status() == Some(404) => {
                info!("no profile for {}, creating one", user.user_id);
                self.create_profile(user).await
            }
            Err(e) => {
                error!("failed to fetch user profile for {}: {e}", user.user_id);
                profile_from_identity(user)
            }
        };

        let stats = stats.unwrap_or_else(|e| {
            warn!("failed to fetch user stats for {}: {e}", user.user_id);
            UserStats::default()
        });
        let activity = activity.unwrap_or_else(|e| {
            warn!("failed to fetch recent activity for {}: {e}", user.user_id);
            Vec::new()
        });

        let mut state = self.state.lock().await;
        state.profile = Some(profile);
        state.stats = stats;
        state.activity = activity;
        state.loading = false;
    }

    /// Get-or-create fallback: the server is the sole arbiter if two
    /// clients create concurrently. A failed create degrades to the
    /// identity-provided fields so the screen still renders.
    async fn create_profile(&self, user: &LocalUser) -> UserProfile {
        let request = NewProfileRequest {
            clerk_user_id: user.user_id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            university: user.university.clone(),
            major: user.major.clone(),
            location: user.location.clone(),
            created_at: Utc::now().to_rfc3339(),
        };

        match self.dashboard.create_profile(&request).await {
            Ok(profile) => profile,
            Err(e) => {
                error!("error creating user profile for {}: {e}", user.user_id);
                profile_from_identity(user)
            }
        }
    }

    pub async fn snapshot(&self) -> DashboardState {
        self.state.lock().await.clone()
    }
}

fn profile_from_identity(user: &LocalUser) -> UserProfile {
    UserProfile {
        clerk_user_id: Some(user.user_id.clone()),
        name: user.name.clone(),
        email: user.email.clone(),
        university: user.university.clone(),
        major: user.major.clone(),
        location: user.location.clone(),
        created_at: String::new(),
    }
}

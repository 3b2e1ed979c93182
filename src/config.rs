use std::env;
use std::time::Duration;

use crate::error::ApiError;

/// Which failures get retried, how many times, and how long to wait
/// between attempts.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub attempts: u32,
    pub base_delay: Duration,
    pub retry_server_errors: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            base_delay: Duration::from_secs(1),
            retry_server_errors: true,
        }
    }
}

impl RetryPolicy {
    /// Timeouts and 5xx responses are transient; everything else fails fast.
    pub fn should_retry(&self, error: &ApiError) -> bool {
        match error {
            ApiError::Timeout => true,
            ApiError::Http { status, .. } => self.retry_server_errors && *status >= 500,
            _ => false,
        }
    }

    /// Delay before the next attempt, growing linearly with the attempt
    /// number already spent.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5001".to_string(),
            timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("STUDYSHARE_API_URL") {
            config.base_url = url;
        }
        config
    }
}

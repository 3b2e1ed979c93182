use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studyshare_client::api::{ForumsClient, HealthClient};
use studyshare_client::config::ApiConfig;
use studyshare_client::http::ApiClient;
use studyshare_client::services::CourseDirectory;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "studyshare_client=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();
    info!("using backend at {}", config.base_url);

    let core = Arc::new(ApiClient::new(config)?);
    let directory = CourseDirectory::new(HealthClient::new(core.clone()), ForumsClient::new(core));
    directory.refresh().await;

    let state = directory.snapshot().await;
    if let Some(error) = &state.error {
        println!("(degraded) {error}");
    }
    for course in &state.courses {
        println!(
            "{:<10} {:<40} {:>4} posts  {}",
            course.course_code, course.course_name, course.post_count, course.recent_activity
        );
    }

    Ok(())
}

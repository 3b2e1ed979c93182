pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod services;
pub mod utils;

pub use config::{ApiConfig, RetryPolicy};
pub use error::ApiError;

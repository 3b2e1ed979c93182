use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use tracing::warn;

use crate::config::ApiConfig;
use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(url: String) -> Self {
        Self {
            method: Method::GET,
            url,
            body: None,
        }
    }

    pub fn post(url: String, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            url,
            body: Some(body),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// Single round-trip against the backend. Implementations hold no state
/// beyond their connection machinery, so tests can substitute a scripted
/// fake.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build http client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .header("Content-Type", "application/json");

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;

        Ok(ApiResponse { status, body })
    }
}

fn map_reqwest_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Network(error.to_string())
    }
}

/// Shared request core: builds URLs from the configured base and executes
/// transport calls with bounded retry.
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let transport = Arc::new(ReqwestTransport::new(&config)?);
        Ok(Self { transport, config })
    }

    pub fn with_transport(config: ApiConfig, transport: Arc<dyn Transport>) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Non-2xx statuses become errors here so the retry policy can classify
    /// them; 4xx and connection-level failures surface immediately.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let retry = &self.config.retry;
        let mut attempt = 1;

        loop {
            let result = match self.transport.execute(&request).await {
                Ok(response) if response.status >= 400 => Err(ApiError::Http {
                    status: response.status,
                    body: response.body,
                }),
                other => other,
            };

            match result {
                Ok(response) => return Ok(response),
                Err(error) => {
                    if attempt < retry.attempts && retry.should_retry(&error) {
                        warn!(
                            "request to {} failed (attempt {attempt}): {error}, retrying",
                            request.url
                        );
                        tokio::time::sleep(retry.delay_for(attempt)).await;
                        attempt += 1;
                    } else {
                        return Err(error);
                    }
                }
            }
        }
    }
}

pub mod dashboard;
pub mod forums;
pub mod health;

pub use dashboard::DashboardClient;
pub use forums::{DEFAULT_POST_LIMIT, ForumsClient};
pub use health::HealthClient;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::ApiResponse;

/// The `{success, data, error|message}` wrapper every backend JSON response
/// uses, apart from the health endpoint.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Envelope<T> {
    success: bool,
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Unwrap a response envelope. `success: false` carries the server's own
/// message when it supplied one, with a 500 status when it did not send a
/// real one; a 2xx body that is not valid JSON, or an envelope without
/// `data`, is a parse failure, never a silent empty result.
pub(crate) fn parse_envelope<T: DeserializeOwned>(
    response: &ApiResponse,
    fallback_message: &str,
) -> Result<T, ApiError> {
    let envelope: Envelope<T> =
        serde_json::from_str(&response.body).map_err(|e| ApiError::Parse {
            message: format!("invalid JSON response: {e}"),
            status: response.status,
        })?;

    if !envelope.success {
        let message = envelope
            .error
            .or(envelope.message)
            .unwrap_or_else(|| fallback_message.to_string());
        return Err(ApiError::Api {
            message,
            status: 500,
            body: response.body.clone(),
        });
    }

    envelope.data.ok_or_else(|| ApiError::Parse {
        message: "response envelope is missing data".to_string(),
        status: response.status,
    })
}

/// Append query parameters with proper encoding (course codes contain
/// spaces, user ids are opaque).
pub(crate) fn url_with_params(base: String, params: &[(&str, String)]) -> Result<String, ApiError> {
    let url = reqwest::Url::parse_with_params(&base, params.iter().map(|(k, v)| (*k, v.as_str())))
        .map_err(|e| ApiError::Network(format!("invalid request url: {e}")))?;
    Ok(url.to_string())
}

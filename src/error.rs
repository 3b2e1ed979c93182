use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request timeout")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("{message}")]
    Api {
        message: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response: {message}")]
    Parse { message: String, status: u16 },

    #[error("Missing required fields: {}", missing.join(", "))]
    Validation { missing: Vec<String> },
}

impl ApiError {
    /// HTTP status if the failure carries one. `None` means the backend was
    /// never reached (timeout, connection failure) or the request was
    /// rejected before any network call.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Timeout | ApiError::Network(_) | ApiError::Validation { .. } => None,
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Parse { status, .. } => Some(*status),
        }
    }

    /// Raw response body, where the failure kept one.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Http { body, .. } | ApiError::Api { body, .. } => Some(body),
            _ => None,
        }
    }
}

//! Error types for the HTTP adapter.

use registrar_api::ApiError;
use thiserror::Error;

/// Result type for HTTP adapter operations.
pub type HttpResult<T> = Result<T, HttpError>;

/// Errors raised while talking to the registrar REST API.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    /// A success response carried a body that is not JSON.
    #[error("Invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL is unusable.
    #[error("Invalid base URL '{0}': expected http:// or https://")]
    InvalidBaseUrl(String),
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::Status { status, body } => ApiError::from_status(status, &body),
            HttpError::Decode(e) => ApiError::Decode(e.to_string()),
            HttpError::Http(e) if e.is_decode() => ApiError::Decode(e.to_string()),
            HttpError::Http(e) => ApiError::Network(e.to_string()),
            HttpError::InvalidBaseUrl(_) => ApiError::Network(e.to_string()),
        }
    }
}

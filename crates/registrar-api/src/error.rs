//! Error types for registrar API calls.

use serde::Deserialize;
use thiserror::Error;

/// Result type for registrar API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Uniform failure reported by every transport and controller operation.
///
/// The `Display` output is the human-readable message shown to the user,
/// so status failures render as the server's own wording.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Input rejected on the client before any request was issued.
    #[error("{0}")]
    Validation(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-supplied message, or `Error <status>`.
        message: String,
    },

    /// The request never reached the server.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a success status but an unreadable body.
    #[error("Invalid response: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    /// Build a status failure from a raw error response body.
    ///
    /// Prefers the body's `message` field; falls back to `Error <status>`
    /// when the body is not JSON or carries no usable message.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Error {status}"));

        ApiError::Status { status, message }
    }

    /// HTTP status code, for status failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this failure was raised by client-side validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

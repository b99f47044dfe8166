//! API client error types.

use notaxia_session::SessionError;
use thiserror::Error;

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur when talking to the Notaxia API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered 401; the stored token has already been cleared.
    #[error("Session expired")]
    SessionExpired,

    /// Non-success status. `message` is the server's text or a fallback.
    #[error("{message} (HTTP {status})")]
    Server { status: u16, message: String },

    /// Network unreachable, DNS failure, timeout.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request was cancelled; its result was discarded.
    #[error("request cancelled")]
    Cancelled,

    /// Rejected locally before any request was sent.
    #[error("{0}")]
    InvalidInput(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("session store error: {0}")]
    Session(#[from] SessionError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Returns true if this error came from a 401 response.
    pub fn is_session_expired(&self) -> bool {
        match self {
            ApiError::SessionExpired => true,
            ApiError::Server { status, .. } => *status == 401,
            _ => false,
        }
    }

    /// HTTP status behind this error, if there was a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::SessionExpired => Some(401),
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Text suitable for showing to the admin, without the status suffix.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

//! The uniform request result.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};

/// What every request resolves to, whatever the status.
///
/// `ok` is true iff the status is 2xx. `data` is present only when the body
/// parsed and decoded. `error` carries the server's `message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// The response produced locally for a 401.
    pub fn session_expired() -> Self {
        Self {
            ok: false,
            status: 401,
            data: None,
            error: Some(crate::SESSION_EXPIRED.to_string()),
        }
    }

    /// Maps the payload, keeping status and error.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            ok: self.ok,
            status: self.status,
            data: self.data.map(f),
            error: self.error,
        }
    }

    /// Returns the payload, or an error carrying the server message or
    /// `fallback`. A successful response with nothing to show is an error
    /// too.
    pub fn into_data(self, fallback: &str) -> ApiResult<T> {
        if self.status == 401 {
            return Err(ApiError::SessionExpired);
        }
        match (self.ok, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(ApiError::Server {
                status: self.status,
                message: self.error.unwrap_or_else(|| fallback.to_string()),
            }),
        }
    }

    /// Succeeds on any 2xx, ignoring the body.
    pub fn into_unit(self, fallback: &str) -> ApiResult<()> {
        if self.status == 401 {
            return Err(ApiError::SessionExpired);
        }
        if self.ok {
            Ok(())
        } else {
            Err(ApiError::Server {
                status: self.status,
                message: self.error.unwrap_or_else(|| fallback.to_string()),
            })
        }
    }
}

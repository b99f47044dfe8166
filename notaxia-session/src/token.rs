//! The admin bearer token.

use crate::error::{SessionError, SessionResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque bearer token issued by `POST /admin/auth/verify-otp`.
///
/// The value is sent verbatim in `Authorization: Bearer <token>`. It is never
/// inspected locally, so there is no notion of expiry here.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a raw token string.
    ///
    /// Rejects empty or all-whitespace values, which the server never issues
    /// and which would otherwise read back as a present-but-useless session.
    pub fn new(raw: impl Into<String>) -> SessionResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(SessionError::EmptyToken);
        }
        Ok(Self(raw))
    }

    /// Returns the raw token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the value for an `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// Consumes the token, returning the raw string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

impl TryFrom<String> for SessionToken {
    type Error = SessionError;

    fn try_from(raw: String) -> SessionResult<Self> {
        Self::new(raw)
    }
}

impl From<SessionToken> for String {
    fn from(token: SessionToken) -> Self {
        token.0
    }
}

impl TryFrom<&str> for SessionToken {
    type Error = SessionError;

    fn try_from(raw: &str) -> SessionResult<Self> {
        Self::new(raw)
    }
}

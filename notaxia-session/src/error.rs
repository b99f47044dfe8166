//! Error types for session storage.

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while reading or writing the session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Token string was empty or whitespace.
    #[error("session token must not be empty")]
    EmptyToken,

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Session file is not a JSON object of strings.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No usable location for the session file.
    #[error("no config directory available for the session file")]
    NoConfigDir,

    /// The in-memory store's lock was poisoned by a panicking writer.
    #[error("session store lock poisoned")]
    Poisoned,
}

//! Session store abstraction.

use crate::error::{SessionError, SessionResult};
use crate::token::SessionToken;
use std::sync::{Arc, RwLock};

/// Storage key the admin token is kept under.
pub const TOKEN_KEY: &str = "notaxia_admin_token";

/// Where the admin token lives between requests.
///
/// Holds at most one token. Implementations must be safe to share between
/// the guard and the API client.
pub trait SessionStore: Send + Sync {
    /// Returns the stored token, if any.
    fn get(&self) -> SessionResult<Option<SessionToken>>;

    /// Replaces the stored token.
    fn set(&self, token: SessionToken) -> SessionResult<()>;

    /// Removes the stored token. Clearing an empty store is not an error.
    fn clear(&self) -> SessionResult<()>;

    /// Returns true if a token is currently stored.
    fn has_token(&self) -> SessionResult<bool> {
        Ok(self.get()?.is_some())
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn get(&self) -> SessionResult<Option<SessionToken>> {
        (**self).get()
    }

    fn set(&self, token: SessionToken) -> SessionResult<()> {
        (**self).set(token)
    }

    fn clear(&self) -> SessionResult<()> {
        (**self).clear()
    }
}

/// A process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: RwLock<Option<SessionToken>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `token`.
    #[must_use]
    pub fn with_token(token: SessionToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> SessionResult<Option<SessionToken>> {
        let guard = self.token.read().map_err(|_| SessionError::Poisoned)?;
        Ok(guard.clone())
    }

    fn set(&self, token: SessionToken) -> SessionResult<()> {
        *self.token.write().map_err(|_| SessionError::Poisoned)? = Some(token);
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        *self.token.write().map_err(|_| SessionError::Poisoned)? = None;
        Ok(())
    }
}

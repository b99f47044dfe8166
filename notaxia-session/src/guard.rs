//! Route-level session guard.
//!
//! Each navigation is resolved by a single synchronous look at the store:
//!
//! | route     | token   | state          | action                  |
//! |-----------|---------|----------------|-------------------------|
//! | protected | absent  | `Unauthorized` | redirect to login       |
//! | protected | present | `Authorized`   | render children         |
//! | login     | present | `Authorized`   | redirect to `/admin`    |
//! | login     | absent  | `Unauthorized` | render the login form   |
//! | public    | any     | unchanged      | render children         |
//!
//! The guard never validates the token with the server.

use crate::route::{DEFAULT_ROUTE, LOGIN_ROUTE, RouteKind, classify};
use crate::store::SessionStore;
use tracing::{debug, warn};

/// What the guard knows about the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardState {
    /// Not checked yet.
    #[default]
    Unknown,
    /// A token is present.
    Authorized,
    /// No token is present.
    Unauthorized,
}

/// What the caller should do with the navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardAction {
    /// Render the requested page.
    RenderChildren,
    /// Render the login form (login route, signed out).
    RenderLoginForm,
    /// Navigate away to the given route.
    Redirect(&'static str),
}

/// Outcome of one guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardDecision {
    pub state: GuardState,
    pub action: GuardAction,
    kind: RouteKind,
}

impl GuardDecision {
    /// Route kind the decision was made for.
    #[must_use]
    pub fn route_kind(&self) -> RouteKind {
        self.kind
    }

    /// True if only a loading placeholder should be shown while the
    /// redirect to login completes.
    #[must_use]
    pub fn shows_placeholder(&self) -> bool {
        self.kind == RouteKind::Protected && matches!(self.action, GuardAction::Redirect(_))
    }

    /// Target route if the decision navigates away.
    #[must_use]
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self.action {
            GuardAction::Redirect(route) => Some(route),
            _ => None,
        }
    }
}

/// Decides whether admin routes may render.
pub struct SessionGuard<S> {
    store: S,
    state: GuardState,
}

impl<S: SessionStore> SessionGuard<S> {
    /// Creates a guard over `store` in the `Unknown` state.
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: GuardState::Unknown,
        }
    }

    /// State after the most recent check.
    #[must_use]
    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Resolves a navigation to `path`.
    pub fn check(&mut self, path: &str) -> GuardDecision {
        let kind = classify(path);
        if kind == RouteKind::Public {
            return GuardDecision {
                state: self.state,
                action: GuardAction::RenderChildren,
                kind,
            };
        }

        let has_token = match self.store.has_token() {
            Ok(present) => present,
            Err(e) => {
                warn!("session store unreadable, treating as signed out: {e}");
                false
            }
        };

        self.state = if has_token {
            GuardState::Authorized
        } else {
            GuardState::Unauthorized
        };

        let action = match (kind, has_token) {
            (RouteKind::Login, true) => GuardAction::Redirect(DEFAULT_ROUTE),
            (RouteKind::Login, false) => GuardAction::RenderLoginForm,
            (_, true) => GuardAction::RenderChildren,
            (_, false) => GuardAction::Redirect(LOGIN_ROUTE),
        };

        debug!(path, state = ?self.state, ?action, "guard check");
        GuardDecision {
            state: self.state,
            action,
            kind,
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

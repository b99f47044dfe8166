//! Admin session handling for the Notaxia dashboard.
//!
//! This crate owns the client side of an admin session:
//! - The opaque bearer [`SessionToken`] issued by the OTP login
//! - The [`SessionStore`] abstraction the token lives behind, with an
//!   in-memory store and a durable file-backed store
//! - The [`SessionGuard`] that decides, per navigation, whether an admin
//!   route may render or must redirect
//!
//! # Design Principles
//!
//! - **Injected storage**: nothing reads a global token cell; every consumer
//!   is handed a store
//! - **Local decisions only**: the guard never talks to the server. Token
//!   expiry is discovered when an API call comes back with 401
//! - **One token at a time**: no refresh, no rotation

mod error;
mod file_store;
mod guard;
mod route;
mod store;
mod token;

pub use error::{SessionError, SessionResult};
pub use file_store::{FileSessionStore, default_session_path};
pub use guard::{GuardAction, GuardDecision, GuardState, SessionGuard};
pub use route::{DEFAULT_ROUTE, LOGIN_ROUTE, RouteKind, classify};
pub use store::{MemorySessionStore, SessionStore, TOKEN_KEY};
pub use token::SessionToken;

//! Client for the Notaxia admin API.
//!
//! Every admin screen talks to the remote API through one
//! [`ResourceClient`]. It attaches the stored bearer token, decodes the
//! response envelope once at the boundary, and turns a 401 into a global
//! logout. On top of it sit:
//! - [`AuthApi`]: two-step OTP login and logout
//! - [`AdminApi`]: typed bindings for the `/admin/*` endpoints
//! - [`ListQuery`] / [`PageCursor`]: the shared paginated-list contract
//!
//! HTTP errors never fail a request; they come back inside an
//! [`ApiResponse`]. Only transport failures and cancellation return `Err`.

pub mod admin;
mod auth;
mod cancel;
mod client;
mod config;
mod envelope;
mod error;
mod navigator;
mod pagination;
mod response;

pub use admin::AdminApi;
pub use auth::{AdminUser, AuthApi, LoginResponse};
pub use cancel::{CancelHandle, CancelToken};
pub use client::{RequestOptions, ResourceClient};
pub use config::{API_URL_ENV, ApiConfig, DEFAULT_API_URL, LEGACY_API_URL_ENV};
pub use envelope::Envelope;
pub use error::{ApiError, ApiResult};
pub use navigator::{Navigator, NoopNavigator, RecordingNavigator};
pub use pagination::{DEFAULT_PAGE_SIZE, ListQuery, PAGE_SIZES, PageCursor, Paginated};
pub use response::ApiResponse;

/// Error text for a request answered with 401.
pub const SESSION_EXPIRED: &str = "Session expired";

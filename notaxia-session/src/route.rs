//! Admin route classification.

/// Where unauthenticated admins are sent.
pub const LOGIN_ROUTE: &str = "/admin/login";

/// Where an already signed-in admin lands when opening the login page.
pub const DEFAULT_ROUTE: &str = "/admin";

/// How the guard treats a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Outside the admin area; never checked.
    Public,
    /// The login page.
    Login,
    /// Any other page under `/admin`.
    Protected,
}

/// Classifies a navigation path.
///
/// Query strings, fragments and a trailing slash are ignored, so
/// `/admin/login/?next=x` is still the login route.
#[must_use]
pub fn classify(path: &str) -> RouteKind {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    let normalized = if trimmed.is_empty() { "/" } else { trimmed };

    if normalized == LOGIN_ROUTE {
        RouteKind::Login
    } else if normalized == DEFAULT_ROUTE || normalized.starts_with("/admin/") {
        RouteKind::Protected
    } else {
        RouteKind::Public
    }
}

//! API client configuration.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Production API host.
pub const DEFAULT_API_URL: &str = "https://api.notaxia.com";

/// Environment variable overriding the API host.
pub const API_URL_ENV: &str = "NOTAXIA_API_URL";

/// Variable the web dashboard build uses for the same purpose.
pub const LEGACY_API_URL_ENV: &str = "NEXT_PUBLIC_API_URL";

/// Configuration for [`ResourceClient`](crate::ResourceClient).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API host, e.g. `https://api.notaxia.com`. The `/api` segment is
    /// appended per request.
    pub base_url: String,
    /// Request timeout in milliseconds. `None` leaves the transport default.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    format!("notaxia-admin/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_ms: None,
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Creates a config pointing at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Reads the API host from [`API_URL_ENV`], then [`LEGACY_API_URL_ENV`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = [API_URL_ENV, LEGACY_API_URL_ENV]
            .into_iter()
            .filter_map(|key| lookup(key))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    /// Sets the request timeout. Sub-millisecond durations round up to
    /// 1ms; a zero duration is kept and rejected by [`validate`](Self::validate).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let mut millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        if millis == 0 && !timeout.is_zero() {
            millis = 1;
        }
        self.timeout_ms = Some(millis);
        self
    }

    /// Request timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Checks that the base URL is an absolute http(s) URL and that a
    /// configured timeout is non-zero.
    pub fn validate(&self) -> ApiResult<()> {
        if self.timeout_ms == Some(0) {
            return Err(ApiError::Config(
                "timeout must be greater than zero".to_string(),
            ));
        }
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL {:?}: {e}", self.base_url)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ApiError::Config(format!(
                "unsupported URL scheme {other:?} in {:?}",
                self.base_url
            ))),
        }
    }

    /// Resolves a request path to a full URL.
    ///
    /// Absolute `http(s)` URLs are used as is. Anything else is appended to
    /// `<base_url>/api`, with a leading slash inserted if missing.
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http") {
            return path.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}/api{path}")
        } else {
            format!("{base}/api/{path}")
        }
    }
}

//! The resource client every admin screen goes through.

use crate::cancel::CancelToken;
use crate::config::ApiConfig;
use crate::envelope::Envelope;
use crate::error::{ApiError, ApiResult};
use crate::navigator::Navigator;
use crate::response::ApiResponse;
use notaxia_session::{LOGIN_ROUTE, SessionStore, SessionToken};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Method, body and headers for one request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    method: Method,
    body: Option<Value>,
    headers: HeaderMap,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Sets a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Adds a header. Caller headers override the default `Content-Type`.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }
}

/// Authenticated client for the Notaxia API.
///
/// Cloning is cheap; clones share the HTTP connection pool, the session
/// store and the navigator.
#[derive(Clone)]
pub struct ResourceClient {
    config: ApiConfig,
    http: Client,
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for ResourceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ResourceClient {
    /// Creates a client. Fails if the base URL is unusable or the HTTP
    /// client cannot be built.
    pub fn new(
        config: ApiConfig,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> ApiResult<Self> {
        config.validate()?;

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            config,
            http,
            store,
            navigator,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// The session store this client reads its token from.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Full URL for `path`; see [`ApiConfig::resolve`].
    pub fn url_for(&self, path: &str) -> String {
        self.config.resolve(path)
    }

    /// Performs a request and normalises the result.
    ///
    /// Returns `Err` only on transport failure. Every HTTP status, including
    /// 4xx and 5xx, resolves to an [`ApiResponse`]. A 401 clears the stored
    /// token and navigates to the login route before returning.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<ApiResponse<T>> {
        let url = self.url_for(path);
        let headers = self.build_headers(options.headers, true);
        debug!(method = %options.method, %url, "api request");

        let mut builder = self.http.request(options.method, &url).headers(headers);
        if let Some(body) = &options.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            self.expire_session();
            return Ok(ApiResponse::session_expired());
        }
        Ok(decode_response(&url, response).await)
    }

    /// GET without the stored token and without 401 handling. For
    /// endpoints that need no session, such as health.
    pub async fn get_public<T: DeserializeOwned>(&self, path: &str) -> ApiResult<ApiResponse<T>> {
        let url = self.url_for(path);
        let headers = self.build_headers(HeaderMap::new(), false);
        debug!(%url, "public api request");

        let response = self.http.get(&url).headers(headers).send().await?;
        Ok(decode_response(&url, response).await)
    }

    /// Like [`request`](Self::request), but discards the result and returns
    /// [`ApiError::Cancelled`] once `cancel` fires.
    pub async fn request_cancellable<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
        cancel: CancelToken,
    ) -> ApiResult<ApiResponse<T>> {
        match cancel.run(self.request(path, options)).await {
            Some(result) => result,
            None => {
                debug!(path, "request cancelled, result discarded");
                Err(ApiError::Cancelled)
            }
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<ApiResponse<T>> {
        self.request(path, RequestOptions::get()).await
    }

    /// POST without a body.
    pub async fn post<T: DeserializeOwned>(&self, path: &str) -> ApiResult<ApiResponse<T>> {
        self.request(path, RequestOptions::post()).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<ApiResponse<T>> {
        self.request(path, RequestOptions::post().json(body)?).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<ApiResponse<T>> {
        self.request(path, RequestOptions::delete()).await
    }

    /// Clears the stored token and sends the navigator to the login page.
    pub fn expire_session(&self) {
        info!("session expired, signing out");
        if let Err(e) = self.store.clear() {
            warn!("failed to clear expired admin token: {e}");
        }
        self.navigator.navigate(LOGIN_ROUTE);
    }

    fn current_token(&self) -> Option<SessionToken> {
        match self.store.get() {
            Ok(token) => token,
            Err(e) => {
                warn!("session store unreadable, sending request without token: {e}");
                None
            }
        }
    }

    fn build_headers(&self, overrides: HeaderMap, with_token: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in overrides.iter() {
            headers.insert(name.clone(), value.clone());
        }

        if !with_token {
            return headers;
        }
        if let Some(token) = self.current_token() {
            match HeaderValue::from_str(&token.bearer()) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("stored admin token is not a valid header value, skipping"),
            }
        }
        headers
    }
}

async fn decode_response<T: DeserializeOwned>(url: &str, response: Response) -> ApiResponse<T> {
    let status = response.status();
    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(%url, "failed to read response body: {e}");
            Default::default()
        }
    };

    let (data, error) = match Envelope::from_slice(&bytes) {
        Some(envelope) => {
            let (decoded, message) = envelope.decode::<T>();
            let data = decoded.unwrap_or_else(|e| {
                warn!(%url, status = status.as_u16(), "response payload did not match expected shape: {e}");
                None
            });
            (data, message)
        }
        None => (None, None),
    };

    debug!(%url, status = status.as_u16(), "api response");
    ApiResponse {
        ok: status.is_success(),
        status: status.as_u16(),
        data,
        error,
    }
}

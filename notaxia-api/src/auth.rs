//! Two-step OTP login.
//!
//! 1. `request_otp(email)` asks the server to mail a one-time code.
//! 2. `verify_otp(email, code)` trades the code for a bearer token, which is
//!    written to the session store.

use crate::client::ResourceClient;
use crate::error::{ApiError, ApiResult};
use notaxia_session::{DEFAULT_ROUTE, LOGIN_ROUTE, SessionStore, SessionToken};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

const REQUEST_OTP_FALLBACK: &str = "Could not send code. Check that this email is an admin.";
const VERIFY_OTP_FALLBACK: &str = "Invalid or expired code.";

/// The admin account a token was issued for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Payload of `POST /admin/auth/verify-otp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<AdminUser>,
}

/// Login and logout against `/admin/auth/*`.
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ResourceClient,
}

impl AuthApi {
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    /// Asks the server to email a one-time code to `email`.
    pub async fn request_otp(&self, email: &str) -> ApiResult<()> {
        let email = normalize_email(email)?;
        let response = self
            .client
            .post_json::<serde_json::Value, _>("/admin/auth/request-otp", &json!({ "email": email }))
            .await?;
        response.into_unit(REQUEST_OTP_FALLBACK)?;
        info!(%email, "one-time code requested");
        Ok(())
    }

    /// Verifies `code` and stores the returned token.
    ///
    /// Whitespace anywhere in the code is ignored, so `"123 456"` works.
    pub async fn verify_otp(&self, email: &str, code: &str) -> ApiResult<LoginResponse> {
        let email = normalize_email(email)?;
        let code: String = code.chars().filter(|c| !c.is_whitespace()).collect();
        if code.is_empty() {
            return Err(ApiError::InvalidInput("Code is required.".to_string()));
        }

        let response = self
            .client
            .post_json::<LoginResponse, _>(
                "/admin/auth/verify-otp",
                &json!({ "email": email, "code": code }),
            )
            .await?;

        let status = response.status;
        let error = response.error.clone();
        let login = match response.into_data(VERIFY_OTP_FALLBACK) {
            Ok(login) => login,
            // a 401 here means a bad code, not an expired session
            Err(ApiError::SessionExpired) => {
                return Err(ApiError::Server {
                    status,
                    message: VERIFY_OTP_FALLBACK.to_string(),
                });
            }
            Err(e) => return Err(e),
        };

        let token = login
            .access_token
            .as_deref()
            .and_then(|raw| SessionToken::new(raw).ok())
            .ok_or_else(|| ApiError::Server {
                status,
                message: error.unwrap_or_else(|| VERIFY_OTP_FALLBACK.to_string()),
            })?;

        self.client.store().set(token)?;
        self.client.navigator().navigate(DEFAULT_ROUTE);
        info!(%email, "admin signed in");
        Ok(login)
    }

    /// Drops the stored token and returns to the login page.
    pub fn logout(&self) -> ApiResult<()> {
        self.client.store().clear()?;
        self.client.navigator().navigate(LOGIN_ROUTE);
        info!("admin signed out");
        Ok(())
    }

    /// True if a token is stored. Says nothing about whether the server
    /// still accepts it.
    pub fn is_signed_in(&self) -> ApiResult<bool> {
        Ok(self.client.store().has_token()?)
    }
}

fn normalize_email(email: &str) -> ApiResult<String> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ApiError::InvalidInput("Email is required.".to_string()));
    }
    Ok(email.to_string())
}

//! Typed bindings for the `/admin/*` endpoints.
//!
//! Reads return the payload or an [`ApiError::Server`] whose message is the
//! server's `message` or a per-screen fallback. Actions succeed on any 2xx.

mod filter;
pub mod models;

pub use filter::{attachments_of_kind, documents_with_status, search_users};
pub use models::*;

use crate::client::ResourceClient;
use crate::error::{ApiError, ApiResult};
use crate::pagination::ListQuery;
use serde_json::{Value, json};
use tracing::info;

/// Admin dashboard operations.
#[derive(Debug, Clone)]
pub struct AdminApi {
    client: ResourceClient,
}

impl AdminApi {
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ResourceClient {
        &self.client
    }

    // ── Dashboard ────────────────────────────────────────────────

    pub async fn stats(&self) -> ApiResult<DashboardStats> {
        self.client
            .get::<DashboardStats>("/admin/stats")
            .await?
            .into_data("Failed to load stats")
    }

    // ── Users ────────────────────────────────────────────────────

    /// Lists users. `limit` asks for up to that many rows.
    pub async fn users(&self, limit: Option<u32>) -> ApiResult<Vec<UserRow>> {
        let path = match limit {
            Some(limit) => format!("/admin/users?limit={limit}"),
            None => "/admin/users".to_string(),
        };
        self.client
            .get::<UserList>(&path)
            .await?
            .into_data("Failed to load users")
            .map(UserList::into_rows)
    }

    pub async fn user(&self, id: &str) -> ApiResult<UserDetail> {
        let path = user_path(id, "")?;
        self.client
            .get::<UserDetail>(&path)
            .await?
            .into_data("User not found")
    }

    /// Grants PRO, optionally until `expires_at` (a date such as
    /// `2026-12-31`). `None` grants it without expiry.
    pub async fn grant_pro(&self, id: &str, expires_at: Option<&str>) -> ApiResult<()> {
        let path = user_path(id, "/grant-pro")?;
        let expires_at = expires_at.map(str::trim).filter(|s| !s.is_empty());
        self.client
            .post_json::<Value, _>(&path, &json!({ "subscriptionExpiresAt": expires_at }))
            .await?
            .into_unit("Failed to grant PRO")?;
        info!(user_id = id, "granted PRO");
        Ok(())
    }

    pub async fn reset_usage(&self, id: &str) -> ApiResult<()> {
        self.user_action(id, "/reset-usage", "Failed to reset usage").await
    }

    pub async fn resend_verification(&self, id: &str) -> ApiResult<()> {
        self.user_action(id, "/resend-verification", "Failed to resend verification email")
            .await
    }

    pub async fn ban(&self, id: &str) -> ApiResult<()> {
        self.user_action(id, "/ban", "Failed to ban user").await
    }

    pub async fn unban(&self, id: &str) -> ApiResult<()> {
        self.user_action(id, "/unban", "Failed to unban user").await
    }

    pub async fn revoke_admin(&self, id: &str) -> ApiResult<()> {
        self.user_action(id, "/revoke-admin", "Failed to revoke admin").await
    }

    pub async fn delete_user(&self, id: &str) -> ApiResult<()> {
        let path = user_path(id, "")?;
        self.client
            .delete::<Value>(&path)
            .await?
            .into_unit("Failed to delete user")?;
        info!(user_id = id, "deleted user");
        Ok(())
    }

    pub async fn admins(&self) -> ApiResult<Vec<AdminRow>> {
        self.client
            .get::<Vec<AdminRow>>("/admin/admins")
            .await?
            .into_data("Failed to load admins")
    }

    // ── Content ──────────────────────────────────────────────────

    /// Filters: `status`, `userId`, `includeContent`.
    pub async fn thoughts(&self, query: &ListQuery) -> ApiResult<ThoughtsPage> {
        self.client
            .get::<ThoughtsPage>(&query.apply_to("/admin/thoughts"))
            .await?
            .into_data("Failed to load thoughts")
    }

    /// Queues a thought for (re)processing.
    pub async fn process_thought(&self, id: &str) -> ApiResult<()> {
        let id = require_id(id)?;
        self.client
            .post::<Value>(&format!("/admin/thoughts/{}/process", urlencoding::encode(id)))
            .await?
            .into_unit("Failed to process thought")?;
        info!(thought_id = id, "queued thought for processing");
        Ok(())
    }

    /// Filters: `status`, `userId`.
    pub async fn voice_notes(&self, query: &ListQuery) -> ApiResult<VoiceNotesPage> {
        self.client
            .get::<VoiceNotesPage>(&query.apply_to("/admin/voice-notes"))
            .await?
            .into_data("Failed to load voice notes")
    }

    pub async fn documents(&self) -> ApiResult<Vec<DocumentRow>> {
        self.client
            .get::<Vec<DocumentRow>>("/admin/documents")
            .await?
            .into_data("Failed to load documents")
    }

    pub async fn thought_attachments(&self, query: &ListQuery) -> ApiResult<ThoughtAttachmentsPage> {
        self.client
            .get::<ThoughtAttachmentsPage>(&query.apply_to("/admin/thought-attachments"))
            .await?
            .into_data("Failed to load thought attachments")
    }

    pub async fn subscriptions(&self, query: &ListQuery) -> ApiResult<SubscriptionsPage> {
        self.client
            .get::<SubscriptionsPage>(&query.apply_to("/admin/subscriptions"))
            .await?
            .into_data("Failed to load")
    }

    // ── Notifications ────────────────────────────────────────────

    pub async fn send_notification(&self, request: &NotificationRequest) -> ApiResult<SendResult> {
        let result = self
            .client
            .post_json::<SendResult, _>("/admin/notifications/send", request)
            .await?
            .into_data("Failed to send.")?;
        info!(
            sent = result.sent,
            failed = result.failed,
            targeted = result.users_targeted,
            "notification sent"
        );
        Ok(result)
    }

    // ── System ───────────────────────────────────────────────────

    /// Checks `GET /api/health`. Sends no token, and a 401 here never
    /// signs the admin out.
    pub async fn health(&self) -> ApiResult<HealthStatus> {
        let response = self.client.get_public::<HealthStatus>("/health").await?;
        let status = response.status;
        match response.data {
            Some(health) if health.status.is_some() => Ok(health),
            _ => Err(ApiError::Server {
                status,
                message: "Invalid health response".to_string(),
            }),
        }
    }

    async fn user_action(&self, id: &str, action: &str, fallback: &str) -> ApiResult<()> {
        let path = user_path(id, action)?;
        self.client.post::<Value>(&path).await?.into_unit(fallback)?;
        info!(user_id = id, action, "user action applied");
        Ok(())
    }
}

impl NotificationRequest {
    /// Builds a request, trimming title and body.
    pub fn new(title: &str, body: &str, target: NotificationTarget) -> ApiResult<Self> {
        let title = title.trim();
        let body = body.trim();
        if title.is_empty() {
            return Err(ApiError::InvalidInput("Title is required.".to_string()));
        }
        if body.is_empty() {
            return Err(ApiError::InvalidInput("Description is required.".to_string()));
        }
        let user_ids = match target {
            NotificationTarget::AllUsers => None,
            NotificationTarget::Users(ids) if ids.is_empty() => {
                return Err(ApiError::InvalidInput(
                    "Select at least one user, or choose \u{201c}All users\u{201d}.".to_string(),
                ));
            }
            NotificationTarget::Users(ids) => Some(ids),
        };
        Ok(Self {
            title: title.to_string(),
            body: body.to_string(),
            user_ids,
        })
    }
}

fn require_id(id: &str) -> ApiResult<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::InvalidInput("id is required".to_string()));
    }
    Ok(id)
}

fn user_path(id: &str, suffix: &str) -> ApiResult<String> {
    let id = require_id(id)?;
    Ok(format!("/admin/users/{}{suffix}", urlencoding::encode(id)))
}

//! Row and payload types for the admin endpoints.
//!
//! These are read-only views of server data. Unknown fields are ignored;
//! fields the server may omit default.

use crate::error::ApiError;
use crate::pagination::Paginated;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub type Timestamp = DateTime<Utc>;

// ── Dashboard ────────────────────────────────────────────────────

/// `GET /admin/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub user_count: u64,
    #[serde(rename = "newUsersLast7Days")]
    pub new_users_last_7_days: u64,
    pub total_thoughts: u64,
    pub total_notes: u64,
    pub total_documents: u64,
    pub total_voice_notes: u64,
    pub total_reminders: u64,
    pub subscription_counts: BTreeMap<String, u64>,
    pub failed_documents_count: u64,
    pub recent_signups: Vec<RecentUser>,
    pub recent_failed_documents: Vec<RecentFailedDocument>,
    pub timestamp: Option<Timestamp>,
}

impl DashboardStats {
    /// Subscribers on `plan` (e.g. `"FREE"`, `"PRO"`), 0 if absent.
    pub fn plan_count(&self, plan: &str) -> u64 {
        self.subscription_counts.get(plan).copied().unwrap_or(0)
    }

    pub fn has_failed_documents(&self) -> bool {
        self.failed_documents_count > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFailedDocument {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub uploaded_by: Option<UserRef>,
}

/// The owner embedded in content rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(default)]
    pub id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

// ── Users ────────────────────────────────────────────────────────

/// Per-user content counts (`_count`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserCounts {
    pub thoughts: u64,
    pub notes: u64,
    pub documents: u64,
    pub voice_notes: u64,
    pub reminders: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_reflections: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thought_clusters: Option<u64>,
}

/// A row of `GET /admin/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(rename = "_count", default)]
    pub counts: UserCounts,
}

/// `GET /admin/users` answers either a bare array or a paged object,
/// depending on the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserList {
    Rows(Vec<UserRow>),
    Paged {
        users: Vec<UserRow>,
        #[serde(rename = "totalCount", default)]
        total_count: Option<u64>,
    },
}

impl UserList {
    pub fn into_rows(self) -> Vec<UserRow> {
        match self {
            UserList::Rows(rows) | UserList::Paged { users: rows, .. } => rows,
        }
    }
}

/// `GET /admin/users/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub email_verified_at: Option<Timestamp>,
    #[serde(default)]
    pub subscription_expires_at: Option<Timestamp>,
    #[serde(default)]
    pub usage_reset_at: Option<Timestamp>,
    #[serde(default)]
    pub thoughts_processed_this_period: u64,
    #[serde(default)]
    pub voice_minutes_this_period: f64,
    #[serde(default)]
    pub documents_processed_this_period: u64,
    #[serde(default)]
    pub push_tokens: Vec<String>,
    #[serde(rename = "_count", default)]
    pub counts: UserCounts,
}

/// A row of `GET /admin/admins`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRow {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub created_at: Timestamp,
}

// ── Thoughts, voice notes, documents ─────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtRow {
    pub id: String,
    pub user_id: String,
    pub status: String,
    #[serde(default)]
    pub category: Option<String>,
    pub created_at: Timestamp,
    /// Present only when requested with `includeContent=true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub user: Option<UserRef>,
}

/// `GET /admin/thoughts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtsPage {
    pub thoughts: Vec<ThoughtRow>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceNoteRow {
    pub id: String,
    pub user_id: String,
    /// Seconds.
    #[serde(default)]
    pub duration: f64,
    pub transcript_status: String,
    #[serde(default)]
    pub transcript_error: Option<String>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub user: Option<UserRef>,
}

/// `GET /admin/voice-notes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceNotesPage {
    pub voice_notes: Vec<VoiceNoteRow>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

/// A row of `GET /admin/documents`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRow {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub status: String,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub uploaded_by: Option<UserRef>,
}

// ── Thought attachments ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Document,
    Audio,
}

impl AttachmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AttachmentKind::Image => "image",
            AttachmentKind::Document => "document",
            AttachmentKind::Audio => "audio",
        }
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttachmentKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(AttachmentKind::Image),
            "document" => Ok(AttachmentKind::Document),
            "audio" => Ok(AttachmentKind::Audio),
            other => Err(ApiError::InvalidInput(format!(
                "unknown attachment type {other:?}; expected image, document or audio"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentRow {
    pub thought_id: String,
    pub user_id: String,
    pub user_email: String,
    #[serde(default)]
    pub user_name: Option<String>,
    pub thought_created_at: Timestamp,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
}

/// `GET /admin/thought-attachments`. Pages over thoughts, not attachments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtAttachmentsPage {
    pub attachments: Vec<AttachmentRow>,
    #[serde(default)]
    pub total_thoughts_with_attachments: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

// ── Subscriptions ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRow {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub plan: String,
    #[serde(default)]
    pub subscription_expires_at: Option<Timestamp>,
    #[serde(default)]
    pub thoughts_processed_this_period: u64,
    #[serde(default)]
    pub thoughts_limit: u64,
    #[serde(default)]
    pub voice_minutes_this_period: f64,
    #[serde(default)]
    pub voice_minutes_limit: f64,
    #[serde(default)]
    pub documents_processed_this_period: u64,
    #[serde(default)]
    pub documents_limit: u64,
    #[serde(default)]
    pub usage_reset_at: Option<Timestamp>,
    #[serde(default)]
    pub near_or_over_limit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeTierLimits {
    pub thoughts_per_month: u64,
    pub voice_minutes_per_month: f64,
    pub documents_per_month: u64,
}

/// `GET /admin/subscriptions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionsPage {
    #[serde(default)]
    pub subscription_counts: BTreeMap<String, u64>,
    #[serde(default)]
    pub free_tier_limits: Option<FreeTierLimits>,
    pub users: Vec<SubscriptionRow>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

// ── Notifications ────────────────────────────────────────────────

/// Body of `POST /admin/notifications/send`. Omitting `userIds` targets
/// every user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ids: Option<Vec<String>>,
}

/// Who a push notification goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationTarget {
    AllUsers,
    Users(Vec<String>),
}

/// Outcome of a notification send.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SendResult {
    pub sent: u64,
    pub failed: u64,
    pub users_targeted: u64,
    pub users_with_no_tokens: u64,
}

// ── System ───────────────────────────────────────────────────────

/// `GET /api/health`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    pub status: Option<String>,
    pub timestamp: Option<String>,
    pub version: Option<String>,
}

fn first_page() -> u32 {
    1
}

impl Paginated for ThoughtsPage {
    fn total_count(&self) -> u64 {
        self.total_count
    }
    fn page(&self) -> u32 {
        self.page
    }
    fn limit(&self) -> u32 {
        self.limit
    }
}

impl Paginated for VoiceNotesPage {
    fn total_count(&self) -> u64 {
        self.total_count
    }
    fn page(&self) -> u32 {
        self.page
    }
    fn limit(&self) -> u32 {
        self.limit
    }
}

impl Paginated for ThoughtAttachmentsPage {
    fn total_count(&self) -> u64 {
        self.total_thoughts_with_attachments
    }
    fn page(&self) -> u32 {
        self.page
    }
    fn limit(&self) -> u32 {
        self.limit
    }
}

impl Paginated for SubscriptionsPage {
    fn total_count(&self) -> u64 {
        self.total_count
    }
    fn page(&self) -> u32 {
        self.page
    }
    fn limit(&self) -> u32 {
        self.limit
    }
}

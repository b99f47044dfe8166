//! Local filtering of already-fetched rows.

use super::models::{AttachmentKind, AttachmentRow, DocumentRow, UserRow};

/// Users whose email or name contains `search`, ignoring case.
/// A blank search keeps every row.
pub fn search_users<'a>(rows: &'a [UserRow], search: &str) -> Vec<&'a UserRow> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return rows.iter().collect();
    }
    rows.iter()
        .filter(|u| {
            u.email.to_lowercase().contains(&needle)
                || u
                    .name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Documents whose status equals `status`, ignoring case. An empty status
/// keeps every row.
pub fn documents_with_status<'a>(rows: &'a [DocumentRow], status: &str) -> Vec<&'a DocumentRow> {
    let status = status.trim();
    if status.is_empty() {
        return rows.iter().collect();
    }
    rows.iter()
        .filter(|d| d.status.eq_ignore_ascii_case(status))
        .collect()
}

/// Attachments of the given kind. `None` keeps every row.
pub fn attachments_of_kind(
    rows: &[AttachmentRow],
    kind: Option<AttachmentKind>,
) -> Vec<&AttachmentRow> {
    match kind {
        Some(kind) => rows.iter().filter(|a| a.kind == kind).collect(),
        None => rows.iter().collect(),
    }
}

//! In-app notifications for the signed-in user.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::decode_list;
use crate::auth::AuthService;
use crate::error::AuthError;
use crate::net::api::{NOTIFICATIONS_PATH, notification_read_path};
use crate::net::transport::ApiTransport;
use crate::storage::KvStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.is_read).count()
}

/// # Errors
///
/// Returns [`AuthError::NotAuthenticated`] without a session, or the
/// request's failure.
pub async fn fetch_notifications<T: ApiTransport, S: KvStore>(
    auth: &AuthService<T, S>,
) -> Result<Vec<Notification>, AuthError> {
    let token = auth.bearer()?;
    let body = auth.api().get(NOTIFICATIONS_PATH, Some(&token)).await?;
    decode_list(&body, "notifications")
}

/// # Errors
///
/// Returns [`AuthError::NotAuthenticated`] without a session, or the
/// request's failure.
pub async fn mark_notification_read<T: ApiTransport, S: KvStore>(
    auth: &AuthService<T, S>,
    notification_id: &str,
) -> Result<(), AuthError> {
    let token = auth.bearer()?;
    auth.api()
        .patch(&notification_read_path(notification_id), Some(&token), json!({ "isRead": true }))
        .await?;
    Ok(())
}

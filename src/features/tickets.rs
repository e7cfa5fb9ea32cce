//! Support tickets.

#[cfg(test)]
#[path = "tickets_test.rs"]
mod tickets_test;

use serde::{Deserialize, Serialize};

use super::decode_list;
use crate::auth::AuthService;
use crate::error::{AuthError, ValidationError};
use crate::net::api::SUPPORT_TICKETS_PATH;
use crate::net::transport::ApiTransport;
use crate::storage::KvStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub subject: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl NewTicket {
    /// Trimmed copy, or the first missing field.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingSubject`] or
    /// [`ValidationError::MissingMessage`].
    pub fn validated(&self) -> Result<Self, ValidationError> {
        let subject = self.subject.trim();
        if subject.is_empty() {
            return Err(ValidationError::MissingSubject);
        }
        let message = self.message.trim();
        if message.is_empty() {
            return Err(ValidationError::MissingMessage);
        }
        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_owned);
        Ok(Self { subject: subject.to_owned(), message: message.to_owned(), category })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicket {
    #[serde(alias = "_id")]
    pub id: String,
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

fn default_status() -> String {
    "open".to_owned()
}

/// # Errors
///
/// Returns [`AuthError::Validation`] before any request for a blank subject
/// or message, [`AuthError::NotAuthenticated`] without a session, or the
/// request's failure.
pub async fn create_ticket<T: ApiTransport, S: KvStore>(
    auth: &AuthService<T, S>,
    ticket: &NewTicket,
) -> Result<SupportTicket, AuthError> {
    let ticket = ticket.validated()?;
    let token = auth.bearer()?;
    let body = auth
        .api()
        .post(SUPPORT_TICKETS_PATH, Some(&token), serde_json::to_value(&ticket)?)
        .await?;
    let created = body
        .get("ticket")
        .or_else(|| body.get("data"))
        .unwrap_or(&body);
    tracing::info!("support ticket created");
    Ok(serde_json::from_value(created.clone())?)
}

/// # Errors
///
/// Returns [`AuthError::NotAuthenticated`] without a session, or the
/// request's failure.
pub async fn list_tickets<T: ApiTransport, S: KvStore>(
    auth: &AuthService<T, S>,
) -> Result<Vec<SupportTicket>, AuthError> {
    let token = auth.bearer()?;
    let body = auth.api().get(SUPPORT_TICKETS_PATH, Some(&token)).await?;
    decode_list(&body, "tickets")
}

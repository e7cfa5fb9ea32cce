//! Course enrollment. Paid courses answer with a payment gateway URL the
//! caller should navigate to; free courses enroll immediately.

#[cfg(test)]
#[path = "enrollment_test.rs"]
mod enrollment_test;

use serde::{Deserialize, Serialize};

use crate::auth::AuthService;
use crate::error::AuthError;
use crate::net::api::ENROLLMENTS_PATH;
use crate::net::transport::ApiTransport;
use crate::storage::KvStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRequest {
    pub course_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, alias = "url", alias = "gatewayUrl")]
    pub payment_url: Option<String>,
    #[serde(default, alias = "_id", alias = "id")]
    pub enrollment_id: Option<String>,
}

impl EnrollmentResponse {
    pub fn requires_payment(&self) -> bool {
        self.payment_url.as_deref().is_some_and(|u| !u.trim().is_empty())
    }
}

/// # Errors
///
/// Returns [`AuthError::NotAuthenticated`] without a session, or the
/// request's failure.
pub async fn enroll<T: ApiTransport, S: KvStore>(
    auth: &AuthService<T, S>,
    course_id: &str,
) -> Result<EnrollmentResponse, AuthError> {
    let token = auth.bearer()?;
    let request = EnrollmentRequest { course_id: course_id.to_owned() };
    let body = auth
        .api()
        .post(ENROLLMENTS_PATH, Some(&token), serde_json::to_value(&request)?)
        .await?;
    let payload = body.get("data").filter(|d| d.is_object()).unwrap_or(&body);
    let response: EnrollmentResponse = serde_json::from_value(payload.clone())?;
    tracing::info!(course_id, paid = response.requires_payment(), "enrollment initiated");
    Ok(response)
}

//! REST helpers for the NextByte backend.
//!
//! ERROR HANDLING
//! ==============
//! Every helper re-throws: a non-2xx status becomes [`AuthError::Http`]
//! carrying the envelope's `message` (or a fallback naming the status), and
//! transport failures stay [`AuthError::Network`]. Nothing here retries.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::Value;
use url::form_urlencoded;

use super::transport::{ApiRequest, ApiTransport, Method, UploadRequest};
use crate::error::AuthError;

pub const REGISTER_PATH: &str = "/auth/register";
pub const LOGIN_PATH: &str = "/auth/login";
pub const VERIFY_OTP_PATH: &str = "/auth/verify-otp";
pub const ME_PATH: &str = "/users/me";
pub const NOTIFICATIONS_PATH: &str = "/notifications";
pub const SUPPORT_TICKETS_PATH: &str = "/support-tickets";
pub const ENROLLMENTS_PATH: &str = "/enrollments";

/// Percent-encode `raw` as a single path segment. `/`, `?`, `#` and spaces
/// never leak into the route.
pub fn path_segment(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

pub fn user_path(user_id: &str) -> String {
    format!("/users/{}", path_segment(user_id))
}

pub fn notification_read_path(notification_id: &str) -> String {
    format!("/notifications/{}/read", path_segment(notification_id))
}

pub fn leaderboard_path(course_id: &str) -> String {
    format!("/courses/{}/leaderboard", path_segment(course_id))
}

/// Fallback used when a failed response carries no usable message.
pub fn request_failed_message(status: u16) -> String {
    format!("Request failed with status {status}")
}

/// The envelope's human-readable failure text, if any.
pub fn envelope_message(body: &Value) -> Option<String> {
    let text = match body {
        Value::Object(fields) => fields
            .get("message")
            .or_else(|| fields.get("error"))
            .and_then(Value::as_str),
        Value::String(text) => Some(text.as_str()),
        _ => None,
    }?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

pub fn http_error(status: u16, body: &Value) -> AuthError {
    let message = envelope_message(body).unwrap_or_else(|| request_failed_message(status));
    AuthError::Http { status, message }
}

/// Transport plus base URL.
#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    transport: T,
    base_url: String,
}

impl<T: ApiTransport> ApiClient<T> {
    pub fn new(transport: T, base_url: &str) -> Self {
        Self { transport, base_url: base_url.trim_end_matches('/').to_owned() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path.
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Send a JSON request and return the success body.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Http`] for non-2xx statuses and
    /// [`AuthError::Network`] when the transport fails.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&str>,
        body: Option<Value>,
    ) -> Result<Value, AuthError> {
        let url = self.endpoint(path);
        let response = self
            .transport
            .send(ApiRequest { method, url, bearer: bearer.map(str::to_owned), body })
            .await?;
        if !response.is_success() {
            tracing::warn!(status = response.status, path, "api request rejected");
            return Err(http_error(response.status, &response.body));
        }
        Ok(response.body)
    }

    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn get(&self, path: &str, bearer: Option<&str>) -> Result<Value, AuthError> {
        self.request(Method::Get, path, bearer, None).await
    }

    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn post(&self, path: &str, bearer: Option<&str>, body: Value) -> Result<Value, AuthError> {
        self.request(Method::Post, path, bearer, Some(body)).await
    }

    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn patch(&self, path: &str, bearer: Option<&str>, body: Value) -> Result<Value, AuthError> {
        self.request(Method::Patch, path, bearer, Some(body)).await
    }

    /// Upload a file to an absolute URL outside the API (the CDN).
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn upload(&self, request: UploadRequest) -> Result<Value, AuthError> {
        let response = self.transport.upload(request).await?;
        if !response.is_success() {
            return Err(http_error(response.status, &response.body));
        }
        Ok(response.body)
    }
}

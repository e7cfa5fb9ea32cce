//! HTTP transport seam.
//!
//! DESIGN
//! ======
//! `ApiTransport` is the only place bytes leave the process. Browser builds
//! plug in `gloo-net`, native builds plug in `reqwest`, and tests plug in a
//! scripted mock. Futures are `?Send` so the WASM implementation qualifies.

use serde_json::Value;

use crate::error::AuthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// A JSON request against an absolute URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// Bearer token to send in `Authorization`, when authenticated.
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

/// A multipart upload with a single file part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub url: String,
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Status plus decoded body. A non-JSON body arrives as `Value::String`;
/// an empty body as `Value::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Decode a raw response body per the [`ApiResponse`] conventions.
pub fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}

#[async_trait::async_trait(?Send)]
pub trait ApiTransport {
    /// Dispatch a JSON request.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Network`] when no HTTP response was received.
    /// Non-2xx statuses are *not* errors at this layer.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AuthError>;

    /// Dispatch a multipart file upload.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Network`] when no HTTP response was received.
    async fn upload(&self, request: UploadRequest) -> Result<ApiResponse, AuthError>;
}

//! Shared fixtures for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use base64ct::{Base64UrlUnpadded, Encoding};
use serde_json::{Value, json};

use crate::auth::{AuthService, LogNavigator, Navigator};
use crate::config::ApiConfig;
use crate::error::AuthError;
use crate::models::Profile;
use crate::storage::MemoryStore;
use crate::net::api::ApiClient;
use crate::net::transport::{ApiRequest, ApiResponse, ApiTransport, UploadRequest};

pub const PHONE: &str = "01712345678";
pub const OTP: &str = "1234";

pub fn profile(id: &str) -> Profile {
    serde_json::from_value(json!({
        "id": id,
        "name": "Rahim",
        "phone": PHONE,
        "email": "rahim@example.com",
        "isBanned": false,
        "isActive": true,
        "role": "student"
    }))
    .unwrap()
}

pub fn banned_profile(id: &str) -> Profile {
    Profile { is_banned: true, ..profile(id) }
}

/// Unsigned JWT with the given `exp` claim.
pub fn jwt_with_exp(exp: i64) -> String {
    jwt_with_claims(&json!({ "sub": "u1", "exp": exp }))
}

pub fn jwt_with_claims(claims: &Value) -> String {
    let header = Base64UrlUnpadded::encode_string(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = Base64UrlUnpadded::encode_string(claims.to_string().as_bytes());
    format!("{header}.{payload}.signature")
}

/// Far-future token accepted by the validator.
pub fn live_token() -> String {
    jwt_with_exp(4_102_444_800)
}

/// Service over `transport` with a fresh in-memory store, logged out.
pub fn auth_service(transport: &MockTransport) -> AuthService<MockTransport, MemoryStore> {
    let config = ApiConfig::with_base_url("https://api.test");
    let api = ApiClient::new(transport.clone(), &config.api_base_url);
    AuthService::new(api, MemoryStore::new(), Rc::new(LogNavigator), &config)
}

/// Same, with `profile("u1")` signed in.
pub fn signed_in_service(transport: &MockTransport) -> AuthService<MockTransport, MemoryStore> {
    let service = auth_service(transport);
    service.tokens().save(&live_token(), &profile("u1")).unwrap();
    service
}

// =========================================================================
// MockTransport
// =========================================================================

/// Replays canned responses in order and records every request.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Rc<RefCell<VecDeque<Result<ApiResponse, AuthError>>>>,
    pub requests: Rc<RefCell<Vec<ApiRequest>>>,
    pub uploads: Rc<RefCell<Vec<UploadRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: Value) -> &Self {
        self.responses.borrow_mut().push_back(Ok(ApiResponse { status, body }));
        self
    }

    pub fn fail(&self, error: AuthError) -> &Self {
        self.responses.borrow_mut().push_back(Err(error));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests.borrow().last().cloned().unwrap()
    }

    fn next(&self) -> Result<ApiResponse, AuthError> {
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse { status: 200, body: json!({}) }))
    }
}

#[async_trait::async_trait(?Send)]
impl ApiTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AuthError> {
        self.requests.borrow_mut().push(request);
        self.next()
    }

    async fn upload(&self, request: UploadRequest) -> Result<ApiResponse, AuthError> {
        self.uploads.borrow_mut().push(request);
        self.next()
    }
}

// =========================================================================
// RecordingNavigator
// =========================================================================

#[derive(Default)]
pub struct RecordingNavigator {
    pub visited: RefCell<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visited.borrow_mut().push(path.to_owned());
    }
}

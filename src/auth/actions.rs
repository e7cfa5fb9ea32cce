//! OTP login, registration and profile actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthService` drives the session state machine:
//!
//! - Idle -> OTP requested: [`AuthService::login_user`]
//! - OTP requested -> Authenticated: [`AuthService::verify_otp`]
//! - Authenticated -> Idle: [`AuthService::logout_user`]
//! - Idle -> Authenticated: [`AuthService::register_and_verify`] and
//!   [`AuthService::complete_login_flow`]
//!
//! Input is validated before dispatch. Any response that embeds a user passes
//! through the [`BanEnforcer`] before the success path runs, and a restricted
//! user's token is never persisted.

#[cfg(test)]
#[path = "actions_test.rs"]
mod actions_test;

use std::rc::Rc;

use serde_json::{Map, Value, json};

use super::enforcer::{BanEnforcer, Navigator, embedded_user};
use super::validation::{validate_otp, validate_phone, validate_registration};
use crate::config::ApiConfig;
use crate::error::AuthError;
use crate::models::{Profile, RegisterRequest, Session};
use crate::net::api::{ApiClient, LOGIN_PATH, ME_PATH, REGISTER_PATH, VERIFY_OTP_PATH, user_path};
use crate::net::transport::ApiTransport;
use crate::redirect::RedirectManager;
use crate::session::SessionValidator;
use crate::storage::{KvStore, TokenStore};

/// Where the login flow lands when no redirect target is pending.
pub const DEFAULT_AFTER_LOGIN: &str = "/dashboard";

/// Result of a completed login: the new session and where to go next.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub session: Session,
    pub destination: String,
}

pub struct AuthService<T, S> {
    api: ApiClient<T>,
    tokens: TokenStore<S>,
    validator: SessionValidator<S>,
    enforcer: BanEnforcer<S>,
    redirects: RedirectManager<S>,
}

impl<T: ApiTransport, S: KvStore> AuthService<T, S> {
    pub fn new(api: ApiClient<T>, store: S, navigator: Rc<dyn Navigator>, config: &ApiConfig) -> Self {
        let tokens = TokenStore::new(store.clone());
        Self {
            api,
            validator: SessionValidator::new(tokens.clone()),
            enforcer: BanEnforcer::new(tokens.clone(), navigator, &config.landing_route),
            redirects: RedirectManager::with_login_route(store, &config.login_route),
            tokens,
        }
    }

    /// Run `on_logout` whenever the enforcer forces a logout.
    #[must_use]
    pub fn with_logout_callback(mut self, on_logout: impl Fn() + 'static) -> Self {
        self.enforcer = self.enforcer.with_logout_callback(on_logout);
        self
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    pub fn tokens(&self) -> &TokenStore<S> {
        &self.tokens
    }

    pub fn redirects(&self) -> &RedirectManager<S> {
        &self.redirects
    }

    pub fn is_authenticated(&self) -> bool {
        self.validator.is_authenticated()
    }

    /// Cached profile; `None` (and a cleared store) for restricted accounts.
    pub fn current_user(&self) -> Option<Profile> {
        self.validator.current_user()
    }

    /// Bearer token of a valid session, for authenticated helpers.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] when no usable session exists.
    pub fn bearer(&self) -> Result<String, AuthError> {
        self.validator
            .current_session()
            .map(|s| s.token)
            .ok_or(AuthError::NotAuthenticated)
    }

    /// Create an account; the backend sends an OTP to the phone.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for malformed fields before any
    /// request, or [`AuthError::Http`] when the backend rejects the account.
    pub async fn register_user(&self, request: &RegisterRequest) -> Result<Value, AuthError> {
        let request = validate_registration(&request.name, &request.phone, request.email.as_deref())?;
        let body = serde_json::to_value(&request)?;
        let response = self.api.post(REGISTER_PATH, None, body).await?;
        self.enforcer.check_response(&response)?;
        tracing::info!("registration accepted");
        Ok(response)
    }

    /// Ask the backend to send an OTP to `phone`.
    ///
    /// Returns the backend's confirmation message, when it sends one.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for a malformed phone before any
    /// request, otherwise the request's failure.
    pub async fn login_user(&self, phone: &str) -> Result<Option<String>, AuthError> {
        let phone = validate_phone(phone)?;
        let response = self.api.post(LOGIN_PATH, None, json!({ "phone": phone })).await?;
        self.enforcer.check_response(&response)?;
        tracing::info!("otp requested");
        Ok(response.get("message").and_then(Value::as_str).map(str::to_owned))
    }

    /// Exchange phone + OTP for a session and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Banned`]/[`AuthError::Inactive`] when the verified
    /// user is restricted (nothing is persisted), [`AuthError::Parse`] when the
    /// response lacks a token or user, or the request's failure.
    pub async fn verify_otp(&self, phone: &str, otp: &str) -> Result<Session, AuthError> {
        let phone = validate_phone(phone)?;
        let otp = validate_otp(otp)?;
        let response = self
            .api
            .post(VERIFY_OTP_PATH, None, json!({ "phone": phone, "otp": otp }))
            .await?;

        self.enforcer.check_response(&response)?;
        let session = parse_session(&response)?;
        self.tokens.save(&session.token, &session.user)?;
        tracing::info!(user_id = %session.user.id, "login verified");
        Ok(session)
    }

    /// Drop the local session. Safe when already logged out.
    pub fn logout_user(&self) {
        self.tokens.clear();
        tracing::info!("logged out");
    }

    /// Register then verify. A failed verification leaves the created account
    /// in place; the backend owns that cleanup.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error.
    pub async fn register_and_verify(&self, request: &RegisterRequest, otp: &str) -> Result<LoginOutcome, AuthError> {
        validate_otp(otp)?;
        self.register_user(request).await?;
        let session = self.verify_otp(&request.phone, otp).await?;
        Ok(self.finish_login(session))
    }

    /// Request an OTP then verify it in one step.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error.
    pub async fn complete_login_flow(&self, phone: &str, otp: &str) -> Result<LoginOutcome, AuthError> {
        validate_otp(otp)?;
        self.login_user(phone).await?;
        let session = self.verify_otp(phone, otp).await?;
        Ok(self.finish_login(session))
    }

    /// Pair a fresh session with the pending redirect target, consuming it.
    pub fn finish_login(&self, session: Session) -> LoginOutcome {
        let destination = self
            .redirects
            .consume()
            .unwrap_or_else(|| DEFAULT_AFTER_LOGIN.to_owned());
        LoginOutcome { session, destination }
    }

    /// Refresh the cached profile from the backend.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] without a session, the ban
    /// error for restricted accounts, or the request's failure.
    pub async fn fetch_me(&self) -> Result<Profile, AuthError> {
        let token = self.bearer()?;
        let response = self.api.get(ME_PATH, Some(&token)).await?;
        let user = returned_user(&response).unwrap_or(&response);
        self.enforcer.check_response(&json!({ "user": user }))?;
        let profile: Profile = serde_json::from_value(user.clone())?;
        self.tokens.replace_profile(&profile)?;
        Ok(profile)
    }

    /// Update a user and merge the result into the cached profile.
    ///
    /// The server may answer with the full user, a partial one, or nothing
    /// useful; whatever comes back (falling back to `patch`) is merged over
    /// the cached copy rather than replacing it. Updates to another user's
    /// record leave the cache alone.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] without a session, the ban
    /// error when the response flags the user, or the request's failure.
    pub async fn update_user_by_id(&self, user_id: &str, patch: Map<String, Value>) -> Result<Profile, AuthError> {
        let token = self.bearer()?;
        let response = self
            .api
            .patch(&user_path(user_id), Some(&token), Value::Object(patch.clone()))
            .await?;

        let returned = returned_user(&response);
        let is_self = self.tokens.profile().is_some_and(|p| p.id == user_id);
        if is_self {
            if let Some(user) = returned {
                self.enforcer.check_response(&json!({ "user": user }))?;
            }
        }

        let fields = returned.and_then(Value::as_object).cloned().unwrap_or(patch);
        if is_self {
            return self
                .tokens
                .update_profile(&fields)?
                .ok_or(AuthError::NotAuthenticated);
        }
        let mut fields = fields;
        if !fields.contains_key("id") && !fields.contains_key("_id") {
            fields.insert("id".to_owned(), Value::String(user_id.to_owned()));
        }
        Ok(serde_json::from_value(Value::Object(fields))?)
    }
}

/// The user a response carries: an embedded one, or the body itself when it
/// looks like a bare user object.
fn returned_user(body: &Value) -> Option<&Value> {
    embedded_user(body).or_else(|| (body.get("id").is_some() || body.get("_id").is_some()).then_some(body))
}

/// Pull `{ token, user }` out of a verification response.
///
/// # Errors
///
/// Returns [`AuthError::Parse`] when either half is missing or malformed.
pub fn parse_session(body: &Value) -> Result<Session, AuthError> {
    let token = body
        .get("token")
        .or_else(|| body.get("data").and_then(|d| d.get("token")))
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AuthError::Parse("response is missing a token".to_owned()))?;
    let user = embedded_user(body).ok_or_else(|| AuthError::Parse("response is missing a user".to_owned()))?;
    let user: Profile = serde_json::from_value(user.clone())?;
    Ok(Session { token: token.to_owned(), user })
}

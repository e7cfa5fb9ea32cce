//! Ban/inactive response interceptor.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every helper whose response embeds a user runs it through
//! [`BanEnforcer`] before touching the success path. A restricted account
//! tears the session down, fires the logout callback, navigates to the
//! landing route with `banned` and `reason` query parameters, and surfaces an
//! authorization error, all before the caller's `await` resumes.

#[cfg(test)]
#[path = "enforcer_test.rs"]
mod enforcer_test;

use std::rc::Rc;

use serde_json::Value;
use url::form_urlencoded;

use crate::error::AuthError;
use crate::models::{AccountFlags, AccountStatus, Profile};
use crate::storage::{KvStore, TokenStore};

pub const DEFAULT_BAN_REASON: &str = "Your account has been banned. Please contact support.";
pub const INACTIVE_REASON: &str = "Your account is inactive. Please contact support.";

/// Client-side navigation.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Navigator for contexts without a router (CLI, tests): only logs.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, path: &str) {
        tracing::info!(path, "navigation requested");
    }
}

/// Full-page navigation through `window.location`.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

#[cfg(feature = "hydrate")]
impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
}

/// The error a restricted account produces, or `None` when in good standing.
pub fn restriction_error(status: &AccountStatus) -> Option<AuthError> {
    match status {
        AccountStatus::Active => None,
        AccountStatus::Banned { reason: Some(reason) } => {
            Some(AuthError::Banned { reason: format!("Your account has been banned: {reason}") })
        }
        AccountStatus::Banned { reason: None } => Some(AuthError::Banned { reason: DEFAULT_BAN_REASON.to_owned() }),
        AccountStatus::Inactive => Some(AuthError::Inactive { reason: INACTIVE_REASON.to_owned() }),
    }
}

/// `landing_route` with `banned=true&reason=...` appended.
pub fn ban_landing_url(landing_route: &str, reason: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("banned", "true")
        .append_pair("reason", reason)
        .finish();
    let separator = if landing_route.contains('?') { '&' } else { '?' };
    format!("{landing_route}{separator}{query}")
}

/// The user object embedded in a response envelope, if any.
///
/// Looks at `user`, then `data.user`, then `data`, then the body itself; the
/// last two only when they carry standing flags.
pub fn embedded_user(body: &Value) -> Option<&Value> {
    if let Some(user) = body.get("user").filter(|u| u.is_object()) {
        return Some(user);
    }
    if let Some(data) = body.get("data") {
        if let Some(user) = data.get("user").filter(|u| u.is_object()) {
            return Some(user);
        }
        if has_standing_flags(data) {
            return Some(data);
        }
    }
    has_standing_flags(body).then_some(body)
}

fn has_standing_flags(value: &Value) -> bool {
    value.get("isBanned").is_some() || value.get("isActive").is_some()
}

pub struct BanEnforcer<S> {
    tokens: TokenStore<S>,
    navigator: Rc<dyn Navigator>,
    on_logout: Option<Rc<dyn Fn()>>,
    landing_route: String,
}

impl<S: KvStore> BanEnforcer<S> {
    pub fn new(tokens: TokenStore<S>, navigator: Rc<dyn Navigator>, landing_route: &str) -> Self {
        Self { tokens, navigator, on_logout: None, landing_route: landing_route.to_owned() }
    }

    /// Callback run after the store is cleared, e.g. to reset UI auth state.
    #[must_use]
    pub fn with_logout_callback(mut self, on_logout: impl Fn() + 'static) -> Self {
        self.on_logout = Some(Rc::new(on_logout));
        self
    }

    /// # Errors
    ///
    /// Returns [`AuthError::Banned`] or [`AuthError::Inactive`] after forcing
    /// logout when the profile is restricted.
    pub fn check(&self, profile: &Profile) -> Result<(), AuthError> {
        self.enforce(&profile.id, &profile.status())
    }

    /// Check whatever user a response body embeds; bodies without one pass.
    ///
    /// # Errors
    ///
    /// Same as [`Self::check`].
    pub fn check_response(&self, body: &Value) -> Result<(), AuthError> {
        let Some(user) = embedded_user(body) else {
            return Ok(());
        };
        let flags = AccountFlags::from_user(user);
        let user_id = user
            .get("id")
            .or_else(|| user.get("_id"))
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        self.enforce(user_id, &flags.status())
    }

    fn enforce(&self, user_id: &str, status: &AccountStatus) -> Result<(), AuthError> {
        let Some(error) = restriction_error(status) else {
            return Ok(());
        };
        tracing::warn!(user_id, banned = matches!(error, AuthError::Banned { .. }), "restricted account; forcing logout");
        self.tokens.clear();
        if let Some(on_logout) = &self.on_logout {
            on_logout();
        }
        let reason = error.to_string();
        self.navigator.navigate(&ban_landing_url(&self.landing_route, &reason));
        Err(error)
    }
}

/// Banner content parsed from the landing route's query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanNotice {
    pub reason: String,
}

impl BanNotice {
    /// Parse `banned`/`reason` parameters; `None` unless `banned=true`.
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.trim_start_matches('?');
        let mut banned = false;
        let mut reason = None;
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "banned" => banned = value == "true",
                "reason" if !value.trim().is_empty() => reason = Some(value.into_owned()),
                _ => {}
            }
        }
        banned.then(|| Self { reason: reason.unwrap_or_else(|| DEFAULT_BAN_REASON.to_owned()) })
    }
}

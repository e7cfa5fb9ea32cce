//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and login forms to coordinate redirects, render the
//! OTP step, and keep a submit button from firing twice while a request is in
//! flight. Requests may still resolve out of order; the guard only prevents
//! duplicate dispatch.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::error::AuthError;
use crate::models::{Profile, Session};

/// Where the visitor is in the OTP login flow.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthPhase {
    #[default]
    Idle,
    OtpRequested {
        phone: String,
    },
    Authenticated,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<Profile>,
    /// True until the stored session has been read once.
    pub loading: bool,
    pub phase: AuthPhase,
    /// A login/verify request is outstanding.
    pub in_flight: bool,
    /// Last failure, for a toast or inline message.
    pub error: Option<String>,
}

impl AuthState {
    /// Initial state before the store has been read.
    pub fn loading() -> Self {
        Self { loading: true, ..Self::default() }
    }

    /// State hydrated from whatever the validator returned.
    pub fn from_session(session: Option<Session>) -> Self {
        match session {
            Some(session) => Self {
                user: Some(session.user),
                phase: AuthPhase::Authenticated,
                ..Self::default()
            },
            None => Self::default(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated && self.user.is_some()
    }

    /// Claim the in-flight slot. Returns `false` if a request is already
    /// outstanding, in which case the caller must not dispatch.
    pub fn begin_submit(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        self.error = None;
        true
    }

    pub fn otp_requested(&mut self, phone: &str) {
        self.in_flight = false;
        self.phase = AuthPhase::OtpRequested { phone: phone.to_owned() };
    }

    pub fn authenticated(&mut self, user: Profile) {
        self.in_flight = false;
        self.loading = false;
        self.user = Some(user);
        self.phase = AuthPhase::Authenticated;
    }

    pub fn logged_out(&mut self) {
        self.in_flight = false;
        self.loading = false;
        self.user = None;
        self.phase = AuthPhase::Idle;
    }

    /// Record a failed request. Authorization failures also log out; other
    /// failures keep the current phase so the user can retry.
    pub fn failed(&mut self, error: &AuthError) {
        if error.is_authorization() {
            self.logged_out();
        }
        self.in_flight = false;
        self.error = Some(error.to_string());
    }

    /// Phone awaiting an OTP, if the flow is at that step.
    pub fn pending_phone(&self) -> Option<&str> {
        match &self.phase {
            AuthPhase::OtpRequested { phone } => Some(phone),
            _ => None,
        }
    }
}

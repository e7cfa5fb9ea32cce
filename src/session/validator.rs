//! Readers of the stored session.
//!
//! A banned or inactive profile invalidates the session no matter what the
//! token says, and standing is re-read from storage on every call because an
//! account can be banned remotely between page loads.

#[cfg(test)]
#[path = "validator_test.rs"]
mod validator_test;

use super::{inspect_token, now_secs};
use crate::models::{AccountStatus, Profile, Session};
use crate::storage::{KvStore, TokenStore};

/// True iff the profile is banned or deactivated.
pub fn is_banned_or_inactive(profile: &Profile) -> bool {
    profile.status() != AccountStatus::Active
}

#[derive(Clone, Debug)]
pub struct SessionValidator<S> {
    tokens: TokenStore<S>,
}

impl<S: KvStore> SessionValidator<S> {
    pub fn new(tokens: TokenStore<S>) -> Self {
        Self { tokens }
    }

    /// Whether a live, unexpired session exists right now.
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(now_secs())
    }

    /// Like [`Self::is_authenticated`] against an explicit clock.
    ///
    /// A cached restricted profile clears the store and yields `false`. A
    /// token without a cached profile is judged on expiry alone.
    pub fn is_authenticated_at(&self, now_secs: i64) -> bool {
        let Some(token) = self.tokens.token() else {
            return false;
        };
        if let Some(profile) = self.tokens.profile() {
            if is_banned_or_inactive(&profile) {
                self.drop_restricted(&profile);
                return false;
            }
        }
        inspect_token(&token, now_secs).valid
    }

    /// The stored session, treating a restricted account as absent.
    pub fn current_session(&self) -> Option<Session> {
        let session = self.tokens.load()?;
        if is_banned_or_inactive(&session.user) {
            self.drop_restricted(&session.user);
            return None;
        }
        Some(session)
    }

    /// The cached profile, or `None` when logged out or restricted.
    pub fn current_user(&self) -> Option<Profile> {
        let profile = self.tokens.profile()?;
        if is_banned_or_inactive(&profile) {
            self.drop_restricted(&profile);
            return None;
        }
        Some(profile)
    }

    fn drop_restricted(&self, profile: &Profile) {
        tracing::warn!(user_id = %profile.id, "cached profile is banned or inactive; clearing session");
        self.tokens.clear();
    }
}

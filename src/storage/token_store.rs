//! Bearer token + cached profile persistence.
//!
//! `load` never fails: missing keys, malformed JSON and an absent medium all
//! read as "no session". Whether a loaded session is *valid* is the
//! validator's call, not this module's.

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;

use serde_json::{Map, Value};

use super::{KvStore, TOKEN_KEY, USER_KEY};
use crate::error::AuthError;
use crate::models::{Profile, Session};

#[derive(Clone, Debug)]
pub struct TokenStore<S> {
    store: S,
}

impl<S: KvStore> TokenStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist a session. The token is written first, then the profile.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Parse`] if the profile cannot be serialized; in
    /// that case nothing is written.
    pub fn save(&self, token: &str, profile: &Profile) -> Result<(), AuthError> {
        let raw = serde_json::to_string(profile)?;
        self.store.set(TOKEN_KEY, token);
        self.store.set(USER_KEY, &raw);
        tracing::debug!(user_id = %profile.id, "session saved");
        Ok(())
    }

    /// Read the stored session, if both halves are present and well-formed.
    pub fn load(&self) -> Option<Session> {
        let token = self.token()?;
        let user = self.profile()?;
        Some(Session { token, user })
    }

    /// The stored bearer token, ignoring the profile.
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.trim().is_empty())
    }

    /// The stored profile, ignoring the token.
    pub fn profile(&self) -> Option<Profile> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::debug!(error = %e, "cached profile is malformed; ignoring");
                None
            }
        }
    }

    /// Overwrite just the profile half, e.g. after a profile refresh.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Parse`] if the profile cannot be serialized.
    pub fn replace_profile(&self, profile: &Profile) -> Result<(), AuthError> {
        let raw = serde_json::to_string(profile)?;
        self.store.set(USER_KEY, &raw);
        Ok(())
    }

    /// Merge a partial profile into the cached copy and persist the result.
    ///
    /// Returns `Ok(None)` when no profile is cached.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Parse`] when the merged fields do not form a
    /// profile; the cached copy is left untouched.
    pub fn update_profile(&self, patch: &Map<String, Value>) -> Result<Option<Profile>, AuthError> {
        let Some(cached) = self.profile() else {
            return Ok(None);
        };
        let merged = cached.merged(patch)?;
        self.replace_profile(&merged)?;
        Ok(Some(merged))
    }

    /// Remove both halves of the session. Safe to call when already empty.
    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
    }
}

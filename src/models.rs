//! Session and profile data shared between storage, API helpers and UI state.
//!
//! DESIGN
//! ======
//! `Profile` names the fields the session layer reasons about and keeps every
//! other server field in `extra`, so a profile survives a storage round-trip
//! byte-for-byte in meaning even as the backend adds domain fields.

#[cfg(test)]
#[path = "models_test.rs"]
mod models_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The cached user profile.
///
/// Decoding goes through [`ProfileWire`]: `id` and `_id` may both be present
/// (`id` wins), and `null` reads as the field's default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ProfileWire")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub is_banned: bool,
    pub is_active: bool,
    /// Domain fields the session layer does not interpret (role, photo, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Lenient decoding shape for [`Profile`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileWire {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    legacy_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    is_banned: Option<bool>,
    #[serde(default)]
    is_active: Option<bool>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<ProfileWire> for Profile {
    type Error = String;

    fn try_from(wire: ProfileWire) -> Result<Self, Self::Error> {
        let id = wire
            .id
            .filter(|id| !id.is_empty())
            .or(wire.legacy_id)
            .ok_or_else(|| "user is missing `id`".to_owned())?;
        Ok(Self {
            id,
            name: wire.name.unwrap_or_default(),
            phone: wire.phone.unwrap_or_default(),
            email: wire.email,
            is_banned: wire.is_banned.unwrap_or(false),
            is_active: wire.is_active.unwrap_or(true),
            extra: wire.extra,
        })
    }
}

/// Server-asserted account standing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountStatus {
    Active,
    Banned { reason: Option<String> },
    Inactive,
}

/// Only the standing flags of an embedded user object.
///
/// Used where a response carries a user that may not parse as a full
/// [`Profile`]; the ban check must not depend on unrelated fields.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountFlags {
    #[serde(default)]
    pub is_banned: Option<bool>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub ban_reason: Option<String>,
}

impl AccountFlags {
    /// Flags from a raw user object, ignoring ill-typed fields.
    pub fn from_user(user: &Value) -> Self {
        Self {
            is_banned: user.get("isBanned").and_then(Value::as_bool),
            is_active: user.get("isActive").and_then(Value::as_bool),
            ban_reason: user
                .get("banReason")
                .and_then(Value::as_str)
                .filter(|r| !r.trim().is_empty())
                .map(str::to_owned),
        }
    }

    pub fn status(&self) -> AccountStatus {
        if self.is_banned == Some(true) {
            AccountStatus::Banned { reason: self.ban_reason.clone() }
        } else if self.is_active == Some(false) {
            AccountStatus::Inactive
        } else {
            AccountStatus::Active
        }
    }
}

impl Profile {
    /// Ban wins over inactive when both are set.
    pub fn status(&self) -> AccountStatus {
        if self.is_banned {
            let reason = self
                .extra
                .get("banReason")
                .and_then(Value::as_str)
                .filter(|r| !r.trim().is_empty())
                .map(str::to_owned);
            AccountStatus::Banned { reason }
        } else if !self.is_active {
            AccountStatus::Inactive
        } else {
            AccountStatus::Active
        }
    }

    /// Apply a partial server response on top of this profile.
    ///
    /// Keys in `patch` overwrite; keys absent from `patch` keep their cached
    /// value. A `_id` key is treated as `id`.
    ///
    /// # Errors
    ///
    /// Returns a JSON error if the merged object no longer forms a profile,
    /// e.g. a patch sets `isBanned` to a string.
    pub fn merged(&self, patch: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        let mut fields = match serde_json::to_value(self)? {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };
        for (key, value) in patch {
            let key = if key == "_id" { "id" } else { key.as_str() };
            fields.insert(key.to_owned(), value.clone());
        }
        serde_json::from_value(Value::Object(fields))
    }
}

/// Client-held proof of authentication.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: Profile,
}

/// Payload for `POST /auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

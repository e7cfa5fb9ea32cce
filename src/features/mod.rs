//! Authenticated feature helpers layered on [`crate::AuthService`].
//!
//! Each helper pulls the bearer token from the current session, so a visitor
//! without one gets [`crate::AuthError::NotAuthenticated`] before any request.

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

pub mod analytics;
pub mod enrollment;
pub mod leaderboard;
pub mod notifications;
pub mod tickets;
pub mod upload;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AuthError;

/// Decode a list that may arrive bare, under `key`, or under `data`.
fn decode_list<T: DeserializeOwned>(body: &Value, key: &str) -> Result<Vec<T>, AuthError> {
    let items = match body {
        Value::Array(_) => body,
        _ => body
            .get(key)
            .or_else(|| body.get("data").and_then(|d| if d.is_array() { Some(d) } else { d.get(key) }))
            .ok_or_else(|| AuthError::Parse(format!("response is missing `{key}`")))?,
    };
    Ok(serde_json::from_value(items.clone())?)
}

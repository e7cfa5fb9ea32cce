//! Per-course leaderboard.

#[cfg(test)]
#[path = "leaderboard_test.rs"]
mod leaderboard_test;

use serde::{Deserialize, Serialize};

use super::decode_list;
use crate::auth::AuthService;
use crate::error::AuthError;
use crate::net::api::leaderboard_path;
use crate::net::transport::ApiTransport;
use crate::storage::KvStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    #[serde(alias = "_id")]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub points: i64,
}

/// 1-based position of `user_id` in server order.
pub fn rank_of(entries: &[LeaderboardEntry], user_id: &str) -> Option<usize> {
    entries.iter().position(|e| e.user_id == user_id).map(|i| i + 1)
}

/// # Errors
///
/// Returns [`AuthError::NotAuthenticated`] without a session, or the
/// request's failure.
pub async fn fetch_leaderboard<T: ApiTransport, S: KvStore>(
    auth: &AuthService<T, S>,
    course_id: &str,
) -> Result<Vec<LeaderboardEntry>, AuthError> {
    let token = auth.bearer()?;
    let body = auth.api().get(&leaderboard_path(course_id), Some(&token)).await?;
    decode_list(&body, "leaderboard")
}

//! Course analytics routing.
//!
//! One canonical route, `/dashboard/courses/{id}/analytics`. The older
//! `/dashboard/analytics?courseId={id}` form is rewritten to it.

#[cfg(test)]
#[path = "analytics_test.rs"]
mod analytics_test;

use url::form_urlencoded;

use crate::error::AuthError;
use crate::models::Profile;
use crate::net::api::path_segment;

pub const LEGACY_ANALYTICS_PATH: &str = "/dashboard/analytics";

pub fn analytics_route(course_id: &str) -> String {
    format!("/dashboard/courses/{}/analytics", path_segment(course_id))
}

/// Canonical route for a legacy analytics URL, or `None` when `path` is not
/// the legacy form or names no course.
pub fn canonical_analytics_path(path: &str, query: &str) -> Option<String> {
    if path.trim_end_matches('/') != LEGACY_ANALYTICS_PATH {
        return None;
    }
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == "courseId" && !value.trim().is_empty())
        .map(|(_, value)| analytics_route(value.trim()))
}

/// The signed-in user's id, required by analytics queries.
///
/// # Errors
///
/// Returns [`AuthError::NotAuthenticated`] when no user is present or its id
/// is blank.
pub fn require_user_id(user: Option<&Profile>) -> Result<&str, AuthError> {
    user.map(|u| u.id.as_str())
        .filter(|id| !id.trim().is_empty())
        .ok_or(AuthError::NotAuthenticated)
}

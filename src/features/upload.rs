//! Profile-photo upload through the CDN.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use serde_json::{Map, Value};

use crate::auth::AuthService;
use crate::error::AuthError;
use crate::models::Profile;
use crate::net::transport::{ApiTransport, UploadRequest};
use crate::storage::KvStore;

pub const FILE_FIELD: &str = "file";
pub const PHOTO_FIELD: &str = "profilePhoto";

/// Hosted URL from a CDN response: `url`, else `secure_url`.
pub fn hosted_url(body: &Value) -> Option<&str> {
    ["url", "secure_url"]
        .iter()
        .filter_map(|key| body.get(key).and_then(Value::as_str))
        .find(|u| !u.trim().is_empty())
}

/// Push a file to the CDN and return its hosted URL.
///
/// # Errors
///
/// Returns [`AuthError::Parse`] when the CDN answers without a URL, or the
/// upload's failure.
pub async fn upload_file<T: ApiTransport, S: KvStore>(
    auth: &AuthService<T, S>,
    upload_url: &str,
    file_name: &str,
    content_type: &str,
    bytes: Vec<u8>,
) -> Result<String, AuthError> {
    let request = UploadRequest {
        url: upload_url.to_owned(),
        field: FILE_FIELD.to_owned(),
        file_name: file_name.to_owned(),
        content_type: content_type.to_owned(),
        bytes,
    };
    let body = auth.api().upload(request).await?;
    hosted_url(&body)
        .map(str::to_owned)
        .ok_or_else(|| AuthError::Parse("upload response is missing a url".to_owned()))
}

/// Upload a photo then record it on the signed-in user's profile.
///
/// # Errors
///
/// Returns [`AuthError::NotAuthenticated`] without a session (checked before
/// the upload), or the first failing step's error.
pub async fn upload_profile_photo<T: ApiTransport, S: KvStore>(
    auth: &AuthService<T, S>,
    upload_url: &str,
    file_name: &str,
    content_type: &str,
    bytes: Vec<u8>,
) -> Result<Profile, AuthError> {
    let user = auth.current_user().ok_or(AuthError::NotAuthenticated)?;
    let url = upload_file(auth, upload_url, file_name, content_type, bytes).await?;
    let mut patch = Map::new();
    patch.insert(PHOTO_FIELD.to_owned(), Value::String(url));
    auth.update_user_by_id(&user.id, patch).await
}

//! Session validity: token expiry hints and account standing.

pub mod token;
pub mod validator;

pub use token::{TokenInspection, decode_claims, inspect_token};
pub use validator::{SessionValidator, is_banned_or_inactive};

/// Current wall-clock time in whole seconds since the Unix epoch.
#[allow(clippy::cast_possible_truncation)]
pub fn now_secs() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        (js_sys::Date::now() / 1000.0).floor() as i64
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_secs() as i64)
    }
}

//! Backend and routing configuration.
//!
//! Native builds read process environment variables at startup; browser
//! builds bake the same names in at compile time because a WASM bundle has
//! no process environment. Values are public; do not store secrets here.

use crate::error::AuthError;

pub const DEFAULT_LOGIN_ROUTE: &str = "/login";
pub const DEFAULT_LANDING_ROUTE: &str = "/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// REST API root, without trailing slash.
    pub api_base_url: String,
    /// CDN endpoint accepting multipart uploads, when configured.
    pub upload_url: Option<String>,
    pub login_route: String,
    /// Route a banned or inactive user is sent to.
    pub landing_route: String,
    pub timeouts: Timeouts,
}

impl ApiConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `NEXTBYTE_API_URL`
    ///
    /// Optional:
    /// - `NEXTBYTE_UPLOAD_URL`
    /// - `NEXTBYTE_LOGIN_ROUTE`: default `/login`
    /// - `NEXTBYTE_LANDING_ROUTE`: default `/`
    /// - `NEXTBYTE_REQUEST_TIMEOUT_SECS`: default 30
    /// - `NEXTBYTE_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Config`] when the API URL is missing or blank.
    pub fn from_env() -> Result<Self, AuthError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Self::from_env`], with `api_base_url` standing in for
    /// `NEXTBYTE_API_URL` (e.g. a command-line flag).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Config`] when `api_base_url` is blank.
    pub fn from_env_with_api_url(api_base_url: &str) -> Result<Self, AuthError> {
        Self::from_lookup(|key| match key {
            "NEXTBYTE_API_URL" => Some(api_base_url.to_owned()),
            _ => std::env::var(key).ok(),
        })
    }

    /// Build config from values captured when the crate was compiled.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Config`] when `NEXTBYTE_API_URL` was not set at build time.
    pub fn from_build_env() -> Result<Self, AuthError> {
        Self::from_lookup(|key| build_env(key).map(str::to_owned))
    }

    /// Config for a known base URL with every other value defaulted.
    pub fn with_base_url(api_base_url: &str) -> Self {
        Self {
            api_base_url: normalize_url(api_base_url),
            upload_url: None,
            login_route: DEFAULT_LOGIN_ROUTE.to_owned(),
            landing_route: DEFAULT_LANDING_ROUTE.to_owned(),
            timeouts: Timeouts {
                request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            },
        }
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AuthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("NEXTBYTE_API_URL")
            .map(|v| normalize_url(&v))
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AuthError::Config("NEXTBYTE_API_URL is not set".to_owned()))?;

        let upload_url = lookup("NEXTBYTE_UPLOAD_URL")
            .map(|v| normalize_url(&v))
            .filter(|v| !v.is_empty());
        let login_route = lookup("NEXTBYTE_LOGIN_ROUTE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOGIN_ROUTE.to_owned());
        let landing_route = lookup("NEXTBYTE_LANDING_ROUTE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LANDING_ROUTE.to_owned());
        let timeouts = Timeouts {
            request_secs: parse_u64(lookup("NEXTBYTE_REQUEST_TIMEOUT_SECS"), DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(lookup("NEXTBYTE_CONNECT_TIMEOUT_SECS"), DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { api_base_url, upload_url, login_route, landing_route, timeouts })
    }
}

fn normalize_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn parse_u64(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn build_env(key: &str) -> Option<&'static str> {
    match key {
        "NEXTBYTE_API_URL" => option_env!("NEXTBYTE_API_URL"),
        "NEXTBYTE_UPLOAD_URL" => option_env!("NEXTBYTE_UPLOAD_URL"),
        "NEXTBYTE_LOGIN_ROUTE" => option_env!("NEXTBYTE_LOGIN_ROUTE"),
        "NEXTBYTE_LANDING_ROUTE" => option_env!("NEXTBYTE_LANDING_ROUTE"),
        "NEXTBYTE_REQUEST_TIMEOUT_SECS" => option_env!("NEXTBYTE_REQUEST_TIMEOUT_SECS"),
        "NEXTBYTE_CONNECT_TIMEOUT_SECS" => option_env!("NEXTBYTE_CONNECT_TIMEOUT_SECS"),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

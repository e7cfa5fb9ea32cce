//! Error taxonomy for session and API helpers.
//!
//! ERROR HANDLING
//! ==============
//! Helpers return `AuthError` and never retry; UI callers decide whether to
//! show a toast or a banner. Storage unavailability is absent:
//! a missing medium reads as "logged out", not as a failure.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Input rejected before any request was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Phone number must be exactly 11 digits")]
    InvalidPhone,
    #[error("OTP must be exactly 4 digits")]
    InvalidOtp,
    #[error("Name is required")]
    MissingName,
    #[error("Email address is invalid")]
    InvalidEmail,
    #[error("Ticket subject is required")]
    MissingSubject,
    #[error("Ticket message is required")]
    MissingMessage,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    /// Malformed user input caught client-side.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx response; `message` comes from the envelope when present.
    #[error("{message}")]
    Http { status: u16, message: String },
    /// The account is banned. The session has already been torn down.
    #[error("{reason}")]
    Banned { reason: String },
    /// The account is deactivated. The session has already been torn down.
    #[error("{reason}")]
    Inactive { reason: String },
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("invalid response: {0}")]
    Parse(String),
    #[error("config error: {0}")]
    Config(String),
}

impl AuthError {
    /// True for the ban/inactive path, which always implies a forced logout.
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Banned { .. } | Self::Inactive { .. })
    }

    /// HTTP status when the failure came from the backend.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

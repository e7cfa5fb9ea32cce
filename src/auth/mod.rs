//! Authentication actions, input validation and ban enforcement.

pub mod actions;
pub mod enforcer;
pub mod validation;

pub use actions::{AuthService, DEFAULT_AFTER_LOGIN, LoginOutcome};
#[cfg(feature = "hydrate")]
pub use enforcer::BrowserNavigator;
pub use enforcer::{BanEnforcer, BanNotice, LogNavigator, Navigator};
pub use validation::{validate_otp, validate_phone, validate_registration};

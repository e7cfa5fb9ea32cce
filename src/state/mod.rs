//! UI-facing application state.

pub mod auth;

pub use auth::{AuthPhase, AuthState};

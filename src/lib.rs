//! # nextbyte
//!
//! Client-side session layer for the NextByte learning platform.
//!
//! The backend owns courses, payments and authentication; this crate owns the
//! browser half of the contract: a bearer token and cached profile persisted in
//! a key-value store, OTP login, ban/inactive enforcement on every response
//! that embeds a user, and replay of the page a visitor wanted before being
//! sent to `/login`.
//!
//! Build with `hydrate` for the Leptos/WASM front end (`localStorage` and
//! `gloo-net`), or with the default `native` feature for `reqwest` and an
//! on-disk store.

pub mod auth;
pub mod config;
pub mod error;
pub mod features;
pub mod models;
pub mod net;
pub mod redirect;
pub mod session;
pub mod state;
pub mod storage;
pub mod util;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use auth::{AuthService, BanEnforcer, Navigator};
pub use config::ApiConfig;
pub use error::{AuthError, ValidationError};
pub use models::{Profile, Session};
pub use redirect::RedirectManager;
pub use session::SessionValidator;
pub use storage::{KvStore, TokenStore};

//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical unauthenticated redirect behavior,
//! and every open tab should notice a login or logout made in another one.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::redirect::RedirectManager;
use crate::state::auth::AuthState;
use crate::storage::{KvStore, TOKEN_KEY, USER_KEY};

/// True once auth has loaded and no user is present.
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

/// Decide whether a guarded page must bounce to login. When it must, the
/// current path is remembered for replay and the login route is returned.
pub fn unauth_redirect_target<S: KvStore>(
    state: &AuthState,
    redirects: &RedirectManager<S>,
    current_path: &str,
) -> Option<String> {
    if !should_redirect_unauth(state) {
        return None;
    }
    redirects.save(current_path);
    Some(redirects.login_route().to_owned())
}

/// Redirect to the login route whenever auth has loaded and no user is
/// present, remembering `current_path` first.
pub fn install_unauth_redirect<S, F>(
    auth: RwSignal<AuthState>,
    redirects: RedirectManager<S>,
    current_path: String,
    navigate: F,
) where
    S: KvStore + 'static,
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let state = auth.get();
        if let Some(target) = unauth_redirect_target(&state, &redirects, &current_path) {
            navigate(&target, NavigateOptions::default());
        }
    });
}

/// Whether a storage change under `key` affects the session. A `None` key
/// means the whole store was cleared.
pub fn is_session_key(key: Option<&str>) -> bool {
    key.is_none_or(|k| k == TOKEN_KEY || k == USER_KEY)
}

/// Re-read the session whenever another tab writes the token or user keys.
#[cfg(feature = "hydrate")]
pub fn install_storage_sync(
    auth: RwSignal<AuthState>,
    validator: crate::session::SessionValidator<crate::storage::local::LocalStorage>,
) {
    let handle = window_event_listener(leptos::ev::storage, move |ev: web_sys::StorageEvent| {
        if !is_session_key(ev.key().as_deref()) {
            return;
        }
        let next = AuthState::from_session(validator.current_session());
        tracing::debug!(authenticated = next.is_authenticated(), "session changed in another tab");
        auth.set(next);
    });
    on_cleanup(move || handle.remove());
}

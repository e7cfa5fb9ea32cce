//! Post-login redirect replay.
//!
//! Guards remember where a visitor was headed before bouncing them to the
//! login route; the login flow consumes that target exactly once so it is not
//! replayed on some later, unrelated login.

#[cfg(test)]
#[path = "redirect_test.rs"]
mod redirect_test;

use crate::config::DEFAULT_LOGIN_ROUTE;
use crate::storage::{KvStore, REDIRECT_KEY};

#[derive(Clone, Debug)]
pub struct RedirectManager<S> {
    store: S,
    login_route: String,
}

impl<S: KvStore> RedirectManager<S> {
    pub fn new(store: S) -> Self {
        Self::with_login_route(store, DEFAULT_LOGIN_ROUTE)
    }

    pub fn with_login_route(store: S, login_route: &str) -> Self {
        Self { store, login_route: normalize_path(login_route).to_owned() }
    }

    /// Remember `url`, unless it points at the login route itself.
    pub fn save(&self, url: &str) {
        let url = url.trim();
        if url.is_empty() || self.is_login_route(url) {
            return;
        }
        self.store.set(REDIRECT_KEY, url);
    }

    /// Read the pending target without clearing it.
    pub fn peek(&self) -> Option<String> {
        self.store.get(REDIRECT_KEY).filter(|u| !u.trim().is_empty())
    }

    /// Read and clear the pending target.
    pub fn consume(&self) -> Option<String> {
        let target = self.peek();
        self.store.remove(REDIRECT_KEY);
        target
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    pub fn is_login_route(&self, url: &str) -> bool {
        normalize_path(url) == self.login_route
    }
}

/// Path component of `url` with query, fragment and trailing slash removed.
fn normalize_path(url: &str) -> &str {
    let url = url.trim();
    let path_end = url.find(['?', '#']).unwrap_or(url.len());
    let path = &url[..path_end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') { "/" } else { trimmed }
}

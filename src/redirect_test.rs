use super::*;
use crate::storage::MemoryStore;

#[test]
fn save_then_consume_returns_url_once() {
    let redirects = RedirectManager::new(MemoryStore::new());
    redirects.save("/courses/rust-101?tab=reviews");

    assert_eq!(redirects.consume().as_deref(), Some("/courses/rust-101?tab=reviews"));
    assert_eq!(redirects.consume(), None);
}

#[test]
fn saving_login_route_is_noop() {
    let redirects = RedirectManager::new(MemoryStore::new());
    redirects.save("/login");
    assert_eq!(redirects.consume(), None);
}

#[test]
fn login_route_match_ignores_query_fragment_and_trailing_slash() {
    let redirects = RedirectManager::new(MemoryStore::new());
    redirects.save("/login/");
    redirects.save("/login?next=/dashboard");
    redirects.save("/login#otp");
    assert_eq!(redirects.peek(), None);

    redirects.save("/login-help");
    assert_eq!(redirects.consume().as_deref(), Some("/login-help"));
}

#[test]
fn saving_login_route_keeps_existing_target() {
    let redirects = RedirectManager::new(MemoryStore::new());
    redirects.save("/dashboard");
    redirects.save("/login");
    assert_eq!(redirects.consume().as_deref(), Some("/dashboard"));
}

#[test]
fn custom_login_route_is_respected() {
    let redirects = RedirectManager::with_login_route(MemoryStore::new(), "/signin/");
    redirects.save("/signin");
    assert_eq!(redirects.peek(), None);
    redirects.save("/login");
    assert_eq!(redirects.peek().as_deref(), Some("/login"));
}

#[test]
fn later_save_overwrites_earlier_target() {
    let redirects = RedirectManager::new(MemoryStore::new());
    redirects.save("/a");
    redirects.save("/b");
    assert_eq!(redirects.consume().as_deref(), Some("/b"));
}

#[test]
fn blank_url_is_ignored() {
    let redirects = RedirectManager::new(MemoryStore::new());
    redirects.save("   ");
    assert_eq!(redirects.peek(), None);
}

#[test]
fn clones_share_the_pending_target() {
    let store = MemoryStore::new();
    RedirectManager::new(store.clone()).save("/notifications");
    assert_eq!(RedirectManager::new(store).consume().as_deref(), Some("/notifications"));
}

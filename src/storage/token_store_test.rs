use super::*;
use crate::storage::{MemoryStore, NullStore};
use crate::test_helpers::{live_token, profile};
use serde_json::json;

#[test]
fn save_then_load_returns_same_session() {
    let tokens = TokenStore::new(MemoryStore::new());
    let user = profile("u1");
    let token = live_token();

    tokens.save(&token, &user).unwrap();
    let session = tokens.load().unwrap();
    assert_eq!(session, Session { token, user });
}

#[test]
fn load_is_none_when_either_half_is_missing() {
    let store = MemoryStore::new();
    let tokens = TokenStore::new(store.clone());
    assert_eq!(tokens.load(), None);

    store.set(TOKEN_KEY, "abc");
    assert_eq!(tokens.load(), None);

    store.remove(TOKEN_KEY);
    store.set(USER_KEY, r#"{"id":"u1"}"#);
    assert_eq!(tokens.load(), None);
}

#[test]
fn load_ignores_malformed_profile_json() {
    let store = MemoryStore::new();
    store.set(TOKEN_KEY, "abc");
    store.set(USER_KEY, "{not json");
    assert_eq!(TokenStore::new(store).load(), None);
}

#[test]
fn blank_token_counts_as_missing() {
    let store = MemoryStore::new();
    store.set(TOKEN_KEY, "  ");
    assert_eq!(TokenStore::new(store).token(), None);
}

#[test]
fn absent_medium_reads_as_logged_out() {
    let tokens = TokenStore::new(NullStore);
    tokens.save("abc", &profile("u1")).unwrap();
    assert_eq!(tokens.load(), None);
    tokens.clear();
}

#[test]
fn clear_removes_both_keys_and_is_idempotent() {
    let store = MemoryStore::new();
    let tokens = TokenStore::new(store.clone());
    tokens.save("abc", &profile("u1")).unwrap();

    tokens.clear();
    assert!(store.is_empty());
    tokens.clear();
    assert!(store.is_empty());
}

#[test]
fn update_profile_merges_partial_fields() {
    let store = MemoryStore::new();
    let tokens = TokenStore::new(store.clone());
    let cached: Profile = serde_json::from_value(json!({ "id": "u1", "name": "Old", "phone": "x" })).unwrap();
    tokens.save("abc", &cached).unwrap();

    let patch = json!({ "name": "New" });
    let merged = tokens.update_profile(patch.as_object().unwrap()).unwrap().unwrap();
    assert_eq!(merged.name, "New");
    assert_eq!(merged.phone, "x");

    let stored: serde_json::Value = serde_json::from_str(&store.get(USER_KEY).unwrap()).unwrap();
    assert_eq!(stored["name"], "New");
    assert_eq!(stored["phone"], "x");
    assert_eq!(tokens.token().as_deref(), Some("abc"));
}

#[test]
fn update_profile_without_cache_is_noop() {
    let tokens = TokenStore::new(MemoryStore::new());
    let patch = json!({ "name": "New" });
    assert_eq!(tokens.update_profile(patch.as_object().unwrap()).unwrap(), None);
}

#[test]
fn update_profile_keeps_cache_on_bad_merge() {
    let tokens = TokenStore::new(MemoryStore::new());
    tokens.save("abc", &profile("u1")).unwrap();

    let patch = json!({ "isActive": "sometimes" });
    assert!(tokens.update_profile(patch.as_object().unwrap()).is_err());
    assert_eq!(tokens.profile(), Some(profile("u1")));
}

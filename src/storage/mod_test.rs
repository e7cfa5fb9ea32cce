use super::*;

#[test]
fn memory_store_clones_share_entries() {
    let store = MemoryStore::new();
    let other = store.clone();

    store.set(TOKEN_KEY, "abc");
    assert_eq!(other.get(TOKEN_KEY).as_deref(), Some("abc"));

    other.set(TOKEN_KEY, "def");
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("def"));
    assert_eq!(store.len(), 1);

    store.remove(TOKEN_KEY);
    assert!(other.is_empty());
}

#[test]
fn null_store_drops_writes() {
    let store = NullStore;
    store.set(USER_KEY, "{}");
    assert_eq!(store.get(USER_KEY), None);
    store.remove(USER_KEY);
}

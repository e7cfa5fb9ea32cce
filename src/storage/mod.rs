//! Persisted key-value storage behind the session layer.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every read or write of the token, profile and redirect keys goes through
//! [`KvStore`], so browser `localStorage`, an on-disk file for the CLI and an
//! in-memory map for tests and server rendering are interchangeable.
//! Implementations fail soft: an unavailable medium reads as empty and drops
//! writes.

#[cfg(feature = "native")]
pub mod file;
pub mod local;
pub mod token_store;

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[cfg(feature = "native")]
pub use file::FileStore;
pub use local::LocalStorage;
pub use token_store::TokenStore;

/// Key holding the opaque bearer token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the serialized profile JSON.
pub const USER_KEY: &str = "user";
/// Key holding the pending post-login redirect URL.
pub const REDIRECT_KEY: &str = "redirectAfterLogin";

/// String key-value store with whole-value overwrite semantics.
///
/// Handles are cheap to clone and clones observe the same data.
pub trait KvStore: Clone {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Process-local store used by tests and non-browser renders.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently present.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Absent storage medium: never holds anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullStore;

impl KvStore for NullStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) {}

    fn remove(&self, _key: &str) {}
}

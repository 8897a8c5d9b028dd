//! Persistent key/value storage used for the cart snapshot and the session.

use std::sync::Mutex;

use mockall::automock;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Storage key for the persisted cart snapshot.
pub const CART_KEY: &str = "storefront_cart";

/// Storage key for the signed-in user record.
pub const USER_KEY: &str = "storefront_user";

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend failed to read or write.
    #[error("storage io error")]
    Io(#[from] std::io::Error),

    /// Keys are limited to ASCII letters, digits, `_` and `-`.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// Another thread panicked while holding the store.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// String-valued key/value storage that survives restarts.
#[automock]
pub trait PersistentStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrites the value stored under `key`.
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Deletes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Process-local store. Nothing outlives the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<FxHashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with a single entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = FxHashMap::default();
        entries.insert(key.to_string(), value.to_string());

        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl PersistentStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_poison| StoreError::Poisoned)?;

        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_poison| StoreError::Poisoned)?;

        entries.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_poison| StoreError::Poisoned)?;

        entries.remove(key);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn load_missing_key_returns_none() -> TestResult {
        let store = MemoryStore::new();

        assert_eq!(store.load(CART_KEY)?, None);

        Ok(())
    }

    #[test]
    fn save_overwrites_previous_value() -> TestResult {
        let store = MemoryStore::with_entry(CART_KEY, "[]");

        store.save(CART_KEY, r#"[{"id":1,"quantity":2}]"#)?;

        assert_eq!(
            store.load(CART_KEY)?.as_deref(),
            Some(r#"[{"id":1,"quantity":2}]"#)
        );

        Ok(())
    }

    #[test]
    fn remove_is_idempotent() -> TestResult {
        let store = MemoryStore::with_entry(USER_KEY, "{}");

        store.remove(USER_KEY)?;
        store.remove(USER_KEY)?;

        assert_eq!(store.load(USER_KEY)?, None);

        Ok(())
    }
}

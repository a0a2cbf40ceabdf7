//! In-memory key-value store.
//!
//! Backs unit and integration tests. A value can be made
//! read-only to simulate a store that rejects writes.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::key_value::{KeyValueStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    values: HashMap<String, Vec<u8>>,
    read_only: HashSet<String>,
}

/// Process-local byte store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate `key` with raw bytes, bypassing the trait.
    pub fn insert_raw(&self, key: &str, value: impl Into<Vec<u8>>) {
        self.lock().values.insert(key.to_string(), value.into());
    }

    /// Raw bytes under `key`, bypassing the trait.
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().values.get(key).cloned()
    }

    /// Make subsequent writes and removals of `key` fail.
    pub fn set_read_only(&self, key: &str, read_only: bool) {
        let mut inner = self.lock();
        if read_only {
            inner.read_only.insert(key.to_string());
        } else {
            inner.read_only.remove(key);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means another test thread panicked mid-call;
        // the map itself is still consistent.
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.lock().values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if inner.read_only.contains(key) {
            return Err(StoreError::Unavailable(format!("key '{key}' is read-only")));
        }
        inner.values.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if inner.read_only.contains(key) {
            return Err(StoreError::Unavailable(format!("key '{key}' is read-only")));
        }
        inner.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roundtrip_and_remove() {
        let store = MemoryStore::new();
        assert!(store.get("k").await.unwrap().is_none());
        store.set("k", b"v".to_vec()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(b"v".to_vec()));
        store.remove("k").await.unwrap();
        assert!(store.raw("k").is_none());
    }

    #[tokio::test]
    async fn test_read_only_key_rejects_writes() {
        let store = MemoryStore::new();
        store.insert_raw("k", "old");
        store.set_read_only("k", true);

        assert!(matches!(
            store.set("k", b"new".to_vec()).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.remove("k").await.is_err());
        assert_eq!(store.raw("k"), Some(b"old".to_vec()));

        store.set_read_only("k", false);
        store.set("k", b"new".to_vec()).await.unwrap();
        assert_eq!(store.raw("k"), Some(b"new".to_vec()));
    }
}

//! Key-Value Store Port - Byte Storage Interface
//!
//! The persistence layer only ever reads and writes whole values under
//! fixed string keys. Implementations decide where the bytes live
//! (files, memory). A `set` must replace the previous value entirely or
//! leave it untouched; partial writes are not acceptable.

use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by a byte store.
#[derive(Debug, Error)]
pub enum StoreError {
  /// Filesystem error while touching `key`.
  #[error("i/o error on key '{key}': {source}")]
  Io {
    key: String,
    #[source]
    source: std::io::Error,
  },
  /// The store refused the operation (quota, read-only, shut down).
  #[error("store unavailable: {0}")]
  Unavailable(String),
}

/// Trait for whole-value byte storage keyed by string.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
  /// Read the value under `key`; `None` if it was never written.
  async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

  /// Replace the value under `key`.
  async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

  /// Remove `key`. Removing a missing key is not an error.
  async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

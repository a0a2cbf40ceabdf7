//! File Store - One JSON File per Key with Atomic Replace
//!
//! Each key maps to `<data_dir>/<key>.json`. Values are written to a
//! temporary file first, then renamed over the final path, so a file is
//! always either the old or the new snapshot, never a partial write.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, instrument};

use crate::ports::key_value::{KeyValueStore, StoreError};

/// Directory-backed key-value store.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory holding one file per key.
    data_dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed.
    pub async fn new(data_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = data_dir.as_ref();
        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create data directory {}", dir.display()))?;

        Ok(Self {
            data_dir: dir.to_path_buf(),
        })
    }

    /// Directory this store writes into.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }

    fn tmp_path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json.tmp"))
    }
}

fn io_error(key: &str, source: std::io::Error) -> StoreError {
    StoreError::Io {
        key: key.to_string(),
        source,
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let tmp = self.tmp_path_for(key);
        let path = self.path_for(key);

        fs::write(&tmp, &value).await.map_err(|e| io_error(key, e))?;

        // Atomic rename
        fs::rename(&tmp, &path).await.map_err(|e| io_error(key, e))?;

        debug!(path = %path.display(), "Value written");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).await.unwrap();
        assert!(store.get("ltms_lawyers").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_replaces_value_and_leaves_no_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).await.unwrap();

        store.set("k", b"[1]".to_vec()).await.unwrap();
        store.set("k", b"[1,2]".to_vec()).await.unwrap();

        assert_eq!(store.get("k").await.unwrap().unwrap(), b"[1,2]".to_vec());
        assert!(dir.path().join("k.json").exists());
        assert!(!dir.path().join("k.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).await.unwrap();

        store.set("k", b"\"dark\"".to_vec()).await.unwrap();
        store.remove("k").await.unwrap();
        store.remove("k").await.unwrap();
        assert!(store.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_creates_nested_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::new(&nested).await.unwrap();
        assert_eq!(store.data_dir(), nested.as_path());
        assert!(nested.is_dir());
    }
}

//! Key-value storage for JSON records.
//!
//! DESIGN
//! ======
//! The server keeps exactly one record under a fixed key, but storage is
//! addressed by key so the backend stays ignorant of what it holds.
//! `JsonFileStore` writes one pretty-printed file per key and replaces it
//! wholesale on every write (temp file + rename, so readers never see a
//! half-written record). `MemoryStore` backs tests.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replace the value stored under `key`.
    async fn put(&self, key: &str, value: &Value) -> Result<(), StoreError>;
}

// =============================================================================
// JSON FILES
// =============================================================================

/// One `{dir}/{key}.json` file per key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KvStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let bytes = match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    async fn put(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let body = serde_json::to_vec_pretty(value)?;
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

// =============================================================================
// MEMORY
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.values.write().await.insert(key.to_owned(), value.clone());
        Ok(())
    }
}

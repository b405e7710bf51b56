//! File-backed store implementation.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use ethvault_store::{SecureStore, StoreError};

/// A `SecureStore` persisting all items in one JSON object file.
///
/// Mutations hold the map lock across the flush, so concurrent writers
/// serialize and the file always reflects a complete map. The rewrite goes
/// through a sibling `.tmp` file and a rename, never a partial overwrite.
pub struct FileStore {
    path: PathBuf,
    items: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open a store file, creating an empty store if the file does not exist.
    ///
    /// Fails if the file exists but cannot be read or is not a JSON object of
    /// strings; existing data is never clobbered by a failed open.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let items: HashMap<String, String> = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                StoreError::Serialization(format!("{}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(StoreError::Backend(format!(
                    "read {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        debug!(path = %path.display(), items = items.len(), "opened store file");
        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    /// The file this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn flush(&self, items: &HashMap<String, String>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(items)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| StoreError::Backend(format!("write {}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::Backend(format!("rename {}: {}", tmp.display(), e)))?;
        Ok(())
    }
}

#[async_trait]
impl SecureStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self.items.lock().await;
        items.insert(key.to_string(), value.to_string());
        self.flush(&items).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut items = self.items.lock().await;
        items.remove(key);
        self.flush(&items).await
    }

    async fn has(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.items.lock().await.contains_key(key))
    }

    async fn fetch_items(&self) -> Result<HashMap<String, String>, StoreError> {
        Ok(self.items.lock().await.clone())
    }

    async fn destroy(&self) -> Result<(), StoreError> {
        let mut items = self.items.lock().await;
        items.clear();
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(StoreError::Backend(format!(
                    "remove {}: {}",
                    self.path.display(),
                    e
                )))
            }
        }
        debug!(path = %self.path.display(), "destroyed store file");
        Ok(())
    }
}

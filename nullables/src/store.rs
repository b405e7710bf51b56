//! Nullable store - thread-safe in-memory storage for testing.

use async_trait::async_trait;
use ethvault_store::{SecureStore, StoreError};
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory [`SecureStore`] for testing.
/// Thread-safe for use with tokio's multi-threaded runtime.
pub struct NullStore {
    items: Mutex<HashMap<String, String>>,
    failure: Mutex<Option<String>>,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
            failure: Mutex::new(None),
        }
    }

    /// Make every subsequent operation fail with a backend error.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        match &*self.failure.lock().unwrap() {
            Some(message) => Err(StoreError::Backend(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecureStore for NullStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check_failure()?;
        Ok(self.items.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_failure()?;
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check_failure()?;
        self.items.lock().unwrap().remove(key);
        Ok(())
    }

    async fn fetch_items(&self) -> Result<HashMap<String, String>, StoreError> {
        self.check_failure()?;
        Ok(self.items.lock().unwrap().clone())
    }

    async fn destroy(&self) -> Result<(), StoreError> {
        self.check_failure()?;
        self.items.lock().unwrap().clear();
        Ok(())
    }
}

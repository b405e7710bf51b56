//! Abstract secure storage trait for the ethvault key vault.
//!
//! Every storage backend (the JSON file store, in-memory for testing)
//! implements this trait. The rest of the codebase depends only on the trait.

pub mod error;

pub use error::StoreError;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

/// Durable string key-value storage holding the vault's key records.
///
/// The store is the only shared mutable resource in the vault; every value is
/// written whole in a single `set`, never patched in place.
#[async_trait]
pub trait SecureStore: Send + Sync {
    /// Fetch the value under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the value under `key`. Deleting an absent key is a no-op.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Whether a value exists under `key`.
    async fn has(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key).await?.is_some())
    }

    /// Enumerate every stored item.
    async fn fetch_items(&self) -> Result<HashMap<String, String>, StoreError>;

    /// Drop all items and release the backing storage.
    async fn destroy(&self) -> Result<(), StoreError>;
}

// A shared store is still a store.
#[async_trait]
impl<T: SecureStore + ?Sized> SecureStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key).await
    }

    async fn has(&self, key: &str) -> Result<bool, StoreError> {
        (**self).has(key).await
    }

    async fn fetch_items(&self) -> Result<HashMap<String, String>, StoreError> {
        (**self).fetch_items().await
    }

    async fn destroy(&self) -> Result<(), StoreError> {
        (**self).destroy().await
    }
}

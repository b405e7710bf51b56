//! JSON file storage backend for the ethvault key vault.
//!
//! Implements the `SecureStore` trait from `ethvault-store` over a single
//! JSON object file: the whole map is loaded at open and rewritten on every
//! mutation via a temp-file rename.

pub mod file;

pub use file::FileStore;

//! Fundamental types for the ethvault key vault.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account addresses, private key bytes, the persisted key record, and the legacy
//! transaction fields handed to the signer.

pub mod address;
pub mod keys;
pub mod record;
pub mod tx;

pub use address::AccountAddress;
pub use keys::PrivateKeyBytes;
pub use record::{
    address_from_storage_key, storage_key, EncryptionKind, StoredKeyRecord, RECORD_VERSION,
    STORAGE_KEY_PREFIX,
};
pub use tx::TxData;

//! The persisted key record and its storage-key scheme.
//!
//! Every private key is stored as one JSON document under the key
//! `PRIVATE_ETH_KEY#<address>`. The document carries the value (plaintext key
//! or cipher blob), the algorithm label, an encrypted flag, and a format
//! version, with exactly these field names:
//!
//! ```json
//! { "encryption": "AES-256", "value": "...", "encrypted": true, "version": "1.0.0" }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::AccountAddress;

/// Version stamp written into every new record.
pub const RECORD_VERSION: &str = "1.0.0";

/// Namespace prefix for all key records in the backing store.
pub const STORAGE_KEY_PREFIX: &str = "PRIVATE_ETH_KEY#";

/// The storage key a private key record lives under.
pub fn storage_key(address: &AccountAddress) -> String {
    format!("{STORAGE_KEY_PREFIX}{address}")
}

/// The address part of a storage key, if the key is in the vault namespace.
pub fn address_from_storage_key(key: &str) -> Option<&str> {
    key.strip_prefix(STORAGE_KEY_PREFIX)
}

/// Encryption algorithm label of a stored record.
///
/// The on-disk form is the label string itself: `""` for plaintext records,
/// `"AES-256"` for the supported cipher. Unknown labels survive decoding as
/// `Other` so that reading a record written by a newer version still works;
/// decryption rejects them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncryptionKind {
    #[serde(rename = "")]
    None,
    #[serde(rename = "AES-256")]
    Aes256,
    #[serde(untagged)]
    Other(String),
}

impl EncryptionKind {
    /// The label as it appears in the persisted record.
    pub fn as_label(&self) -> &str {
        match self {
            EncryptionKind::None => "",
            EncryptionKind::Aes256 => "AES-256",
            EncryptionKind::Other(label) => label,
        }
    }

    /// Whether a record with this label holds an encrypted value.
    pub fn is_encrypted(&self) -> bool {
        !matches!(self, EncryptionKind::None)
    }
}

impl fmt::Display for EncryptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.as_label().is_empty() {
            write!(f, "plaintext")
        } else {
            write!(f, "{}", self.as_label())
        }
    }
}

/// One persisted private key record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredKeyRecord {
    pub encryption: EncryptionKind,
    pub value: String,
    pub encrypted: bool,
    pub version: String,
}

impl StoredKeyRecord {
    /// Build a plaintext record holding a normalized key.
    pub fn plaintext(value: impl Into<String>) -> Self {
        Self {
            encryption: EncryptionKind::None,
            value: value.into(),
            encrypted: false,
            version: RECORD_VERSION.to_string(),
        }
    }

    /// Build an encrypted record holding a cipher blob.
    ///
    /// # Panics
    /// Panics if `kind` is the plaintext label.
    pub fn enciphered(kind: EncryptionKind, blob: impl Into<String>) -> Self {
        assert!(kind.is_encrypted(), "enciphered record needs a cipher label");
        Self {
            encryption: kind,
            value: blob.into(),
            encrypted: true,
            version: RECORD_VERSION.to_string(),
        }
    }

    /// Whether the `encrypted` flag agrees with the algorithm label.
    ///
    /// Records built by the constructors always agree; a decoded record that
    /// does not is a corruption signal the vault logs.
    pub fn is_consistent(&self) -> bool {
        self.encrypted == self.encryption.is_encrypted()
    }
}

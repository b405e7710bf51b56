//! Vault error type.

use ethvault_cipher::CipherError;
use ethvault_codec::CodecError;
use ethvault_store::StoreError;
use ethvault_types::AccountAddress;
use thiserror::Error;

use crate::random::RandomSourceError;

/// Errors returned by [`KeyVault`](crate::KeyVault) operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Password and confirmation were not both supplied, or they differ.
    #[error("password and password confirmation do not match")]
    PasswordMismatch,

    /// The password contains control characters (newlines, tabs, NUL and
    /// friends). Printable characters, including spaces, are all allowed.
    #[error("password must not contain control characters")]
    PasswordContainsControlChars,

    /// No record is stored for the requested address.
    #[error("no private key stored for {0}")]
    KeyNotFound(AccountAddress),

    /// Key or address material failed validation.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The record names an encryption algorithm this vault has no cipher for.
    #[error("unsupported encryption algorithm {0:?}")]
    UnknownCipher(String),

    /// Decryption failed authentication, meaning the supplied password is
    /// wrong (or the blob was tampered with, which is indistinguishable).
    #[error("private key decryption failed: invalid password")]
    WrongPassword,

    /// Decryption succeeded but the plaintext is not a usable private key.
    #[error("decrypted value is not a private key")]
    DecryptedNotAKey,

    /// The decryption request was aborted before a password arrived.
    #[error("private key decryption aborted")]
    DecryptionAborted,

    /// The signing request was aborted before confirmation arrived.
    #[error("transaction signing aborted")]
    SigningAborted,

    /// No confirmation listener is attached to the bus.
    #[error("no confirmation listener available")]
    ConfirmerUnavailable,

    /// The entropy source failed.
    #[error(transparent)]
    Random(#[from] RandomSourceError),

    /// The storage backend failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A cipher failure other than bad authentication.
    #[error("cipher error: {0}")]
    Cipher(#[source] CipherError),

    /// A stored record could not be decoded.
    #[error("corrupted key record for {address}: {source}")]
    CorruptedRecord {
        address: AccountAddress,
        #[source]
        source: serde_json::Error,
    },

    /// The signing backend rejected the operation.
    #[error("signing error: {0}")]
    Signing(String),
}

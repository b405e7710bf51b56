//! Cipher error type.

use thiserror::Error;

/// Errors arising from password-based encryption.
#[derive(Debug, Error)]
pub enum CipherError {
    /// Wrong password or tampered ciphertext; AEAD authentication cannot
    /// distinguish the two.
    #[error("authentication failed: wrong password or corrupted data")]
    Authentication,

    #[error("invalid cipher blob: {0}")]
    InvalidBlob(String),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("encryption failed: {0}")]
    Encryption(String),
}

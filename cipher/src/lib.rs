//! Password-based secret encryption for the ethvault key vault.
//!
//! Defines the `SecretCipher` capability the vault encrypts and decrypts
//! through, plus the supported implementation: Argon2id key derivation in
//! front of AES-256-GCM, packed as `hex(salt || nonce || ciphertext)`.

pub mod aes256;
pub mod error;

pub use aes256::Aes256Cipher;
pub use error::CipherError;

use ethvault_types::EncryptionKind;

/// A symmetric cipher keyed by a user-chosen password.
///
/// `encrypt` and `decrypt` are pure string-to-string transforms; all
/// randomness (salt, nonce) lives inside the produced blob. The vault stamps
/// `kind()` into every encrypted record and refuses to decrypt records
/// carrying any other label.
pub trait SecretCipher: Send + Sync {
    /// Algorithm label written into records produced with this cipher.
    fn kind(&self) -> EncryptionKind;

    /// Encrypt a plaintext under a password, returning the storable blob.
    fn encrypt(&self, plaintext: &str, password: &str) -> Result<String, CipherError>;

    /// Decrypt a blob produced by `encrypt` with the same password.
    fn decrypt(&self, blob: &str, password: &str) -> Result<String, CipherError>;
}

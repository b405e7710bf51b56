//! Argon2id + AES-256-GCM cipher, the `"AES-256"` algorithm label.
//!
//! Encrypts a plaintext with a user-chosen password:
//! 1. Argon2id derives a 32-byte encryption key from the password + random salt
//! 2. AES-256-GCM encrypts the plaintext with a random nonce
//! 3. The blob is `hex(salt || nonce || ciphertext)`, self-contained for decryption

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use zeroize::Zeroizing;

use ethvault_types::EncryptionKind;

use crate::error::CipherError;
use crate::SecretCipher;

/// Argon2id parameters: 64 MB memory, 3 iterations, 1 lane of parallelism.
const ARGON2_MEMORY_KIB: u32 = 65536; // 64 MB
const ARGON2_ITERATIONS: u32 = 3;
const ARGON2_PARALLELISM: u32 = 1;
const ARGON2_OUTPUT_LEN: usize = 32;

/// Salt length in bytes.
const SALT_LEN: usize = 32;
/// AES-GCM nonce length in bytes (96 bits).
const NONCE_LEN: usize = 12;
/// AES-GCM authentication tag length in bytes.
const TAG_LEN: usize = 16;

/// The supported password cipher.
#[derive(Clone, Copy, Debug, Default)]
pub struct Aes256Cipher;

impl Aes256Cipher {
    pub fn new() -> Self {
        Self
    }
}

impl SecretCipher for Aes256Cipher {
    fn kind(&self) -> EncryptionKind {
        EncryptionKind::Aes256
    }

    fn encrypt(&self, plaintext: &str, password: &str) -> Result<String, CipherError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let key = derive_key(password, &salt)?;
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_ref()));
        let ciphertext = cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| CipherError::Encryption(e.to_string()))?;

        let mut blob = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
        blob.extend_from_slice(&salt);
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&ciphertext);
        Ok(hex::encode(blob))
    }

    fn decrypt(&self, blob: &str, password: &str) -> Result<String, CipherError> {
        let bytes = hex::decode(blob)
            .map_err(|e| CipherError::InvalidBlob(format!("not hex: {e}")))?;
        if bytes.len() < SALT_LEN + NONCE_LEN + TAG_LEN {
            return Err(CipherError::InvalidBlob(format!(
                "too short: {} bytes",
                bytes.len()
            )));
        }

        let salt = &bytes[..SALT_LEN];
        let nonce = &bytes[SALT_LEN..SALT_LEN + NONCE_LEN];
        let ciphertext = &bytes[SALT_LEN + NONCE_LEN..];

        let key = derive_key(password, salt)?;
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_ref()));
        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CipherError::Authentication)?;

        String::from_utf8(plaintext)
            .map_err(|_| CipherError::InvalidBlob("decrypted value is not UTF-8".to_string()))
    }
}

/// Derive a 32-byte key from a password and salt using Argon2id.
fn derive_key(password: &str, salt: &[u8]) -> Result<Zeroizing<[u8; 32]>, CipherError> {
    let params = Params::new(
        ARGON2_MEMORY_KIB,
        ARGON2_ITERATIONS,
        ARGON2_PARALLELISM,
        Some(ARGON2_OUTPUT_LEN),
    )
    .map_err(|e| CipherError::KeyDerivation(e.to_string()))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut output = Zeroizing::new([0u8; 32]);
    argon2
        .hash_password_into(password.as_bytes(), salt, output.as_mut())
        .map_err(|e| CipherError::KeyDerivation(e.to_string()))?;

    Ok(output)
}

//! Nullable cipher - reversible marker encryption for testing.

use ethvault_cipher::{CipherError, SecretCipher};
use ethvault_types::EncryptionKind;

/// A [`SecretCipher`] that tags the plaintext instead of encrypting it.
///
/// Blobs look like `null:<hex password>:<plaintext>`, which keeps them
/// trivially inspectable from assertions while still enforcing the
/// password check. Claims the real cipher's algorithm label so records it
/// produces decode like production ones.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullCipher;

const BLOB_TAG: &str = "null:";

impl SecretCipher for NullCipher {
    fn kind(&self) -> EncryptionKind {
        EncryptionKind::Aes256
    }

    fn encrypt(&self, plaintext: &str, password: &str) -> Result<String, CipherError> {
        Ok(format!("{BLOB_TAG}{}:{plaintext}", hex::encode(password)))
    }

    fn decrypt(&self, blob: &str, password: &str) -> Result<String, CipherError> {
        let rest = blob
            .strip_prefix(BLOB_TAG)
            .ok_or_else(|| CipherError::InvalidBlob("missing null-cipher tag".to_string()))?;
        let (stored, plaintext) = rest
            .split_once(':')
            .ok_or_else(|| CipherError::InvalidBlob("missing password field".to_string()))?;
        if stored != hex::encode(password) {
            return Err(CipherError::Authentication);
        }
        Ok(plaintext.to_string())
    }
}

//! BIP-39 mnemonic encoding of private keys.
//!
//! A private key's 32 bytes are the entropy of a 24-word English mnemonic;
//! the final word carries the 8-bit checksum. The encoding is a lossless
//! bijection over valid keys. `mnemonic_valid` accepts any standard BIP-39
//! length, but key conversion requires the 24-word form.

use bip39::Mnemonic;

use crate::error::CodecError;
use crate::keys::normalize_private_key;

/// Word count of a mnemonic carrying 256-bit entropy.
const KEY_WORD_COUNT: usize = 24;

/// Encode a private key as a 24-word mnemonic phrase.
pub fn private_key_to_mnemonic(key: &str) -> Result<String, CodecError> {
    let normalized = normalize_private_key(key)?;
    let entropy = hex::decode(&normalized).map_err(|_| CodecError::InvalidPrivateKey)?;
    let mnemonic = Mnemonic::from_entropy(&entropy)
        .map_err(|e| CodecError::InvalidMnemonic(e.to_string()))?;
    Ok(mnemonic.to_string())
}

/// Decode a 24-word mnemonic phrase back into a normalized private key.
///
/// Fails on a bad word, bad checksum, non-24-word phrase, or entropy that is
/// not a valid secp256k1 scalar.
pub fn mnemonic_to_private_key(phrase: &str) -> Result<String, CodecError> {
    let mnemonic =
        Mnemonic::parse_normalized(phrase).map_err(|e| CodecError::InvalidMnemonic(e.to_string()))?;
    if mnemonic.word_count() != KEY_WORD_COUNT {
        return Err(CodecError::InvalidMnemonic(format!(
            "expected {} words, got {}",
            KEY_WORD_COUNT,
            mnemonic.word_count()
        )));
    }
    let entropy = mnemonic.to_entropy();
    normalize_private_key(&hex::encode(entropy))
}

/// Whether a phrase is a valid BIP-39 mnemonic (wordlist membership and checksum).
pub fn mnemonic_valid(phrase: &str) -> bool {
    Mnemonic::parse_normalized(phrase).is_ok()
}

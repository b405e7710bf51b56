//! Private key validation, normalization, and address derivation.
//!
//! The vault's textual currency for a private key is a bare hex string:
//! exactly 64 hex digits, no `0x` prefix, lowercase in canonical form. The
//! decoded scalar must lie in `[1, n-1]` on secp256k1; `k256::SecretKey` is
//! the validity oracle.

use alloy_primitives::{keccak256, Address};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::SecretKey;

use ethvault_types::{AccountAddress, PrivateKeyBytes};

use crate::error::CodecError;

/// Length of a bare hex private key: 32 bytes as 64 hex digits.
pub const PRIVATE_KEY_HEX_LEN: usize = 64;

/// Decode and curve-validate a bare hex private key.
fn decode_key(key: &str) -> Result<[u8; 32], CodecError> {
    if key.len() != PRIVATE_KEY_HEX_LEN {
        return Err(CodecError::InvalidPrivateKey);
    }
    // Also rejects any `0x`-prefixed form: `x` is not a hex digit.
    if !key.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CodecError::InvalidPrivateKey);
    }
    let bytes = hex::decode(key).map_err(|_| CodecError::InvalidPrivateKey)?;
    let mut raw = [0u8; 32];
    raw.copy_from_slice(&bytes);
    SecretKey::from_slice(&raw).map_err(|_| CodecError::InvalidPrivateKey)?;
    Ok(raw)
}

/// Normalize a private key string to its canonical lowercase hex form.
///
/// Accepts only a bare 64-digit hex string of a valid scalar. Idempotent:
/// normalizing an already-normalized key returns it unchanged.
pub fn normalize_private_key(key: &str) -> Result<String, CodecError> {
    decode_key(key)?;
    Ok(key.to_ascii_lowercase())
}

/// Decode a private key string into its validated 32 raw bytes.
pub fn private_key_bytes(key: &str) -> Result<PrivateKeyBytes, CodecError> {
    decode_key(key).map(PrivateKeyBytes)
}

/// Derive the canonical checksummed account address of a private key.
///
/// Ethereum address format: `keccak256(uncompressed_pubkey[1..])[12..]`,
/// rendered with EIP-55 checksum casing.
pub fn address_of(key: &str) -> Result<AccountAddress, CodecError> {
    let raw = decode_key(key)?;
    let secret = SecretKey::from_slice(&raw).map_err(|_| CodecError::InvalidPrivateKey)?;
    let encoded = secret.public_key().to_encoded_point(false);
    // Skip the 0x04 prefix byte.
    let hash = keccak256(&encoded.as_bytes()[1..]);
    let address = Address::from_slice(&hash[12..]);
    Ok(AccountAddress::new(address.to_checksum(None)))
}

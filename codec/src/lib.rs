//! Key, address, and mnemonic codecs for the ethvault key vault.
//!
//! - **secp256k1** scalar validation and key normalization (bare lowercase hex)
//! - Address derivation via `keccak256(uncompressed_pubkey[1..])[12..]` with
//!   EIP-55 checksum casing
//! - **BIP-39** 24-word mnemonic encoding of the 32 key bytes

pub mod address;
pub mod error;
pub mod keys;
pub mod mnemonic;

pub use address::normalize_address;
pub use error::CodecError;
pub use keys::{address_of, normalize_private_key, private_key_bytes, PRIVATE_KEY_HEX_LEN};
pub use mnemonic::{mnemonic_to_private_key, mnemonic_valid, private_key_to_mnemonic};

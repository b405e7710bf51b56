//! Codec error type.

use thiserror::Error;

/// Errors arising from key, address, and mnemonic codecs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The value is not a bare 64-digit hex encoding of a valid secp256k1
    /// scalar. The offending value is never echoed back.
    #[error("invalid private key")]
    InvalidPrivateKey,

    #[error("invalid checksum address: {0}")]
    InvalidChecksumAddress(String),

    #[error("invalid mnemonic phrase: {0}")]
    InvalidMnemonic(String),
}

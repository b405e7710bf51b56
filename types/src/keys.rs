//! Secret key byte container.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// The 32 raw bytes of a secp256k1 private key.
///
/// Implements neither `Debug` nor `Serialize` nor `Clone`, and zeroizes on
/// drop. Validity (being a scalar in `[1, n-1]`) is checked by
/// `ethvault_codec`, not here.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKeyBytes(pub [u8; 32]);

impl PrivateKeyBytes {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for PrivateKeyBytes {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

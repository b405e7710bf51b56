//! Ethereum account address type with `0x` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An Ethereum account address in canonical EIP-55 checksummed form.
///
/// Derived from the account's public key via Keccak-256 over the uncompressed
/// point, keeping the last 20 bytes. Construction goes through
/// `ethvault_codec::normalize_address` or `ethvault_codec::address_of`, which
/// are the only places that checksum input; this type just carries the result.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// The standard prefix for all Ethereum addresses.
    pub const PREFIX: &'static str = "0x";

    /// Length of the full printable form: `0x` plus 40 hex digits.
    pub const LEN: usize = 42;

    /// Create an account address from an already-canonical string.
    ///
    /// # Panics
    /// Panics if the string does not start with `0x` or is not 42 characters.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "address must start with 0x");
        assert!(s.len() == Self::LEN, "address must be 42 characters");
        Self(s)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 40 hex digits without the `0x` prefix.
    pub fn hex_digits(&self) -> &str {
        &self.0[Self::PREFIX.len()..]
    }

    /// Validate that this address is well-formed (prefix, length, hex digits).
    ///
    /// Does not re-verify the EIP-55 checksum; canonical construction already did.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX)
            && self.0.len() == Self::LEN
            && self.hex_digits().chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

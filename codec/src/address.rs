//! Account address normalization with EIP-55 checksum validation.
//!
//! Canonical form: `0x` + 40 hex digits in EIP-55 checksum casing. Mixed-case
//! input is treated as carrying checksum information and must verify; input
//! in a single case carries none and is re-checksummed as-is.

use alloy_primitives::Address;

use ethvault_types::AccountAddress;

use crate::error::CodecError;

/// Normalize an address string to its canonical EIP-55 checksummed form.
///
/// Already-canonical input comes back unchanged. Fails with
/// `InvalidChecksumAddress` (naming the offending input) on a bad prefix,
/// length, non-hex digit, or failed checksum.
pub fn normalize_address(addr: &str) -> Result<AccountAddress, CodecError> {
    let invalid = || CodecError::InvalidChecksumAddress(addr.to_string());

    let digits = addr.strip_prefix(AccountAddress::PREFIX).ok_or_else(invalid)?;
    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let letters = digits.chars().filter(|c| c.is_ascii_alphabetic());
    let mixed_case = letters.clone().any(|c| c.is_ascii_lowercase())
        && letters.clone().any(|c| c.is_ascii_uppercase());

    let parsed = if mixed_case {
        Address::parse_checksummed(addr, None).map_err(|_| invalid())?
    } else {
        addr.parse::<Address>().map_err(|_| invalid())?
    };

    Ok(AccountAddress::new(parsed.to_checksum(None)))
}

//! Entropy source abstraction.
//!
//! Key generation draws 32 bytes from a [`RandomSource`]. Production code
//! uses [`OsRandom`]; tests substitute a scripted source so generated keys
//! are predictable.

use thiserror::Error;

/// The entropy source failed to produce bytes.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("random source failed: {0}")]
pub struct RandomSourceError(pub String);

/// Supplier of cryptographically secure random bytes.
pub trait RandomSource: Send + Sync {
    /// Fills `dest` with random bytes, or reports why it could not.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), RandomSourceError>;
}

impl<T: RandomSource + ?Sized> RandomSource for std::sync::Arc<T> {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), RandomSourceError> {
        (**self).fill_bytes(dest)
    }
}

/// Operating system entropy via `getrandom`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), RandomSourceError> {
        getrandom::getrandom(dest).map_err(|e| RandomSourceError(e.to_string()))
    }
}

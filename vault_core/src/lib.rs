//! Core vault logic for Ethereum private keys.
//!
//! [`KeyVault`] ties the storage, cipher, randomness and confirmation
//! capabilities together: keys are generated from a [`RandomSource`],
//! persisted through a `SecureStore` as versioned records, and every
//! decryption or transaction signature first passes through the
//! confirmation bus so an interactive listener can approve or abort it.

pub mod error;
pub mod random;
pub mod signer;
pub mod vault;

pub use error::VaultError;
pub use random::{OsRandom, RandomSource, RandomSourceError};
pub use signer::SignedTransaction;
pub use vault::KeyVault;

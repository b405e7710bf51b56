//! Nullable infrastructure for deterministic vault testing.
//!
//! Every external dependency of the vault (storage, cipher, entropy,
//! confirmation listener) sits behind a trait. This crate provides
//! test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem, the OS entropy pool, or a real user
//!
//! Usage: swap real implementations for nullables in tests.

pub mod cipher;
pub mod confirmer;
pub mod random;
pub mod store;

pub use cipher::NullCipher;
pub use confirmer::{abort_all, approve_all};
pub use random::NullRandom;
pub use store::NullStore;

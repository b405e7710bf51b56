//! Confirmation request channels for the ethvault key vault.
//!
//! Every sensitive vault operation (decrypting a stored key, signing a
//! transaction) publishes a prompt on one of two named channels and suspends
//! until an external listener resolves it. Prompts carry a single-use
//! resolver; a second resolution is a logged no-op, and dropping a prompt
//! unresolved reads as an abort on the waiting side.

pub mod bus;
pub mod error;
pub mod prompt;

pub use bus::{confirmation_channel, ConfirmationBus, ConfirmationListener, Prompt};
pub use error::ConfirmError;
pub use prompt::{DecryptDecision, DecryptPrompt, SignDecision, SignPrompt};

/// Channel name for key decryption requests.
pub const DECRYPT_TOPIC: &str = "eth:decrypt-private-key";

/// Channel name for transaction signing requests.
pub const SIGN_TOPIC: &str = "eth:tx:sign";

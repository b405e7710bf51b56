//! Confirmation prompts and their single-use resolvers.

use tokio::sync::oneshot;
use tracing::{debug, warn};

use ethvault_types::TxData;

/// Outcome of a decryption prompt.
#[derive(Debug)]
pub enum DecryptDecision {
    /// The user approved and supplied the record's password.
    Approve(String),
    Abort,
}

/// Outcome of a signing prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum SignDecision {
    Confirm,
    Abort,
}

/// Single-use completion handle backing a prompt.
///
/// The first resolution consumes the sender; any further resolution is
/// ignored with a warning. Dropping an unresolved resolver closes the
/// channel, which the waiter observes as an abort.
struct Resolver<T> {
    tx: Option<oneshot::Sender<T>>,
    channel: &'static str,
}

impl<T> Resolver<T> {
    fn new(tx: oneshot::Sender<T>, channel: &'static str) -> Self {
        Self {
            tx: Some(tx),
            channel,
        }
    }

    fn resolve(&mut self, value: T) {
        match self.tx.take() {
            // The waiter may have given up already; that is its business.
            Some(tx) => {
                let _ = tx.send(value);
            }
            None => warn!(
                channel = self.channel,
                "confirmation resolved twice; ignoring"
            ),
        }
    }

    fn is_resolved(&self) -> bool {
        self.tx.is_none()
    }
}

impl<T> Drop for Resolver<T> {
    fn drop(&mut self) {
        if self.tx.is_some() {
            debug!(
                channel = self.channel,
                "confirmation prompt dropped unresolved; waiter observes abort"
            );
        }
    }
}

/// A pending request to decrypt a stored private key.
pub struct DecryptPrompt {
    topic: String,
    reason: String,
    resolver: Resolver<DecryptDecision>,
}

impl DecryptPrompt {
    pub(crate) fn new(
        topic: String,
        reason: String,
        tx: oneshot::Sender<DecryptDecision>,
    ) -> Self {
        Self {
            topic,
            reason,
            resolver: Resolver::new(tx, crate::DECRYPT_TOPIC),
        }
    }

    /// Domain tag supplied by the requesting caller, e.g. `"ethereum"`.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Human-readable purpose of the decryption.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Approve the request, supplying the password the record was saved with.
    pub fn approve(&mut self, password: impl Into<String>) {
        self.resolver.resolve(DecryptDecision::Approve(password.into()));
    }

    /// Reject the request.
    pub fn abort(&mut self) {
        self.resolver.resolve(DecryptDecision::Abort);
    }

    /// Whether a decision was already delivered.
    pub fn is_resolved(&self) -> bool {
        self.resolver.is_resolved()
    }
}

impl std::fmt::Debug for DecryptPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecryptPrompt")
            .field("topic", &self.topic)
            .field("reason", &self.reason)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// A pending request to sign a transaction.
pub struct SignPrompt {
    tx_data: TxData,
    resolver: Resolver<SignDecision>,
}

impl SignPrompt {
    pub(crate) fn new(tx_data: TxData, tx: oneshot::Sender<SignDecision>) -> Self {
        Self {
            tx_data,
            resolver: Resolver::new(tx, crate::SIGN_TOPIC),
        }
    }

    /// The transaction awaiting a signature.
    pub fn tx_data(&self) -> &TxData {
        &self.tx_data
    }

    /// Confirm the request; the vault proceeds to sign.
    pub fn confirm(&mut self) {
        self.resolver.resolve(SignDecision::Confirm);
    }

    /// Reject the request.
    pub fn abort(&mut self) {
        self.resolver.resolve(SignDecision::Abort);
    }

    /// Whether a decision was already delivered.
    pub fn is_resolved(&self) -> bool {
        self.resolver.is_resolved()
    }
}

impl std::fmt::Debug for SignPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignPrompt")
            .field("tx_data", &self.tx_data)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

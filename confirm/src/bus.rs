//! The bus half held by the vault and the listener half held by the UI.

use tokio::sync::{mpsc, oneshot};

use ethvault_types::TxData;

use crate::error::ConfirmError;
use crate::prompt::{DecryptDecision, DecryptPrompt, SignDecision, SignPrompt};

/// Create a connected bus/listener pair.
///
/// The bus side is held (and cloned freely) by vaults; the listener side
/// belongs to whatever surface asks the user. Channels are unbounded: a
/// prompt is never dropped for backpressure, and no timeout is imposed here.
pub fn confirmation_channel() -> (ConfirmationBus, ConfirmationListener) {
    let (decrypt_tx, decrypt_rx) = mpsc::unbounded_channel();
    let (sign_tx, sign_rx) = mpsc::unbounded_channel();
    (
        ConfirmationBus {
            decrypt_tx,
            sign_tx,
        },
        ConfirmationListener {
            decrypt_rx,
            sign_rx,
        },
    )
}

/// Publishing side: sends prompts, hands back the receiver the vault awaits.
#[derive(Clone)]
pub struct ConfirmationBus {
    decrypt_tx: mpsc::UnboundedSender<DecryptPrompt>,
    sign_tx: mpsc::UnboundedSender<SignPrompt>,
}

impl ConfirmationBus {
    /// Publish a decryption prompt; the returned receiver yields the decision.
    pub fn request_decrypt(
        &self,
        topic: impl Into<String>,
        reason: impl Into<String>,
    ) -> Result<oneshot::Receiver<DecryptDecision>, ConfirmError> {
        let (tx, rx) = oneshot::channel();
        let prompt = DecryptPrompt::new(topic.into(), reason.into(), tx);
        self.decrypt_tx
            .send(prompt)
            .map_err(|_| ConfirmError::ListenerGone)?;
        Ok(rx)
    }

    /// Publish a signing prompt; the returned receiver yields the decision.
    pub fn request_sign(
        &self,
        tx_data: TxData,
    ) -> Result<oneshot::Receiver<SignDecision>, ConfirmError> {
        let (tx, rx) = oneshot::channel();
        let prompt = SignPrompt::new(tx_data, tx);
        self.sign_tx
            .send(prompt)
            .map_err(|_| ConfirmError::ListenerGone)?;
        Ok(rx)
    }
}

/// A prompt from either channel, as produced by [`ConfirmationListener::next`].
#[derive(Debug)]
pub enum Prompt {
    Decrypt(DecryptPrompt),
    Sign(SignPrompt),
}

/// Receiving side: yields prompts in publication order per channel.
pub struct ConfirmationListener {
    decrypt_rx: mpsc::UnboundedReceiver<DecryptPrompt>,
    sign_rx: mpsc::UnboundedReceiver<SignPrompt>,
}

impl ConfirmationListener {
    /// Next prompt from either channel, or `None` once every bus clone is
    /// gone and both channels have drained.
    pub async fn next(&mut self) -> Option<Prompt> {
        tokio::select! {
            Some(prompt) = self.decrypt_rx.recv() => Some(Prompt::Decrypt(prompt)),
            Some(prompt) = self.sign_rx.recv() => Some(Prompt::Sign(prompt)),
            else => None,
        }
    }

    /// Next decryption prompt, or `None` once every bus clone is gone.
    pub async fn next_decrypt(&mut self) -> Option<DecryptPrompt> {
        self.decrypt_rx.recv().await
    }

    /// Next signing prompt, or `None` once every bus clone is gone.
    pub async fn next_sign(&mut self) -> Option<SignPrompt> {
        self.sign_rx.recv().await
    }

    /// Non-blocking variant of `next_decrypt`.
    pub fn try_next_decrypt(&mut self) -> Option<DecryptPrompt> {
        self.decrypt_rx.try_recv().ok()
    }

    /// Non-blocking variant of `next_sign`.
    pub fn try_next_sign(&mut self) -> Option<SignPrompt> {
        self.sign_rx.try_recv().ok()
    }
}

//! Nullable confirmer - scripted answers to confirmation prompts.

use ethvault_confirm::{ConfirmationListener, Prompt};
use tokio::task::JoinHandle;

/// Spawn a listener task that approves every prompt.
///
/// Decryption prompts are answered with `password`; signing prompts are
/// confirmed. The task ends once every bus clone is dropped.
pub fn approve_all(
    mut listener: ConfirmationListener,
    password: impl Into<String>,
) -> JoinHandle<()> {
    let password = password.into();
    tokio::spawn(async move {
        while let Some(prompt) = listener.next().await {
            match prompt {
                Prompt::Decrypt(mut prompt) => prompt.approve(password.clone()),
                Prompt::Sign(mut prompt) => prompt.confirm(),
            }
        }
    })
}

/// Spawn a listener task that aborts every prompt.
pub fn abort_all(mut listener: ConfirmationListener) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(prompt) = listener.next().await {
            match prompt {
                Prompt::Decrypt(mut prompt) => prompt.abort(),
                Prompt::Sign(mut prompt) => prompt.abort(),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethvault_confirm::{confirmation_channel, DecryptDecision, SignDecision};

    #[tokio::test]
    async fn approve_all_answers_both_channels() {
        let (bus, listener) = confirmation_channel();
        let handle = approve_all(listener, "pw");

        let decrypt = bus.request_decrypt("ethereum", "test").unwrap();
        assert!(matches!(
            decrypt.await.unwrap(),
            DecryptDecision::Approve(p) if p == "pw"
        ));

        drop(bus);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn abort_all_aborts() {
        let (bus, listener) = confirmation_channel();
        let handle = abort_all(listener);

        let decrypt = bus.request_decrypt("ethereum", "test").unwrap();
        assert!(matches!(decrypt.await.unwrap(), DecryptDecision::Abort));

        let sign = bus
            .request_sign(ethvault_types::TxData {
                nonce: 0,
                gas_price: 1,
                gas_limit: 21_000,
                to: None,
                value: alloy_primitives::U256::ZERO,
                data: Default::default(),
                chain_id: None,
            })
            .unwrap();
        assert_eq!(sign.await.unwrap(), SignDecision::Abort);

        drop(bus);
        handle.await.unwrap();
    }
}

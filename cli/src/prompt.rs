//! Interactive answering of confirmation prompts.
//!
//! The vault suspends decryption and signing until its prompt is resolved.
//! [`run_gated`] drives a vault call and the confirmation listener together
//! on one task, so the prompt a call publishes is answered from the same
//! terminal session that issued the command.

use std::future::Future;
use std::io::{self, BufRead, Write};

use ethvault_confirm::{ConfirmationListener, Prompt};
use ethvault_core::VaultError;

/// Run a gated vault call, answering its prompts from the terminal.
pub async fn run_gated<T>(
    listener: &mut ConfirmationListener,
    op: impl Future<Output = Result<T, VaultError>>,
) -> Result<T, VaultError> {
    tokio::pin!(op);
    loop {
        tokio::select! {
            result = &mut op => return result,
            // The vault call stays suspended until this prompt resolves,
            // so the blocking terminal reads below cannot deadlock it.
            Some(prompt) = listener.next() => answer(prompt),
        }
    }
}

fn answer(prompt: Prompt) {
    match prompt {
        Prompt::Decrypt(mut prompt) => {
            eprintln!(
                "decryption requested ({}): {}",
                prompt.topic(),
                prompt.reason()
            );
            match ask_password("Approve and decrypt?") {
                Some(password) => prompt.approve(password),
                None => prompt.abort(),
            }
        }
        Prompt::Sign(mut prompt) => {
            let tx = prompt.tx_data();
            let to = match tx.to {
                Some(address) => address.to_string(),
                None => "(contract creation)".to_string(),
            };
            eprintln!(
                "signing requested: nonce {}, to {}, value {} wei, gas {} at {} wei",
                tx.nonce, to, tx.value, tx.gas_limit, tx.gas_price
            );
            if ask_yes_no("Sign this transaction?") {
                prompt.confirm();
            } else {
                prompt.abort();
            }
        }
    }
}

fn ask_password(question: &str) -> Option<String> {
    if !ask_yes_no(question) {
        return None;
    }
    rpassword::prompt_password("Password: ").ok()
}

/// Ask a yes-or-no question on stderr; only an explicit yes passes.
pub fn ask_yes_no(question: &str) -> bool {
    eprint!("{question} [y/N] ");
    let _ = io::stderr().flush();
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim(), "y" | "Y" | "yes")
}

/// Read a secret hex key without echoing it.
pub fn read_secret_key() -> anyhow::Result<String> {
    let key = rpassword::prompt_password("Private key (hex): ")?;
    Ok(key.trim().to_string())
}

/// Read a mnemonic phrase from the terminal.
pub fn read_mnemonic() -> anyhow::Result<String> {
    eprintln!("Enter your 24-word mnemonic phrase:");
    eprint!("> ");
    let _ = io::stderr().flush();
    let mut phrase = String::new();
    io::stdin().lock().read_line(&mut phrase)?;
    Ok(phrase.trim().to_string())
}

/// Prompt for a new password twice; the vault checks the pair matches.
pub fn read_new_password() -> anyhow::Result<(String, String)> {
    let password = rpassword::prompt_password("Password: ")?;
    let confirmation = rpassword::prompt_password("Confirm password: ")?;
    Ok((password, confirmation))
}

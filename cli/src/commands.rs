//! One function per subcommand.

use std::path::Path;

use anyhow::Context;
use ethvault_cipher::Aes256Cipher;
use ethvault_codec::{address_of, mnemonic_to_private_key, private_key_to_mnemonic};
use ethvault_confirm::{ConfirmationListener, DECRYPT_TOPIC};
use ethvault_core::{KeyVault, OsRandom};
use ethvault_store_file::FileStore;
use ethvault_types::{StoredKeyRecord, TxData};

use crate::prompt;

pub type Vault = KeyVault<FileStore, Aes256Cipher, OsRandom>;

pub async fn generate(vault: &Vault, encrypt: bool, show_key: bool) -> anyhow::Result<()> {
    let key = vault.create_private_key()?;
    let address = address_of(&key)?;
    save_key(vault, &key, encrypt).await?;

    println!("{address}");
    if show_key {
        println!("{key}");
    }
    Ok(())
}

pub async fn import(vault: &Vault, from_mnemonic: bool, encrypt: bool) -> anyhow::Result<()> {
    let key = if from_mnemonic {
        let phrase = prompt::read_mnemonic()?;
        mnemonic_to_private_key(&phrase)?
    } else {
        prompt::read_secret_key()?
    };
    let address = address_of(&key)?;
    save_key(vault, &key, encrypt).await?;

    println!("{address}");
    Ok(())
}

pub async fn list(vault: &Vault) -> anyhow::Result<()> {
    let mut pairs: Vec<_> = vault.all_key_pairs().await?.into_iter().collect();
    if pairs.is_empty() {
        eprintln!("no keys stored");
        return Ok(());
    }
    pairs.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));
    for (address, record) in pairs {
        println!("{address}  {}", record.encryption);
    }
    Ok(())
}

pub async fn show(
    vault: &Vault,
    listener: &mut ConfirmationListener,
    address: &str,
    decrypt: bool,
    reason: &str,
) -> anyhow::Result<()> {
    let record = vault.get_private_key(address).await?;
    println!("encryption: {}", record.encryption);
    println!("version:    {}", record.version);
    if decrypt {
        let key = reveal_key(vault, listener, &record, reason).await?;
        println!("key:        {key}");
    }
    Ok(())
}

pub async fn export(
    vault: &Vault,
    listener: &mut ConfirmationListener,
    address: &str,
) -> anyhow::Result<()> {
    let record = vault.get_private_key(address).await?;
    let key = reveal_key(vault, listener, &record, "export mnemonic phrase").await?;
    let phrase = private_key_to_mnemonic(&key)?;

    println!("{phrase}");
    eprintln!("anyone holding this phrase controls the key; store it offline");
    Ok(())
}

pub async fn delete(vault: &Vault, address: &str, yes: bool) -> anyhow::Result<()> {
    if !yes && !prompt::ask_yes_no(&format!("Delete the key for {address}?")) {
        eprintln!("aborted");
        return Ok(());
    }
    vault.delete_private_key(address).await?;
    eprintln!("deleted");
    Ok(())
}

pub async fn sign(
    vault: &Vault,
    listener: &mut ConfirmationListener,
    address: &str,
    tx_path: &Path,
) -> anyhow::Result<()> {
    let json = if tx_path == Path::new("-") {
        std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?
    } else {
        std::fs::read_to_string(tx_path)
            .with_context(|| format!("failed to read {}", tx_path.display()))?
    };
    let tx: TxData = serde_json::from_str(&json).context("invalid transaction JSON")?;

    let record = vault.get_private_key(address).await?;
    let key = reveal_key(vault, listener, &record, "sign transaction").await?;
    let signed = prompt::run_gated(listener, vault.sign_tx(tx, &key)).await?;

    println!("{}", signed.raw_hex());
    eprintln!("hash: {}", signed.hash());
    Ok(())
}

pub async fn destroy(vault: &Vault, yes: bool) -> anyhow::Result<()> {
    if !yes && !prompt::ask_yes_no("Delete every stored key and the store file itself?") {
        eprintln!("aborted");
        return Ok(());
    }
    vault.destroy().await?;
    eprintln!("storage destroyed");
    Ok(())
}

async fn save_key(vault: &Vault, key: &str, encrypt: bool) -> anyhow::Result<()> {
    if encrypt {
        let (password, confirmation) = prompt::read_new_password()?;
        vault
            .save_private_key(key, Some(&password), Some(&confirmation))
            .await?;
    } else {
        vault.save_private_key(key, None, None).await?;
    }
    Ok(())
}

/// The plaintext key from a record: direct for unencrypted records, through
/// the confirmation protocol otherwise.
async fn reveal_key(
    vault: &Vault,
    listener: &mut ConfirmationListener,
    record: &StoredKeyRecord,
    reason: &str,
) -> anyhow::Result<String> {
    if record.encrypted {
        let op = vault.decrypt_private_key(record, reason, DECRYPT_TOPIC);
        Ok(prompt::run_gated(listener, op).await?)
    } else {
        Ok(record.value.clone())
    }
}

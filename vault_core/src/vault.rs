//! The key vault.

use std::collections::HashMap;

use ethvault_cipher::{CipherError, SecretCipher};
use ethvault_codec::{address_of, normalize_address, normalize_private_key, private_key_bytes};
use ethvault_confirm::{ConfirmationBus, DecryptDecision, SignDecision};
use ethvault_store::{SecureStore, StoreError};
use ethvault_types::{address_from_storage_key, storage_key, AccountAddress, StoredKeyRecord, TxData};
use tracing::{debug, info, warn};

use crate::error::VaultError;
use crate::random::RandomSource;
use crate::signer::{sign_transaction, SignedTransaction};

/// Vault over Ethereum private keys.
///
/// Generic over its capabilities: a [`SecureStore`] for persistence, a
/// [`SecretCipher`] for at-rest encryption, and a [`RandomSource`] for key
/// generation. Decryption and signing additionally go through the
/// [`ConfirmationBus`], suspending until a listener approves or aborts.
///
/// The store exclusively owns the durable bytes. The vault caches nothing
/// between calls, and every save replaces the whole record in one write.
pub struct KeyVault<S, C, R> {
    store: S,
    cipher: C,
    random: R,
    confirmer: ConfirmationBus,
}

impl<S, C, R> KeyVault<S, C, R>
where
    S: SecureStore,
    C: SecretCipher,
    R: RandomSource,
{
    pub fn new(store: S, cipher: C, random: R, confirmer: ConfirmationBus) -> Self {
        Self {
            store,
            cipher,
            random,
            confirmer,
        }
    }

    /// Generates a fresh private key and returns it as normalized hex.
    ///
    /// Draws exactly one batch of 32 random bytes. In the astronomically
    /// unlikely case the bytes fall outside the curve order, the error is
    /// surfaced instead of silently redrawing. Nothing is persisted;
    /// storing the key is a separate, explicit step.
    pub fn create_private_key(&self) -> Result<String, VaultError> {
        let mut bytes = [0u8; 32];
        self.random.fill_bytes(&mut bytes)?;
        let key = normalize_private_key(&hex::encode(bytes))?;
        debug!("generated private key");
        Ok(key)
    }

    /// Persists `key` under its derived address, optionally encrypted.
    ///
    /// Passwords follow a both-or-neither rule: supplying exactly one of
    /// `password`/`password_confirmation` is a [`VaultError::PasswordMismatch`],
    /// as is supplying two that differ. All password and key validation runs
    /// before any encryption or storage I/O.
    pub async fn save_private_key(
        &self,
        key: &str,
        password: Option<&str>,
        password_confirmation: Option<&str>,
    ) -> Result<(), VaultError> {
        let password = validate_password_pair(password, password_confirmation)?;
        let key = normalize_private_key(key)?;
        let address = address_of(&key)?;

        let record = match password {
            None => StoredKeyRecord::plaintext(key),
            Some(password) => {
                let blob = self
                    .cipher
                    .encrypt(&key, password)
                    .map_err(VaultError::Cipher)?;
                StoredKeyRecord::enciphered(self.cipher.kind(), blob)
            }
        };

        let json = serde_json::to_string(&record)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.set(&storage_key(&address), &json).await?;
        info!(address = %address, encrypted = record.encrypted, "saved private key record");
        Ok(())
    }

    /// Reads the stored record for `address`.
    ///
    /// The record comes back as persisted, possibly still encrypted; pass it
    /// to [`decrypt_private_key`](Self::decrypt_private_key) to recover the
    /// key itself. Any checksum-valid spelling of the address finds the
    /// record, since lookups go through normalization.
    pub async fn get_private_key(&self, address: &str) -> Result<StoredKeyRecord, VaultError> {
        let address = normalize_address(address)?;
        let json = self
            .store
            .get(&storage_key(&address))
            .await?
            .ok_or_else(|| VaultError::KeyNotFound(address.clone()))?;
        decode_record(&address, &json)
    }

    /// Enumerates every stored record, keyed by canonical address.
    ///
    /// Storage keys outside the vault's namespace are skipped.
    pub async fn all_key_pairs(
        &self,
    ) -> Result<HashMap<AccountAddress, StoredKeyRecord>, VaultError> {
        let items = self.store.fetch_items().await?;
        let mut pairs = HashMap::new();
        for (key, json) in &items {
            let Some(address) = address_from_storage_key(key) else {
                continue;
            };
            let address = normalize_address(address)?;
            let record = decode_record(&address, json)?;
            pairs.insert(address, record);
        }
        Ok(pairs)
    }

    /// Removes the record for `address`.
    pub async fn delete_private_key(&self, address: &str) -> Result<(), VaultError> {
        let address = normalize_address(address)?;
        let key = storage_key(&address);
        if !self.store.has(&key).await? {
            return Err(VaultError::KeyNotFound(address));
        }
        self.store.remove(&key).await?;
        info!(address = %address, "deleted private key record");
        Ok(())
    }

    /// Recovers the plaintext key from a stored record, gated on confirmation.
    ///
    /// Publishes a prompt carrying `topic` and `reason` on the confirmation
    /// bus and suspends until the listener resolves it. An approval carries
    /// the password; the record is then decrypted and the plaintext checked
    /// to actually be a private key. An abort, or a listener that drops the
    /// prompt unresolved, ends the call with
    /// [`VaultError::DecryptionAborted`].
    ///
    /// Concurrent calls are independent: each prompt carries its own
    /// resolver, so several decryptions may be outstanding at once and
    /// resolve in any order.
    pub async fn decrypt_private_key(
        &self,
        record: &StoredKeyRecord,
        reason: &str,
        topic: &str,
    ) -> Result<String, VaultError> {
        if record.encryption != self.cipher.kind() {
            return Err(VaultError::UnknownCipher(
                record.encryption.as_label().to_string(),
            ));
        }

        let decision = self
            .confirmer
            .request_decrypt(topic, reason)
            .map_err(|_| VaultError::ConfirmerUnavailable)?;
        debug!(topic, reason, "requested decryption confirmation");

        match decision.await {
            Ok(DecryptDecision::Approve(password)) => {
                let plaintext = self
                    .cipher
                    .decrypt(&record.value, &password)
                    .map_err(|e| match e {
                        CipherError::Authentication => VaultError::WrongPassword,
                        other => VaultError::Cipher(other),
                    })?;
                normalize_private_key(&plaintext).map_err(|_| VaultError::DecryptedNotAKey)
            }
            Ok(DecryptDecision::Abort) | Err(_) => {
                debug!(topic, "decryption aborted");
                Err(VaultError::DecryptionAborted)
            }
        }
    }

    /// Signs a legacy transaction with `private_key`, gated on confirmation.
    ///
    /// The key is validated first; an invalid key fails without publishing
    /// any confirmation event. On confirmation the transaction is signed
    /// deterministically, so the same inputs always yield the same raw
    /// bytes. An abort, or a dropped prompt, ends the call with
    /// [`VaultError::SigningAborted`].
    pub async fn sign_tx(
        &self,
        tx: TxData,
        private_key: &str,
    ) -> Result<SignedTransaction, VaultError> {
        let key = private_key_bytes(private_key)?;

        let decision = self
            .confirmer
            .request_sign(tx.clone())
            .map_err(|_| VaultError::ConfirmerUnavailable)?;
        debug!(nonce = tx.nonce, "requested signing confirmation");

        match decision.await {
            Ok(SignDecision::Confirm) => {
                let signed = sign_transaction(&tx, &key)?;
                info!(hash = %signed.hash(), "signed transaction");
                Ok(signed)
            }
            Ok(SignDecision::Abort) | Err(_) => {
                debug!(nonce = tx.nonce, "signing aborted");
                Err(VaultError::SigningAborted)
            }
        }
    }

    /// Drops every record and destroys the backing storage.
    pub async fn destroy(&self) -> Result<(), VaultError> {
        self.store.destroy().await?;
        warn!("destroyed key storage");
        Ok(())
    }
}

/// Applies the both-or-neither password rule and the character policy.
fn validate_password_pair<'a>(
    password: Option<&'a str>,
    confirmation: Option<&'a str>,
) -> Result<Option<&'a str>, VaultError> {
    match (password, confirmation) {
        (None, None) => Ok(None),
        (Some(password), Some(confirmation)) => {
            if password != confirmation {
                return Err(VaultError::PasswordMismatch);
            }
            if password.chars().any(char::is_control) {
                return Err(VaultError::PasswordContainsControlChars);
            }
            Ok(Some(password))
        }
        _ => Err(VaultError::PasswordMismatch),
    }
}

fn decode_record(address: &AccountAddress, json: &str) -> Result<StoredKeyRecord, VaultError> {
    let record: StoredKeyRecord =
        serde_json::from_str(json).map_err(|source| VaultError::CorruptedRecord {
            address: address.clone(),
            source,
        })?;
    if !record.is_consistent() {
        warn!(
            address = %address,
            encryption = %record.encryption,
            encrypted = record.encrypted,
            "record flag disagrees with its algorithm label"
        );
    }
    Ok(record)
}

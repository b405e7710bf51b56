//! Integration tests exercising the full vault pipeline:
//! key generation → persistence → confirmation-gated decrypt/sign → readback.
//!
//! These tests wire the vault to its nullable collaborators, verifying the
//! protocols work end-to-end rather than only in isolation.

use std::sync::Arc;

use alloy_consensus::{SignableTransaction, TxLegacy};
use alloy_primitives::{address, TxKind, U256};
use ethvault_cipher::SecretCipher;
use ethvault_codec::{address_of, CodecError};
use ethvault_confirm::{confirmation_channel, ConfirmationListener, DECRYPT_TOPIC, SIGN_TOPIC};
use ethvault_core::{KeyVault, VaultError};
use ethvault_nullables::{abort_all, approve_all, NullCipher, NullRandom, NullStore};
use ethvault_store::{SecureStore, StoreError};
use ethvault_types::{EncryptionKind, StoredKeyRecord, TxData};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const KEY_ONE: &str = "0000000000000000000000000000000000000000000000000000000000000001";
const ADDR_ONE: &str = "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf";

type TestVault = KeyVault<Arc<NullStore>, NullCipher, NullRandom>;

fn one_key_bytes() -> [u8; 32] {
    let mut bytes = [0u8; 32];
    bytes[31] = 1;
    bytes
}

fn letter_key() -> String {
    "aa".repeat(32)
}

fn build_vault(random: NullRandom) -> (TestVault, ConfirmationListener, Arc<NullStore>) {
    let (bus, listener) = confirmation_channel();
    let store = Arc::new(NullStore::new());
    let vault = KeyVault::new(store.clone(), NullCipher, random, bus);
    (vault, listener, store)
}

fn sample_tx() -> TxData {
    TxData {
        nonce: 3,
        gas_price: 20_000_000_000,
        gas_limit: 21_000,
        to: Some(address!("814944ed940f27eb40330882a24baad21c30818e")),
        value: U256::from(1),
        data: Default::default(),
        chain_id: None,
    }
}

// ---------------------------------------------------------------------------
// 1. Key generation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_returns_scripted_key() {
    let (vault, _listener, _store) = build_vault(NullRandom::constant(one_key_bytes()));
    assert_eq!(vault.create_private_key().unwrap(), KEY_ONE);
}

#[tokio::test]
async fn create_surfaces_invalid_scalar_without_retry() {
    let random = Arc::new(NullRandom::constant([0u8; 32]));
    let (bus, _listener) = confirmation_channel();
    let vault = KeyVault::new(Arc::new(NullStore::new()), NullCipher, random.clone(), bus);

    let err = vault.create_private_key().unwrap_err();
    assert!(matches!(
        err,
        VaultError::Codec(CodecError::InvalidPrivateKey)
    ));
    // Exactly one draw: the zero scalar is reported, never silently redrawn.
    assert_eq!(random.draws(), 1);
}

#[tokio::test]
async fn create_propagates_random_failure() {
    let (vault, _listener, _store) = build_vault(NullRandom::failing("entropy exhausted"));
    let err = vault.create_private_key().unwrap_err();
    assert!(matches!(err, VaultError::Random(_)));
    assert!(err.to_string().contains("entropy exhausted"));
}

// ---------------------------------------------------------------------------
// 2. Save and read back
// ---------------------------------------------------------------------------

#[tokio::test]
async fn plaintext_save_reads_back_exactly() {
    let (vault, _listener, store) = build_vault(NullRandom::constant(one_key_bytes()));
    vault.save_private_key(KEY_ONE, None, None).await.unwrap();

    let record = vault.get_private_key(ADDR_ONE).await.unwrap();
    assert_eq!(record, StoredKeyRecord::plaintext(KEY_ONE));

    let json = store
        .get(&format!("PRIVATE_ETH_KEY#{ADDR_ONE}"))
        .await
        .unwrap()
        .unwrap();
    assert!(json.contains("\"encryption\":\"\""));
    assert!(json.contains("\"encrypted\":false"));
    assert!(json.contains("\"version\":\"1.0.0\""));
    assert!(json.contains(KEY_ONE));
}

#[tokio::test]
async fn save_normalizes_key_case() {
    let (vault, _listener, _store) = build_vault(NullRandom::constant(one_key_bytes()));
    let key = letter_key();
    vault
        .save_private_key(&key.to_uppercase(), None, None)
        .await
        .unwrap();

    let address = address_of(&key).unwrap();
    let record = vault.get_private_key(address.as_str()).await.unwrap();
    assert_eq!(record.value, key);
}

#[tokio::test]
async fn encrypted_save_stores_cipher_blob() {
    let (vault, _listener, _store) = build_vault(NullRandom::constant(one_key_bytes()));
    vault
        .save_private_key(KEY_ONE, Some("pw"), Some("pw"))
        .await
        .unwrap();

    let record = vault.get_private_key(ADDR_ONE).await.unwrap();
    assert!(record.encrypted);
    assert_eq!(record.encryption, EncryptionKind::Aes256);
    assert_ne!(record.value, KEY_ONE);
    assert!(record.is_consistent());
}

#[tokio::test]
async fn lone_or_differing_password_is_a_mismatch() {
    let (vault, _listener, store) = build_vault(NullRandom::constant(one_key_bytes()));

    for (pw, confirm) in [
        (Some("pw"), None),
        (None, Some("pw")),
        (Some("pw"), Some("other")),
    ] {
        let err = vault
            .save_private_key(KEY_ONE, pw, confirm)
            .await
            .unwrap_err();
        assert!(matches!(err, VaultError::PasswordMismatch));
    }
    assert!(store.is_empty());
}

#[tokio::test]
async fn control_characters_rejected_before_any_write() {
    let (vault, _listener, store) = build_vault(NullRandom::constant(one_key_bytes()));

    let err = vault
        .save_private_key(KEY_ONE, Some("pw\n"), Some("pw\n"))
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::PasswordContainsControlChars));
    assert!(store.is_empty());

    // Spaces are printable and allowed.
    vault
        .save_private_key(KEY_ONE, Some("pass phrase"), Some("pass phrase"))
        .await
        .unwrap();
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn get_unknown_address_is_not_found() {
    let (vault, _listener, _store) = build_vault(NullRandom::constant(one_key_bytes()));
    let err = vault.get_private_key(ADDR_ONE).await.unwrap_err();
    assert!(matches!(err, VaultError::KeyNotFound(_)));
    assert!(err.to_string().contains(ADDR_ONE));
}

#[tokio::test]
async fn get_accepts_any_checksum_valid_spelling() {
    let (vault, _listener, _store) = build_vault(NullRandom::constant(one_key_bytes()));
    vault.save_private_key(KEY_ONE, None, None).await.unwrap();

    let record = vault
        .get_private_key(&ADDR_ONE.to_lowercase())
        .await
        .unwrap();
    assert_eq!(record.value, KEY_ONE);
}

#[tokio::test]
async fn corrupt_record_is_an_integrity_error() {
    let (vault, _listener, store) = build_vault(NullRandom::constant(one_key_bytes()));
    store
        .set(&format!("PRIVATE_ETH_KEY#{ADDR_ONE}"), "{broken")
        .await
        .unwrap();

    let err = vault.get_private_key(ADDR_ONE).await.unwrap_err();
    assert!(matches!(err, VaultError::CorruptedRecord { .. }));
}

#[tokio::test]
async fn store_failure_propagates_unchanged() {
    let (vault, _listener, store) = build_vault(NullRandom::constant(one_key_bytes()));
    store.fail_with("disk on fire");

    let err = vault.save_private_key(KEY_ONE, None, None).await.unwrap_err();
    match err {
        VaultError::Store(StoreError::Backend(message)) => assert_eq!(message, "disk on fire"),
        other => panic!("expected backend error, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// 3. Enumeration and deletion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn all_key_pairs_spans_only_the_vault_namespace() {
    let (vault, _listener, store) = build_vault(NullRandom::constant(one_key_bytes()));
    vault.save_private_key(KEY_ONE, None, None).await.unwrap();
    vault
        .save_private_key(&letter_key(), Some("pw"), Some("pw"))
        .await
        .unwrap();
    store.set("SESSION#abc", "not a key").await.unwrap();

    let pairs = vault.all_key_pairs().await.unwrap();
    assert_eq!(pairs.len(), 2);

    let addr_one = address_of(KEY_ONE).unwrap();
    let addr_two = address_of(&letter_key()).unwrap();
    assert!(!pairs[&addr_one].encrypted);
    assert!(pairs[&addr_two].encrypted);
}

#[tokio::test]
async fn delete_removes_the_record() {
    let (vault, _listener, store) = build_vault(NullRandom::constant(one_key_bytes()));
    vault.save_private_key(KEY_ONE, None, None).await.unwrap();

    vault.delete_private_key(ADDR_ONE).await.unwrap();
    assert!(store.is_empty());
    assert!(matches!(
        vault.get_private_key(ADDR_ONE).await.unwrap_err(),
        VaultError::KeyNotFound(_)
    ));
}

#[tokio::test]
async fn delete_missing_is_not_found() {
    let (vault, _listener, _store) = build_vault(NullRandom::constant(one_key_bytes()));
    assert!(matches!(
        vault.delete_private_key(ADDR_ONE).await.unwrap_err(),
        VaultError::KeyNotFound(_)
    ));
}

#[tokio::test]
async fn destroy_drops_all_records() {
    let (vault, _listener, store) = build_vault(NullRandom::constant(one_key_bytes()));
    vault.save_private_key(KEY_ONE, None, None).await.unwrap();
    vault
        .save_private_key(&letter_key(), None, None)
        .await
        .unwrap();

    vault.destroy().await.unwrap();
    assert!(store.is_empty());
}

// ---------------------------------------------------------------------------
// 4. Confirmation-gated decryption
// ---------------------------------------------------------------------------

#[tokio::test]
async fn approved_decrypt_recovers_the_key() {
    let (vault, listener, _store) = build_vault(NullRandom::constant(one_key_bytes()));
    vault
        .save_private_key(KEY_ONE, Some("pw"), Some("pw"))
        .await
        .unwrap();
    let record = vault.get_private_key(ADDR_ONE).await.unwrap();

    approve_all(listener, "pw");
    let key = vault
        .decrypt_private_key(&record, "export to file", DECRYPT_TOPIC)
        .await
        .unwrap();
    assert_eq!(key, KEY_ONE);
}

#[tokio::test]
async fn plaintext_record_is_rejected_before_any_prompt() {
    let (vault, mut listener, _store) = build_vault(NullRandom::constant(one_key_bytes()));
    let record = StoredKeyRecord::plaintext(KEY_ONE);

    let err = vault
        .decrypt_private_key(&record, "export", DECRYPT_TOPIC)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::UnknownCipher(label) if label.is_empty()));
    assert!(listener.try_next_decrypt().is_none());
}

#[tokio::test]
async fn foreign_algorithm_is_rejected_before_any_prompt() {
    let (vault, mut listener, _store) = build_vault(NullRandom::constant(one_key_bytes()));
    let json = r#"{"encryption":"ROT13","value":"xyz","encrypted":true,"version":"1.0.0"}"#;
    let record: StoredKeyRecord = serde_json::from_str(json).unwrap();

    let err = vault
        .decrypt_private_key(&record, "export", DECRYPT_TOPIC)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::UnknownCipher(label) if label == "ROT13"));
    assert!(listener.try_next_decrypt().is_none());
}

#[tokio::test]
async fn wrong_password_is_distinct_from_abort() {
    let (vault, listener, _store) = build_vault(NullRandom::constant(one_key_bytes()));
    vault
        .save_private_key(KEY_ONE, Some("pw"), Some("pw"))
        .await
        .unwrap();
    let record = vault.get_private_key(ADDR_ONE).await.unwrap();

    approve_all(listener, "not the password");
    let err = vault
        .decrypt_private_key(&record, "export", DECRYPT_TOPIC)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::WrongPassword));
}

#[tokio::test]
async fn aborted_decrypt_reports_abort() {
    let (vault, listener, _store) = build_vault(NullRandom::constant(one_key_bytes()));
    vault
        .save_private_key(KEY_ONE, Some("pw"), Some("pw"))
        .await
        .unwrap();
    let record = vault.get_private_key(ADDR_ONE).await.unwrap();

    abort_all(listener);
    let err = vault
        .decrypt_private_key(&record, "export", DECRYPT_TOPIC)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::DecryptionAborted));
}

#[tokio::test]
async fn dropped_prompt_counts_as_abort() {
    let (vault, mut listener, _store) = build_vault(NullRandom::constant(one_key_bytes()));
    vault
        .save_private_key(KEY_ONE, Some("pw"), Some("pw"))
        .await
        .unwrap();
    let record = vault.get_private_key(ADDR_ONE).await.unwrap();

    let dropper = async {
        let prompt = listener.next_decrypt().await.unwrap();
        drop(prompt);
    };
    let (result, ()) = tokio::join!(
        vault.decrypt_private_key(&record, "export", DECRYPT_TOPIC),
        dropper
    );
    assert!(matches!(result.unwrap_err(), VaultError::DecryptionAborted));
}

#[tokio::test]
async fn decrypted_garbage_is_not_a_key() {
    let (vault, listener, _store) = build_vault(NullRandom::constant(one_key_bytes()));
    let blob = NullCipher.encrypt("definitely not hex", "pw").unwrap();
    let record = StoredKeyRecord::enciphered(EncryptionKind::Aes256, blob);

    approve_all(listener, "pw");
    let err = vault
        .decrypt_private_key(&record, "export", DECRYPT_TOPIC)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::DecryptedNotAKey));
}

#[tokio::test]
async fn missing_listener_is_unavailable() {
    let (vault, listener, _store) = build_vault(NullRandom::constant(one_key_bytes()));
    vault
        .save_private_key(KEY_ONE, Some("pw"), Some("pw"))
        .await
        .unwrap();
    let record = vault.get_private_key(ADDR_ONE).await.unwrap();

    drop(listener);
    let err = vault
        .decrypt_private_key(&record, "export", DECRYPT_TOPIC)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::ConfirmerUnavailable));
}

#[tokio::test]
async fn concurrent_decrypts_resolve_out_of_order() {
    let (vault, mut listener, _store) = build_vault(NullRandom::constant(one_key_bytes()));
    vault
        .save_private_key(KEY_ONE, Some("pw"), Some("pw"))
        .await
        .unwrap();
    vault
        .save_private_key(&letter_key(), Some("pw"), Some("pw"))
        .await
        .unwrap();

    let record_one = vault.get_private_key(ADDR_ONE).await.unwrap();
    let addr_two = address_of(&letter_key()).unwrap();
    let record_two = vault.get_private_key(addr_two.as_str()).await.unwrap();

    let driver = async {
        let mut first = listener.next_decrypt().await.unwrap();
        let mut second = listener.next_decrypt().await.unwrap();
        // Resolve in reverse publication order.
        second.approve("pw");
        first.approve("pw");
    };
    let (one, two, ()) = tokio::join!(
        vault.decrypt_private_key(&record_one, "first", DECRYPT_TOPIC),
        vault.decrypt_private_key(&record_two, "second", DECRYPT_TOPIC),
        driver
    );
    assert_eq!(one.unwrap(), KEY_ONE);
    assert_eq!(two.unwrap(), letter_key());
}

// ---------------------------------------------------------------------------
// 5. Confirmation-gated signing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_key_fails_without_publishing_a_prompt() {
    let (vault, mut listener, _store) = build_vault(NullRandom::constant(one_key_bytes()));

    let err = vault.sign_tx(sample_tx(), "zz").await.unwrap_err();
    assert!(matches!(
        err,
        VaultError::Codec(CodecError::InvalidPrivateKey)
    ));
    assert!(listener.try_next_sign().is_none());
}

#[tokio::test]
async fn confirmed_signature_is_deterministic_and_recoverable() {
    let (vault, listener, _store) = build_vault(NullRandom::constant(one_key_bytes()));
    approve_all(listener, "pw");

    let first = vault.sign_tx(sample_tx(), KEY_ONE).await.unwrap();
    let second = vault.sign_tx(sample_tx(), KEY_ONE).await.unwrap();
    assert_eq!(first.raw_hex(), second.raw_hex());
    assert!(first.raw_hex().starts_with("0xf8"));

    let tx = sample_tx();
    let legacy = TxLegacy {
        chain_id: tx.chain_id,
        nonce: tx.nonce,
        gas_price: tx.gas_price,
        gas_limit: tx.gas_limit,
        to: TxKind::Call(tx.to.unwrap()),
        value: tx.value,
        input: tx.data,
    };
    let recovered = first
        .signature()
        .recover_address_from_prehash(&legacy.signature_hash())
        .unwrap();
    assert_eq!(recovered.to_checksum(None), ADDR_ONE);
}

#[tokio::test]
async fn sign_prompt_carries_the_transaction_fields() {
    let (vault, mut listener, _store) = build_vault(NullRandom::constant(one_key_bytes()));

    let driver = async {
        let mut prompt = listener.next_sign().await.unwrap();
        assert_eq!(prompt.tx_data().nonce, 3);
        assert_eq!(prompt.tx_data().gas_limit, 21_000);
        prompt.confirm();
    };
    let (signed, ()) = tokio::join!(vault.sign_tx(sample_tx(), KEY_ONE), driver);
    assert!(signed.is_ok());
}

#[tokio::test]
async fn aborted_signing_reports_abort() {
    let (vault, listener, _store) = build_vault(NullRandom::constant(one_key_bytes()));
    abort_all(listener);

    let err = vault.sign_tx(sample_tx(), KEY_ONE).await.unwrap_err();
    assert!(matches!(err, VaultError::SigningAborted));
}

#[tokio::test]
async fn dropped_sign_prompt_counts_as_abort() {
    let (vault, mut listener, _store) = build_vault(NullRandom::constant(one_key_bytes()));

    let dropper = async {
        let prompt = listener.next_sign().await.unwrap();
        drop(prompt);
    };
    let (result, ()) = tokio::join!(vault.sign_tx(sample_tx(), KEY_ONE), dropper);
    assert!(matches!(result.unwrap_err(), VaultError::SigningAborted));
}

#[tokio::test]
async fn sign_topic_constant_matches_wire_name() {
    // The topics are part of the external contract.
    assert_eq!(DECRYPT_TOPIC, "eth:decrypt-private-key");
    assert_eq!(SIGN_TOPIC, "eth:tx:sign");
}

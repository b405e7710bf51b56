use proptest::prelude::*;

use ethvault_types::{
    address_from_storage_key, storage_key, AccountAddress, EncryptionKind, StoredKeyRecord,
    STORAGE_KEY_PREFIX,
};

proptest! {
    /// storage_key always starts with the namespace prefix and strips back to the address.
    #[test]
    fn storage_key_roundtrip(digits in "[0-9a-fA-F]{40}") {
        let addr = AccountAddress::new(format!("0x{digits}"));
        let key = storage_key(&addr);
        prop_assert!(key.starts_with(STORAGE_KEY_PREFIX));
        prop_assert_eq!(address_from_storage_key(&key), Some(addr.as_str()));
    }

    /// Keys outside the vault namespace never yield an address.
    #[test]
    fn foreign_keys_do_not_parse(key in "[A-Z_]{1,16}#[0-9a-f]{0,40}") {
        prop_assume!(!key.starts_with(STORAGE_KEY_PREFIX));
        prop_assert_eq!(address_from_storage_key(&key), None);
    }

    /// Plaintext records roundtrip through JSON unchanged.
    #[test]
    fn plaintext_record_json_roundtrip(value in "[0-9a-f]{64}") {
        let record = StoredKeyRecord::plaintext(value);
        let json = serde_json::to_string(&record).unwrap();
        let back: StoredKeyRecord = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, record);
    }

    /// Encrypted records roundtrip through JSON unchanged.
    #[test]
    fn encrypted_record_json_roundtrip(blob in "[0-9a-f]{2,256}") {
        let record = StoredKeyRecord::enciphered(EncryptionKind::Aes256, blob);
        let json = serde_json::to_string(&record).unwrap();
        let back: StoredKeyRecord = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, record);
    }

    /// Unknown algorithm labels survive a JSON roundtrip as Other.
    #[test]
    fn unknown_label_json_roundtrip(label in "[A-Z][A-Z0-9-]{1,15}") {
        prop_assume!(label != "AES-256");
        let kind = EncryptionKind::Other(label.clone());
        let json = serde_json::to_string(&kind).unwrap();
        let back: EncryptionKind = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, EncryptionKind::Other(label));
    }

    /// Constructor-built records always satisfy the flag/label invariant.
    #[test]
    fn constructed_records_are_consistent(value in ".{0,64}", use_cipher in any::<bool>()) {
        let record = if use_cipher {
            StoredKeyRecord::enciphered(EncryptionKind::Aes256, value)
        } else {
            StoredKeyRecord::plaintext(value)
        };
        prop_assert!(record.is_consistent());
    }
}

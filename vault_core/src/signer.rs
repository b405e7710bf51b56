//! Legacy transaction signing.
//!
//! Builds an RLP legacy transaction from [`TxData`], signs its hash with
//! deterministic ECDSA over secp256k1 and returns the broadcast-ready
//! encoding. Signing is pure: the same key and fields always produce the
//! same bytes.

use alloy_consensus::{SignableTransaction, TxLegacy};
use alloy_primitives::{Signature, TxKind, B256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use ethvault_codec::CodecError;
use ethvault_types::{PrivateKeyBytes, TxData};

use crate::error::VaultError;

/// A signed legacy transaction, ready for broadcast.
#[derive(Clone, Debug)]
pub struct SignedTransaction {
    raw: Vec<u8>,
    hash: B256,
    signature: Signature,
}

impl SignedTransaction {
    /// RLP encoding of the signed transaction.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// RLP encoding as a `0x`-prefixed hex string.
    pub fn raw_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.raw))
    }

    /// Keccak-256 hash of the signed encoding, the future transaction id.
    pub fn hash(&self) -> B256 {
        self.hash
    }

    /// The ECDSA signature, recovery id included.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}

/// Signs `tx` with `key` and returns the encoded result.
///
/// With `chain_id: None` the recovery id is encoded pre-EIP-155 as
/// v = 27 or 28; with a chain id it folds into v per EIP-155.
pub(crate) fn sign_transaction(
    tx: &TxData,
    key: &PrivateKeyBytes,
) -> Result<SignedTransaction, VaultError> {
    let signer = PrivateKeySigner::from_slice(key.as_bytes())
        .map_err(|_| VaultError::Codec(CodecError::InvalidPrivateKey))?;

    let legacy = TxLegacy {
        chain_id: tx.chain_id,
        nonce: tx.nonce,
        gas_price: tx.gas_price,
        gas_limit: tx.gas_limit,
        to: match tx.to {
            Some(address) => TxKind::Call(address),
            None => TxKind::Create,
        },
        value: tx.value,
        input: tx.data.clone(),
    };

    let signature = signer
        .sign_hash_sync(&legacy.signature_hash())
        .map_err(|e| VaultError::Signing(e.to_string()))?;
    let signed = legacy.into_signed(signature);

    let mut raw = Vec::new();
    signed.rlp_encode(&mut raw);

    Ok(SignedTransaction {
        raw,
        hash: *signed.hash(),
        signature: *signed.signature(),
    })
}

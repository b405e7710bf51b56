//! Legacy transaction fields accepted by the signer.

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// The caller-supplied fields of a legacy (pre-typed) Ethereum transaction.
///
/// `to: None` is a contract creation. `chain_id: None` selects pre-EIP-155
/// signing, with the recovery id encoded as v = 27 or 28.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxData {
    pub nonce: u64,
    pub gas_price: u128,
    pub gas_limit: u64,
    pub to: Option<Address>,
    pub value: U256,
    #[serde(default)]
    pub data: Bytes,
    #[serde(default)]
    pub chain_id: Option<u64>,
}

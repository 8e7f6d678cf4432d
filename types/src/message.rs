use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::{Address, Bytes, TxHash, U256};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
pub enum MessageDirection {
    L1ToL2,
    #[default]
    L2ToL1,
}

/// Envelope of a message relayed between the two chains' cross-domain messengers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossDomainMessage {
    pub direction: MessageDirection,
    pub sender: Address,
    pub target: Address,
    pub message_nonce: U256,
    pub value: U256,
    pub min_gas_limit: U256,
    /// Call data executed on `target`.
    pub message: Bytes,
    /// Receipt coordinates of the initiating L2 transaction. Left zeroed when unknown.
    pub log_index: u64,
    pub block_number: u64,
    pub transaction_hash: TxHash,
}

impl CrossDomainMessage {
    /// Version encoded in the two most significant bytes of the nonce.
    pub fn version(&self) -> u16 {
        (self.message_nonce >> 240usize).to::<u16>()
    }
}

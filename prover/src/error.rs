use std::time::Duration;

use alloy::signers::local::LocalSignerError;
use alloy::transports::TransportError;
use strum::Display;
use withdrawer_types::rpc::ErrorKind;
use withdrawer_types::{Hash, TxHash};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Chain {
    L1,
    L2,
}

#[derive(Debug, thiserror::Error)]
pub enum ProofError {
    #[error("invalid private key")]
    InvalidPrivateKey(#[source] LocalSignerError),
    #[error("{chain} RPC request failed: {details}")]
    Network { chain: Chain, details: String },
    #[error("{chain} RPC serves chain {actual}, expected chain {expected}")]
    ChainMismatch {
        chain: Chain,
        expected: u64,
        actual: u64,
    },
    #[error("contract call failed: {0}")]
    Contract(String),
    #[error("unsupported cross-domain message version {0}")]
    UnsupportedMessageVersion(u16),
    #[error("no dispute game of type {0} has been created")]
    NoDisputeGame(u32),
    #[error("withdrawal {withdrawal_hash} is not in the message passer at L2 block {l2_block}")]
    WithdrawalNotSent { withdrawal_hash: Hash, l2_block: u64 },
    #[error("transaction {0} reverted")]
    Reverted(TxHash),
    #[error("transaction {tx_hash} was not confirmed within {timeout:?}")]
    ConfirmationTimeout { tx_hash: TxHash, timeout: Duration },
}

impl ProofError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPrivateKey(_) | Self::ChainMismatch { .. } => ErrorKind::ValidationError,
            Self::Network { .. } => ErrorKind::NetworkError,
            Self::ConfirmationTimeout { .. } => ErrorKind::ConfirmationTimeout,
            Self::Contract(_)
            | Self::UnsupportedMessageVersion(_)
            | Self::NoDisputeGame(_)
            | Self::WithdrawalNotSent { .. }
            | Self::Reverted(_) => ErrorKind::ContractError,
        }
    }

    /// An error response from the node means the request reached it and was refused,
    /// usually an `eth_estimateGas` revert.
    pub(crate) fn rpc(chain: Chain, err: TransportError) -> Self {
        if err.is_error_resp() {
            Self::Contract(err.to_string())
        } else {
            Self::Network {
                chain,
                details: err.to_string(),
            }
        }
    }

    pub(crate) fn contract(chain: Chain, err: alloy::contract::Error) -> Self {
        match err {
            alloy::contract::Error::TransportError(err) => Self::rpc(chain, err),
            other => Self::Contract(other.to_string()),
        }
    }

    pub(crate) fn timeout(chain: Chain, timeout: Duration) -> Self {
        Self::Network {
            chain,
            details: format!("no response within {timeout:?}"),
        }
    }
}

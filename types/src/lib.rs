pub mod message;
pub mod predeploys;
pub mod record;
pub mod rpc;

pub use alloy::primitives::{Address, Bytes, TxHash, U256};

/// Withdrawal identifier, the primary key of the withdrawal index.
pub type Hash = alloy::primitives::B256;

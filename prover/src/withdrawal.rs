//! Derivation of the low-level withdrawal the L2 messenger passed to `L2ToL1MessagePasser`.

use alloy::primitives::keccak256;
use alloy::sol_types::{SolCall, SolValue};
use withdrawer_types::message::CrossDomainMessage;
use withdrawer_types::{predeploys, Address, Hash, U256};

use crate::bindings::{ICrossDomainMessenger, IL1StandardBridge, WithdrawalTransaction};
use crate::ProofError;

const RELAY_CONSTANT_OVERHEAD: u64 = 200_000;
const RELAY_CALL_OVERHEAD: u64 = 40_000;
const RELAY_RESERVED_GAS: u64 = 40_000;
const RELAY_GAS_CHECK_BUFFER: u64 = 5_000;
const MIN_GAS_DYNAMIC_OVERHEAD_NUMERATOR: u64 = 64;
const MIN_GAS_DYNAMIC_OVERHEAD_DENOMINATOR: u64 = 63;
const MIN_GAS_CALLDATA_OVERHEAD: u64 = 16;
const FLOOR_CALLDATA_OVERHEAD: u64 = 40;
const ENCODING_OVERHEAD: u64 = 260;
const TX_BASE_GAS: u64 = 21_000;

const MIGRATED_GAS_PER_BYTE: u64 = 16;
const MIGRATED_OVERHEAD: u64 = 1_000_000;
const MIGRATED_GOERLI_OVERHEAD: u64 = 200_000;
const MIGRATED_GAS_CAP: u64 = 25_000_000;
const GOERLI_CHAIN_ID: u64 = 420;

/// Gas limit the L2 messenger attaches to a message, mirroring `CrossDomainMessenger.baseGas`.
pub fn base_gas(message: &[u8], min_gas_limit: u64) -> u64 {
    let execution_gas = RELAY_CONSTANT_OVERHEAD
        + RELAY_CALL_OVERHEAD
        + RELAY_RESERVED_GAS
        + RELAY_GAS_CHECK_BUFFER
        + min_gas_limit * MIN_GAS_DYNAMIC_OVERHEAD_NUMERATOR
            / MIN_GAS_DYNAMIC_OVERHEAD_DENOMINATOR;
    let message_size = message.len() as u64 + ENCODING_OVERHEAD;
    TX_BASE_GAS
        + (execution_gas + message_size * MIN_GAS_CALLDATA_OVERHEAD)
            .max(message_size * FLOOR_CALLDATA_OVERHEAD)
}

/// Gas limit the Bedrock migration gave to pre-Bedrock withdrawals: a per-byte upper bound on
/// the relay call data plus a chain dependent overhead.
pub fn migrated_gas_limit(data: &[u8], l2_chain_id: u64) -> u64 {
    let overhead = if l2_chain_id == GOERLI_CHAIN_ID {
        MIGRATED_GOERLI_OVERHEAD
    } else {
        MIGRATED_OVERHEAD
    };
    (data.len() as u64 * MIGRATED_GAS_PER_BYTE + overhead).min(MIGRATED_GAS_CAP)
}

/// ETH carried by a message. Bridge messages finalizing an ETH withdrawal move `amount`,
/// even when the envelope leaves the value unset.
fn relayed_value(message: &CrossDomainMessage) -> U256 {
    if !message.value.is_zero() || message.sender != predeploys::L2_STANDARD_BRIDGE {
        return message.value;
    }
    IL1StandardBridge::finalizeETHWithdrawalCall::abi_decode(&message.message)
        .map(|call| call.amount)
        .unwrap_or(message.value)
}

/// Builds the withdrawal committed on L2 for a message sent by the L2 messenger.
///
/// Version 0 nonces belong to pre-Bedrock withdrawals, which were rewritten into the
/// `L2ToL1MessagePasser` during the migration with a zero relay gas limit and a
/// migrated outer gas limit.
pub fn low_level_withdrawal(
    message: &CrossDomainMessage,
    l1_messenger: Address,
    l2_chain_id: u64,
) -> Result<WithdrawalTransaction, ProofError> {
    let version = message.version();
    if version > 1 {
        return Err(ProofError::UnsupportedMessageVersion(version));
    }
    let value = relayed_value(message);
    let min_gas_limit = if version == 0 {
        U256::ZERO
    } else {
        message.min_gas_limit
    };

    let data = ICrossDomainMessenger::relayMessageCall {
        nonce: message.message_nonce,
        sender: message.sender,
        target: message.target,
        value,
        minGasLimit: min_gas_limit,
        message: message.message.clone(),
    }
    .abi_encode();

    let gas_limit = if version == 0 {
        migrated_gas_limit(&data, l2_chain_id)
    } else {
        // The messenger takes a uint32, anything larger could not have been sent.
        base_gas(&message.message, message.min_gas_limit.saturating_to::<u32>().into())
    };

    Ok(WithdrawalTransaction {
        nonce: message.message_nonce,
        sender: predeploys::L2_CROSS_DOMAIN_MESSENGER,
        target: l1_messenger,
        value,
        gasLimit: U256::from(gas_limit),
        data: data.into(),
    })
}

/// `keccak256(abi.encode(nonce, sender, target, value, gasLimit, data))`
pub fn withdrawal_hash(tx: &WithdrawalTransaction) -> Hash {
    let encoded = (
        tx.nonce,
        tx.sender,
        tx.target,
        tx.value,
        tx.gasLimit,
        tx.data.clone(),
    )
        .abi_encode_params();
    keccak256(encoded)
}

/// Slot of `sentMessages[withdrawal_hash]` in `L2ToL1MessagePasser`, the mapping lives at slot 0.
pub fn storage_slot(withdrawal_hash: Hash) -> Hash {
    let mut key = [0u8; 64];
    key[..32].copy_from_slice(withdrawal_hash.as_slice());
    keccak256(key)
}

/// L2 block number a dispute game's output root is claimed at, the first word of its extra data.
pub fn game_l2_block(extra_data: &[u8]) -> Option<u64> {
    let word = extra_data.get(..32)?;
    U256::from_be_slice(word).try_into().ok()
}

mod config;

pub use config::PayloadBuilderConfig;

use alloy::sol;
use alloy::sol_types::SolCall;
use tracing::debug;
use withdrawer_types::message::{CrossDomainMessage, MessageDirection};
use withdrawer_types::record::{
    GenericMessage, ShapeError, TokenTransfer, WithdrawalKind, WithdrawalRecord,
};
use withdrawer_types::{Address, Bytes, Hash, TxHash, U256};

sol! {
    /// Finalization entry points the L2 standard bridge relays to.
    interface IL1StandardBridge {
        function finalizeETHWithdrawal(
            address from,
            address to,
            uint256 amount,
            bytes extraData
        ) external payable;

        function finalizeERC20Withdrawal(
            address l1Token,
            address l2Token,
            address from,
            address to,
            uint256 amount,
            bytes extraData
        ) external;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("withdrawal {hash} has an unsupported shape: {reason}")]
    UnsupportedRecordShape { hash: Hash, reason: ShapeError },
}

/// Turns withdrawal records into the cross-domain message relayed to L1.
#[derive(Clone, Debug, Default)]
pub struct MessagePayloadBuilder {
    cfg: PayloadBuilderConfig,
}

impl MessagePayloadBuilder {
    pub fn new(cfg: PayloadBuilderConfig) -> Self {
        Self { cfg }
    }

    pub fn build(&self, record: &WithdrawalRecord) -> Result<CrossDomainMessage, PayloadError> {
        let message = match &record.kind {
            WithdrawalKind::TokenTransfer(transfer) => self.token_transfer(transfer),
            WithdrawalKind::GenericMessage(message) => generic_message(message),
            WithdrawalKind::Unsupported(reason) => {
                return Err(PayloadError::UnsupportedRecordShape {
                    hash: record.hash,
                    reason: reason.clone(),
                })
            }
        };
        debug!(
            hash = %record.hash,
            kind = <&'static str>::from(&record.kind),
            sender = %message.sender,
            target = %message.target,
            "Built cross-domain message"
        );
        Ok(message)
    }

    fn token_transfer(&self, transfer: &TokenTransfer) -> CrossDomainMessage {
        let data = if transfer.is_native() {
            IL1StandardBridge::finalizeETHWithdrawalCall {
                from: transfer.from,
                to: transfer.to,
                amount: transfer.amount,
                extraData: transfer.extra_data.clone(),
            }
            .abi_encode()
        } else {
            IL1StandardBridge::finalizeERC20WithdrawalCall {
                l1Token: transfer.l1_token,
                l2Token: transfer.l2_token,
                from: transfer.from,
                to: transfer.to,
                amount: transfer.amount,
                extraData: transfer.extra_data.clone(),
            }
            .abi_encode()
        };

        envelope(
            self.cfg.l2_standard_bridge,
            self.cfg.l1_standard_bridge,
            transfer.message_nonce,
            data.into(),
        )
    }
}

fn generic_message(message: &GenericMessage) -> CrossDomainMessage {
    envelope(
        message.sender,
        message.target,
        message.message_nonce,
        message.message.clone(),
    )
}

/// Value, gas limit and receipt coordinates are not part of the record and stay zero.
fn envelope(
    sender: Address,
    target: Address,
    message_nonce: U256,
    message: Bytes,
) -> CrossDomainMessage {
    CrossDomainMessage {
        direction: MessageDirection::L2ToL1,
        sender,
        target,
        message_nonce,
        value: U256::ZERO,
        min_gas_limit: U256::ZERO,
        message,
        log_index: 0,
        block_number: 0,
        transaction_hash: TxHash::ZERO,
    }
}

use std::future::Future;
use std::time::Duration;

use alloy::eips::{BlockId, BlockNumberOrTag};
use alloy::network::{EthereumWallet, ReceiptResponse};
use alloy::providers::{PendingTransactionError, Provider, ProviderBuilder, WatchTxError};
use alloy::signers::local::PrivateKeySigner;
use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::{debug, info, instrument, warn};
use withdrawer_types::predeploys;
use withdrawer_types::rpc::ProofReceipt;
use withdrawer_types::U256;

use crate::bindings::{IDisputeGameFactory, IOptimismPortal2, OutputRootProof};
use crate::error::Chain;
use crate::withdrawal::{game_l2_block, low_level_withdrawal, storage_slot, withdrawal_hash};
use crate::{ProofError, ProofRequest, ProverConfig, WithdrawalProver};

const PROVEN_MESSAGE: &str = "Withdrawal proven successfully";

/// Proves withdrawals against an `OptimismPortal2` deployment with a local signer.
#[derive(Clone, Debug, Default)]
pub struct ProofSubmitter {
    cfg: ProverConfig,
}

impl ProofSubmitter {
    pub fn new(cfg: ProverConfig) -> Self {
        Self { cfg }
    }

    #[instrument(skip_all, fields(sender = %request.message.sender, target = %request.message.target))]
    pub async fn submit(&self, request: ProofRequest) -> Result<ProofReceipt, ProofError> {
        let signer: PrivateKeySigner = request
            .private_key
            .parse()
            .map_err(ProofError::InvalidPrivateKey)?;
        let prover_address = signer.address();

        let l1 = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(request.l1_rpc_url.clone());
        let l2 = ProviderBuilder::new().connect_http(request.l2_rpc_url.clone());

        let l1_chain_id = self
            .bounded(Chain::L1, async {
                l1.get_chain_id()
                    .await
                    .map_err(|err| ProofError::rpc(Chain::L1, err))
            })
            .await?;
        let l2_chain_id = self
            .bounded(Chain::L2, async {
                l2.get_chain_id()
                    .await
                    .map_err(|err| ProofError::rpc(Chain::L2, err))
            })
            .await?;
        check_chain(Chain::L1, self.cfg.l1_chain_id, l1_chain_id)?;
        check_chain(Chain::L2, self.cfg.l2_chain_id, l2_chain_id)?;
        debug!(l1_chain_id, l2_chain_id, %prover_address, "Connected to both chains");

        let tx = low_level_withdrawal(
            &request.message,
            self.cfg.l1_cross_domain_messenger,
            l2_chain_id,
        )?;
        let withdrawal_hash = withdrawal_hash(&tx);
        info!(%withdrawal_hash, nonce = %tx.nonce, "Proving withdrawal");

        let portal = IOptimismPortal2::new(self.cfg.optimism_portal, &l1);
        let l1_call = |err| ProofError::contract(Chain::L1, err);

        let game_type = self
            .bounded(Chain::L1, async {
                portal.respectedGameType().call().await.map_err(l1_call)
            })
            .await?;
        let factory_address = self
            .bounded(Chain::L1, async {
                portal.disputeGameFactory().call().await.map_err(l1_call)
            })
            .await?;
        let factory = IDisputeGameFactory::new(factory_address, &l1);

        let game_count = self
            .bounded(Chain::L1, async {
                factory.gameCount().call().await.map_err(l1_call)
            })
            .await?;
        if game_count.is_zero() {
            return Err(ProofError::NoDisputeGame(game_type));
        }
        let games = self
            .bounded(Chain::L1, async {
                factory
                    .findLatestGames(game_type, game_count - U256::from(1), U256::from(1))
                    .call()
                    .await
                    .map_err(l1_call)
            })
            .await?;
        let game = games
            .into_iter()
            .next()
            .ok_or(ProofError::NoDisputeGame(game_type))?;
        let l2_block = game_l2_block(&game.extraData).ok_or_else(|| {
            ProofError::Contract(format!(
                "dispute game {} has malformed extra data {}",
                game.index, game.extraData
            ))
        })?;
        debug!(game_type, game_index = %game.index, l2_block, "Found latest dispute game");

        let block = self
            .bounded(Chain::L2, async {
                l2.get_block_by_number(BlockNumberOrTag::Number(l2_block))
                    .await
                    .map_err(|err| ProofError::rpc(Chain::L2, err))
            })
            .await?
            .ok_or_else(|| ProofError::Network {
                chain: Chain::L2,
                details: format!("block {l2_block} is not available"),
            })?;
        let proof = self
            .bounded(Chain::L2, async {
                l2.get_proof(
                    predeploys::L2_TO_L1_MESSAGE_PASSER,
                    vec![storage_slot(withdrawal_hash)],
                )
                .block_id(BlockId::number(l2_block))
                .await
                .map_err(|err| ProofError::rpc(Chain::L2, err))
            })
            .await?;

        let Some(storage_proof) = proof.storage_proof.into_iter().next() else {
            return Err(ProofError::Contract(
                "eth_getProof returned no storage proof".to_string(),
            ));
        };
        if storage_proof.value.is_zero() {
            return Err(ProofError::WithdrawalNotSent {
                withdrawal_hash,
                l2_block,
            });
        }

        let output_root_proof = OutputRootProof {
            version: Default::default(),
            stateRoot: block.header.state_root,
            messagePasserStorageRoot: proof.storage_hash,
            latestBlockhash: block.header.hash,
        };

        let pending = self
            .bounded(Chain::L1, async {
                portal
                    .proveWithdrawalTransaction(
                        tx,
                        game.index,
                        output_root_proof,
                        storage_proof.proof,
                    )
                    .send()
                    .await
                    .map_err(l1_call)
            })
            .await?;
        let tx_hash = *pending.tx_hash();
        info!(%tx_hash, "Submitted withdrawal proof");

        let timeout = self.cfg.confirmation_timeout;
        let receipt = pending
            .with_timeout(Some(timeout))
            .get_receipt()
            .await
            .map_err(|err| match err {
                PendingTransactionError::TxWatcher(WatchTxError::Timeout) => {
                    ProofError::ConfirmationTimeout { tx_hash, timeout }
                }
                PendingTransactionError::TransportError(err) => ProofError::rpc(Chain::L1, err),
                other => ProofError::Network {
                    chain: Chain::L1,
                    details: other.to_string(),
                },
            })?;
        if !receipt.status() {
            warn!(%tx_hash, "Withdrawal proof reverted");
            return Err(ProofError::Reverted(tx_hash));
        }
        info!(%tx_hash, %withdrawal_hash, "Withdrawal proven");

        Ok(ProofReceipt {
            transaction_hash: tx_hash,
            withdrawal_hash,
            message: PROVEN_MESSAGE.to_string(),
        })
    }

    async fn bounded<T>(
        &self,
        chain: Chain,
        step: impl Future<Output = Result<T, ProofError>>,
    ) -> Result<T, ProofError> {
        bounded(self.cfg.rpc_timeout, chain, step).await
    }
}

impl WithdrawalProver for ProofSubmitter {
    fn prove(&self, request: ProofRequest) -> BoxFuture<'_, Result<ProofReceipt, ProofError>> {
        self.submit(request).boxed()
    }
}

fn check_chain(chain: Chain, expected: u64, actual: u64) -> Result<(), ProofError> {
    if expected == actual {
        return Ok(());
    }
    Err(ProofError::ChainMismatch {
        chain,
        expected,
        actual,
    })
}

async fn bounded<T>(
    timeout: Duration,
    chain: Chain,
    step: impl Future<Output = Result<T, ProofError>>,
) -> Result<T, ProofError> {
    tokio::time::timeout(timeout, step)
        .await
        .map_err(|_| ProofError::timeout(chain, timeout))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bounded_step_times_out() {
        let step = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        };
        let err = bounded(Duration::from_millis(10), Chain::L2, step)
            .await
            .unwrap_err();
        assert!(matches!(err, ProofError::Network { chain: Chain::L2, .. }));
    }

    #[test]
    fn test_check_chain() {
        assert!(check_chain(Chain::L1, 1, 1).is_ok());
        assert!(matches!(
            check_chain(Chain::L2, 10, 8453),
            Err(ProofError::ChainMismatch {
                chain: Chain::L2,
                expected: 10,
                actual: 8453,
            })
        ));
    }

    #[tokio::test]
    async fn test_bounded_step_passes_result() {
        let value = bounded(Duration::from_secs(1), Chain::L1, async { Ok(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }
}

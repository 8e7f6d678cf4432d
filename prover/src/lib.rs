//! Submits withdrawal proofs to the L1 `OptimismPortal2`.

pub mod bindings;
mod config;
mod error;
mod submitter;
pub mod withdrawal;

use std::fmt::{self, Debug, Formatter};

use futures::future::BoxFuture;
use url::Url;
use withdrawer_types::message::CrossDomainMessage;
use withdrawer_types::rpc::ProofReceipt;

pub use config::ProverConfig;
pub use error::{Chain, ProofError};
pub use submitter::ProofSubmitter;

/// Everything needed to prove one withdrawal.
#[derive(Clone)]
pub struct ProofRequest {
    pub message: CrossDomainMessage,
    pub l1_rpc_url: Url,
    pub l2_rpc_url: Url,
    pub private_key: String,
}

impl Debug for ProofRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProofRequest")
            .field("message", &self.message)
            .field("l1_rpc_url", &self.l1_rpc_url)
            .field("l2_rpc_url", &self.l2_rpc_url)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

pub trait WithdrawalProver: Send + Sync {
    fn prove(&self, request: ProofRequest) -> BoxFuture<'_, Result<ProofReceipt, ProofError>>;
}

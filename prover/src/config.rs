use std::time::Duration;

use serde::{Deserialize, Serialize};
use withdrawer_types::{predeploys, Address};

#[serde_with::serde_as]
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProverConfig {
    /// Chain ids the contract addresses below are deployed for. Both RPC endpoints must match.
    pub l1_chain_id: u64,
    pub l2_chain_id: u64,
    /// Target of every low-level withdrawal relayed by the L2 messenger.
    pub l1_cross_domain_messenger: Address,
    pub optimism_portal: Address,
    /// Bound on each RPC round trip made before the proof is submitted.
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub rpc_timeout: Duration,
    /// Bound on waiting for the proof transaction to be included.
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub confirmation_timeout: Duration,
}

impl Default for ProverConfig {
    fn default() -> Self {
        Self {
            l1_chain_id: 1,
            l2_chain_id: 10,
            l1_cross_domain_messenger: predeploys::MAINNET_L1_CROSS_DOMAIN_MESSENGER,
            optimism_portal: predeploys::MAINNET_OPTIMISM_PORTAL,
            rpc_timeout: Duration::from_secs(30),
            confirmation_timeout: Duration::from_secs(300),
        }
    }
}

use serde::{Deserialize, Serialize};
use withdrawer_types::{predeploys, Address};

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PayloadBuilderConfig {
    /// Receives the relayed bridge call on L1.
    pub l1_standard_bridge: Address,
    /// Sends the bridge call on L2.
    pub l2_standard_bridge: Address,
}

impl Default for PayloadBuilderConfig {
    fn default() -> Self {
        Self {
            l1_standard_bridge: predeploys::MAINNET_L1_STANDARD_BRIDGE,
            l2_standard_bridge: predeploys::L2_STANDARD_BRIDGE,
        }
    }
}

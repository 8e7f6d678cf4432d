//! Well-known OP Stack addresses.
//!
//! L2 predeploys are identical on every OP Stack chain. L1 addresses are the OP Mainnet
//! deployment and only serve as configuration defaults.

use alloy::primitives::{address, Address};

/// The L2 contract `L2ToL1MessagePasser`, stores commitments to withdrawal transactions.
pub const L2_TO_L1_MESSAGE_PASSER: Address = address!("4200000000000000000000000000000000000016");

/// The L2 contract `L2CrossDomainMessenger`.
pub const L2_CROSS_DOMAIN_MESSENGER: Address =
    address!("4200000000000000000000000000000000000007");

/// The L2 contract `L2StandardBridge`.
pub const L2_STANDARD_BRIDGE: Address = address!("4200000000000000000000000000000000000010");

/// Wrapped native asset predeploy. Paired with the zero L1 token it marks an ETH withdrawal.
pub const WETH: Address = address!("4200000000000000000000000000000000000006");

pub const MAINNET_L1_STANDARD_BRIDGE: Address =
    address!("99c9fc46f92e8a1c0dec1b1747d010903e884be1");

pub const MAINNET_L1_CROSS_DOMAIN_MESSENGER: Address =
    address!("25ace71c97b33cc4729cf772ae268934f7ab5fa1");

pub const MAINNET_OPTIMISM_PORTAL: Address = address!("beb5fc579115071764c7423a4f12edde41f106ed");

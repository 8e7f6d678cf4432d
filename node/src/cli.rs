use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use clap::Parser;
use withdrawer_index::IndexSource;

pub const DEFAULT_LISTEN: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATA: &str = "data/withdrawals_parsed.json";

/// Serves pending OP Stack withdrawals and proves them on L1.
#[derive(Debug, Parser)]
#[command(name = "ovm-withdrawer", version)]
pub struct Cli {
    #[arg(long, help = "Set HTTP address", default_value_t = DEFAULT_LISTEN)]
    pub listen: IpAddr,

    #[arg(long, env = "PORT", help = "Set HTTP port", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(
        long,
        env = "WITHDRAWALS_PATH",
        help = "Withdrawal document, a file path or an http(s) URL",
        default_value = DEFAULT_DATA
    )]
    pub data: IndexSource,

    #[arg(long, help = "JSON file with payload_builder and prover settings")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "SECS", help = "Reload the withdrawal document periodically")]
    pub reload_interval: Option<u64>,
}

mod cli;
mod config;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use eyre::Result;
use poem::listener::TcpListener;
use poem::middleware::{Cors, Tracing};
use poem::{EndpointExt, Server};
use tracing::info;
use tracing_subscriber::EnvFilter;
use withdrawer_index::WithdrawalIndexHolder;
use withdrawer_payload_builder::MessagePayloadBuilder;
use withdrawer_prover::ProofSubmitter;

use crate::cli::Cli;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let cfg = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let index = Arc::new(WithdrawalIndexHolder::load(cli.data.clone()).await);
    if let Some(secs) = cli.reload_interval.filter(|secs| *secs > 0) {
        info!(interval_secs = secs, "Reloading withdrawals periodically");
        tokio::spawn(index.clone().refresh_task(Duration::from_secs(secs)));
    }

    let route = withdrawer_rpc::endpoint(withdrawer_rpc::Config {
        index: index.clone(),
        builder: MessagePayloadBuilder::new(cfg.payload_builder),
        prover: Arc::new(ProofSubmitter::new(cfg.prover)),
    });

    let addr = SocketAddr::new(cli.listen, cli.port);
    info!(
        withdrawals = index.snapshot().index.len(),
        "OVM Withdrawer server running on http://{addr}"
    );
    Server::new(TcpListener::bind(addr))
        .run_with_graceful_shutdown(
            route.with(Cors::new()).with(Tracing),
            async {
                let _ = tokio::signal::ctrl_c().await;
            },
            None,
        )
        .await?;
    Ok(())
}

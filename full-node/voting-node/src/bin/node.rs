//! This binary runs the voting node.

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use voting_ledger::VotingLedgerConfig;
use voting_modules_api::ProverStorage;
use voting_node::{
    from_json_path, from_toml_path, start_rpc_server, LedgerClock, LedgerRunner, NodeConfig,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The path to the node config.
    #[arg(long, default_value = "node_config.toml")]
    config_path: String,

    /// The path to the genesis config. The ledger starts with the default genesis when omitted.
    #[arg(long)]
    genesis_path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initializing logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    info!("Reading node config from {:?}", args.config_path);
    let node_config: NodeConfig =
        from_toml_path(&args.config_path).context("Failed to read node configuration")?;

    let genesis_config: VotingLedgerConfig = match &args.genesis_path {
        Some(path) => from_json_path(path).context("Failed to read genesis configuration")?,
        None => VotingLedgerConfig::default(),
    };

    let storage = ProverStorage::with_config(&node_config.storage)
        .context("Failed to open ledger storage")?;
    let runner = LedgerRunner::new(storage, &genesis_config, LedgerClock::system())?;

    let (_, handle) = start_rpc_server(runner, &node_config.rpc_config).await?;

    tokio::select! {
        _ = handle.clone().stopped() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
            handle.stop()?;
        }
    }

    Ok(())
}

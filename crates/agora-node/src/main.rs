// Path: crates/agora-node/src/main.rs
//! The Agora node binary: the thinnest possible process that owns a durable
//! validator-set engine. Networking, RPC, and block ingestion are out of
//! scope (see the purpose section of the design notes this binary was built
//! against) — this exists only to give the ambient stack (config loading,
//! logging, storage) something real to wire into `main`.

use agora_consensus::ValidatorSetEngine;
use agora_storage::RedbValidatorStore;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

mod config;

use config::NodeConfig;

#[derive(Parser, Debug)]
#[command(name = "agora-node", version, about = "Agora validator-set engine node")]
struct Opts {
    /// Path to a TOML configuration file. Falls back to built-in defaults
    /// when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let config = NodeConfig::load(opts.config.as_deref())?;

    tracing::info!(
        validator_cycle = config.consensus.validator_cycle,
        min_stake = config.consensus.min_stake.value(),
        data_dir = %config.data_dir.display(),
        "starting agora-node"
    );

    std::fs::create_dir_all(&config.data_dir)
        .map_err(|e| anyhow::anyhow!("creating data dir {:?}: {e}", config.data_dir))?;
    let db_path = config.data_dir.join("validators.redb");
    let store = RedbValidatorStore::open(&db_path)
        .map_err(|e| anyhow::anyhow!("opening validator store at {db_path:?}: {e}"))?;
    let store: Arc<dyn agora_storage::ValidatorStore> = Arc::new(store);

    let engine = ValidatorSetEngine::new(store, config.consensus);
    let active_at_genesis = engine.count_active(agora_types::Height(0));
    tracing::info!(
        active_at_genesis,
        "validator-set engine ready; awaiting an external block source to drive it"
    );

    Ok(())
}

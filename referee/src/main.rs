//! Kingmaker Referee
//!
//! Off-chain runner for the throne game. Plays a configured scenario
//! against the settlement model, sequentially or as concurrent tasks, and
//! prints the outcome together with the equivalent program instructions.
//! With an authority keypair it also encodes the transaction that publishes
//! the scenario's rate and initializes the throne.
//!
//! `kingmaker-referee init` writes the demo scenario to the config path.

mod config;
mod scenario;
mod tx_builder;

use anyhow::{Context, Result};
use config::Config;
use scenario::Scenario;
use solana_sdk::{hash::Hash, signature::Keypair};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Kingmaker Referee");

    if std::env::args().nth(1).as_deref() == Some("init") {
        return Config::write_default(&Config::path());
    }

    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({:#}), using the demo scenario", e);
        Config::default_demo()
    });

    let keys = config.chain.keys()?;
    log::info!("Throne program: {}", keys.throne_program);
    log::info!(
        "{} players, {} plays, {}",
        config.players.len(),
        config.plays.len(),
        if config.concurrent { "concurrent" } else { "sequential" }
    );

    let authority = config
        .chain
        .authority_keypair
        .as_deref()
        .map(load_keypair)
        .transpose()?;

    let concurrent = config.concurrent;
    let rate_price = config.rate_price;
    let scenario = Scenario::new(config, keys).context("Invalid scenario")?;
    let mut report = if concurrent {
        Arc::new(scenario).run_concurrent().await?
    } else {
        scenario.run_sequential()
    };

    if let Some(authority) = &authority {
        // Dry run: no cluster is contacted, so there is no real blockhash
        let tx = tx_builder::build_setup_transaction(&keys, authority, rate_price, Hash::default());
        report.setup_transaction = Some(tx_builder::encode_transaction(&tx)?);
    }

    match &report.holder {
        Some(holder) => log::info!(
            "Throne held by {} after {} reigns",
            holder.player,
            report.reigns
        ),
        None => log::info!("Throne is empty"),
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to serialize report")?
    );
    Ok(())
}

/// Load a keypair from a JSON array or raw bytes file
fn load_keypair(path: &str) -> Result<Keypair> {
    let expanded_path = shellexpand::tilde(path);
    let bytes = std::fs::read(expanded_path.as_ref())
        .context(format!("Failed to read keypair from {}", path))?;

    let keypair = if bytes.first() == Some(&b'[') {
        let json_data: Vec<u8> =
            serde_json::from_slice(&bytes).context("Failed to parse keypair JSON")?;
        Keypair::try_from(&json_data[..]).context("Failed to create keypair from bytes")?
    } else {
        Keypair::try_from(&bytes[..]).context("Failed to create keypair from bytes")?
    };

    Ok(keypair)
}

// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use account_explorer::app::config::ExplorerSettings;
use account_explorer::app::logging::setup_logging;
use account_explorer::data::db::Database;
use account_explorer::domain::error::AppError;
use account_explorer::domain::snapshot::AccountSnapshot;
use account_explorer::network::chain_client::RpcChainClient;
use account_explorer::network::provider::ConnectionFactory;
use account_explorer::services::account::AccountAggregator;
use alloy::primitives::utils::format_ether;
use clap::Parser;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about = "account explorer")]
struct Cli {
    /// Address to inspect (0x-prefixed hex, any casing)
    address: String,

    /// Path to config file (default: config.{toml,yaml,...})
    #[arg(long)]
    config: Option<String>,

    /// Print the full snapshot as JSON instead of a summary
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Concurrent block fetches during the scan (overrides config/env)
    #[arg(long)]
    scan_concurrency: Option<usize>,
}

fn print_summary(snapshot: &AccountSnapshot) {
    let title = match &snapshot.display_name {
        Some(name) => format!("{} ({name})", snapshot.address),
        None => snapshot.address.to_string(),
    };
    println!("{title}");
    println!(
        "  block    : {} {}",
        snapshot.latest_block_number, snapshot.latest_block_hash
    );
    println!("  balance  : {} ETH", format_ether(snapshot.balance));
    println!(
        "  kind     : {}",
        if snapshot.is_contract { "contract" } else { "account" }
    );
    if snapshot.is_contract {
        println!("  code     : {} bytes", snapshot.raw_bytecode.len());
        println!("  storage  : {} entries", snapshot.storage_entries.len());
    }
    if let Some(text) = &snapshot.disassembly_text {
        println!("  wasm     : {} lines of text", text.lines().count());
    }
    for call in &snapshot.constant_call_results {
        println!("  {}() = {}", call.name, call.result);
    }
    println!(
        "  activity : {} txs in {} blocks (window {}..={})",
        snapshot.transaction_count(),
        snapshot.block_groups.len(),
        snapshot.scan_window.lowest_block(),
        snapshot.scan_window.last_block
    );
    for group in &snapshot.block_groups {
        println!("    #{:<10} {} tx", group.block_number, group.transactions.len());
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let mut settings = ExplorerSettings::load_with_path(cli.config.as_deref())?;
    if let Some(n) = cli.scan_concurrency {
        settings.scan_concurrency = n;
    }
    setup_logging(
        if settings.debug { "debug" } else { "info" },
        settings.log_json_value(),
    )?;

    let (provider, endpoint) = ConnectionFactory::preferred(
        settings.ipc_provider_value().as_deref(),
        settings.websocket_provider_value().as_deref(),
        settings.http_provider_value().as_deref(),
    )
    .await?;
    tracing::info!(target: "rpc", endpoint = %endpoint, "Connected to node");

    let database_url = settings.database_url();
    let db = Database::new(&database_url).await?;
    let names = settings.name_table()?;

    let aggregator = AccountAggregator::new(
        Arc::new(RpcChainClient::new(provider)),
        Arc::new(db),
        Arc::new(names),
        settings.aggregator_settings(),
    );

    let snapshot = aggregator.build_for(&cli.address).await?;
    if cli.json {
        let body = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| AppError::Initialization(format!("snapshot encode: {e}")))?;
        println!("{body}");
    } else {
        print_summary(&snapshot);
    }
    Ok(())
}

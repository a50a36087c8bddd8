//! Alert Rule Generator - Main Entry Point

use alert_bridge::cli::RulesArgs;
use alert_bridge::{init_logging, run_rules, BridgeConfig};
use clap::Parser;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = RulesArgs::parse();
    let config = BridgeConfig::load(args.common.config.as_deref())?
        .with_log_level(args.common.log_level);
    init_logging(&config.logging)?;

    info!("=== Alert Rule Generator v{} ===", env!("CARGO_PKG_VERSION"));
    let count = run_rules(&config, args.output.as_deref()).await?;
    info!("Done, {} rules generated", count);

    Ok(())
}

//! Alert Publisher - Main Entry Point

use alert_bridge::cli::PublisherArgs;
use alert_bridge::{init_logging, run_publisher, BridgeConfig};
use clap::Parser;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = PublisherArgs::parse();
    let config = BridgeConfig::load(args.common.config.as_deref())?
        .with_log_level(args.common.log_level);
    init_logging(&config.logging)?;

    info!("=== Alert Publisher v{} ===", env!("CARGO_PKG_VERSION"));
    run_publisher(&config).await?;

    Ok(())
}

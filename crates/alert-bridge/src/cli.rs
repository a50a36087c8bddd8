//! Command-Line Arguments

use clap::{Args, Parser};
use std::path::PathBuf;

/// Options shared by both programs
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Configuration file (TOML, INI, YAML, or JSON)
    #[arg(short, long, env = "ALERT_BRIDGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level or filter directive, overriding the configuration
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Forward status events from the queue to the alerting service
#[derive(Debug, Parser)]
#[command(name = "alert-publisher", version, about)]
pub struct PublisherArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Generate alert-routing rules from the contact registry
#[derive(Debug, Parser)]
#[command(name = "alert-rules", version, about)]
pub struct RulesArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Rule output file, overriding `alerta.rules_output`
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

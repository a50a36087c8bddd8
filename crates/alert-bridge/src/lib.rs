//! Alert Bridge
//!
//! Wires the pipeline crates into two programs:
//! - `alert-publisher`: consumes status events and forwards them as alerts
//! - `alert-rules`: turns the contact registry into alert-routing rules

pub mod cli;
mod error;
mod logging;
mod publisher;
mod rules;
mod settings;

pub use error::{BridgeError, ConfigError};
pub use logging::init_logging;
pub use publisher::run_publisher;
pub use rules::run_rules;
pub use settings::{
    AlertaSettings, AuthMethod, BridgeConfig, KafkaSettings, LoggingSettings, RegistrySettings,
    UiSettings,
};

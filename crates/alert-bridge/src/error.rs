//! Bridge Error Types

use alert_dispatch::DeliveryError;
use contact_rules::{ExtractError, RegistryError, RuleWriteError};
use event_listener::ListenerError;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Sources could not be read or deserialized
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    /// A setting required by the running program is absent
    #[error("Missing required setting: {0}")]
    Missing(&'static str),
}

/// Errors that stop a bridge program
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Alert dispatcher setup failed: {0}")]
    Dispatch(#[from] DeliveryError),

    #[error("Listener stopped: {0}")]
    Listener(#[from] ListenerError),

    #[error("Registry client error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Contact extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("Rule output failed: {0}")]
    RuleWrite(#[from] RuleWriteError),
}

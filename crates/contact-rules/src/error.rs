//! Contact Rules Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Registry API errors
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Credential or CA file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Credential or CA file is not usable PEM
    #[error("TLS setup failed: {0}")]
    Tls(String),

    /// Request could not be completed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Registry answered with something other than 200
    #[error("Registry returned status {0}")]
    Status(u16),
}

/// Registry document could not be parsed
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid registry XML: {0}")]
    Xml(#[from] roxmltree::Error),
}

/// Rule file could not be written
#[derive(Debug, Error)]
pub enum RuleWriteError {
    #[error("Failed to encode rules: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

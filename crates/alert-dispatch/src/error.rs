//! Delivery Error Types

use thiserror::Error;

/// Reasons an alert did not reach the alert-management API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// API answered with something other than 201 Created
    #[error("Alert rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Request never got a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// Alert could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        DeliveryError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for DeliveryError {
    fn from(err: serde_json::Error) -> Self {
        DeliveryError::Serialization(err.to_string())
    }
}

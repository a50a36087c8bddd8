//! Schema Error Types

use thiserror::Error;

/// Errors raised when a status event cannot be turned into an alert
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Required field missing, mistyped, or an unknown event type
    #[error("Invalid status event: {0}")]
    Invalid(String),

    /// Timestamp could not be parsed or shifted into a lookback window
    #[error("Invalid timestamp in {field}: {value}")]
    InvalidTimestamp { field: &'static str, value: String },
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Invalid(err.to_string())
    }
}

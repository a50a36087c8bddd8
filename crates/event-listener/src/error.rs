//! Listener Error Types

use status_transform::SchemaError;
use thiserror::Error;

/// Errors that end the consumption loop
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Could not reach the brokers
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Fetching or committing messages failed
    #[error("Poll failed: {0}")]
    Poll(String),

    /// Source used before `connect`
    #[error("Message source is not connected")]
    NotConnected,
}

impl From<kafka::error::Error> for ListenerError {
    fn from(err: kafka::error::Error) -> Self {
        ListenerError::Poll(err.to_string())
    }
}

/// Per-message errors; the message is skipped
#[derive(Debug, Error)]
pub enum MessageError {
    /// Payload is not JSON
    #[error("Malformed message: {0}")]
    Malformed(String),

    /// Payload is JSON but not a usable status event
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

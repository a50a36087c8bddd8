//! Event Listener
//!
//! Pulls status events from a message queue and runs each one through the
//! transform and dispatch pipeline, one message at a time. Bad messages are
//! logged and skipped; only a broken source connection ends the loop.

mod error;
mod listener;
mod source;

pub use error::{ListenerError, MessageError};
pub use listener::{parse_event, Listener, ListenerState, ListenerStats, MessageOutcome};
pub use source::{KafkaConfig, KafkaSource, MessageSource};

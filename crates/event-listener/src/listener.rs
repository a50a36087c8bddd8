//! Listener Loop

use crate::error::{ListenerError, MessageError};
use crate::source::MessageSource;
use alert_dispatch::{AlertSink, DispatchOutcome};
use serde_json::Value;
use status_transform::{StatusEvent, Transformer};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Pause before polling again after a failed poll
const POLL_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Lifecycle of a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    /// Not connected
    Idle,
    /// Connected, not yet pulling
    Connected,
    /// Inside the consumption loop
    Consuming,
}

/// What happened to a single message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Alert accepted by the alerting service
    Delivered,
    /// Alert built but not accepted
    Rejected,
    /// Payload was not JSON
    Malformed,
    /// Payload was JSON without the required fields
    SchemaMismatch,
}

/// Message counters since the listener was created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerStats {
    pub delivered: u64,
    pub rejected: u64,
    pub malformed: u64,
    pub schema_mismatch: u64,
}

impl ListenerStats {
    fn record(&mut self, outcome: MessageOutcome) {
        match outcome {
            MessageOutcome::Delivered => self.delivered += 1,
            MessageOutcome::Rejected => self.rejected += 1,
            MessageOutcome::Malformed => self.malformed += 1,
            MessageOutcome::SchemaMismatch => self.schema_mismatch += 1,
        }
    }

    /// Total messages handled
    pub fn total(&self) -> u64 {
        self.delivered + self.rejected + self.malformed + self.schema_mismatch
    }
}

/// Parse a raw payload into a status event
pub fn parse_event(payload: &str) -> Result<StatusEvent, MessageError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|e| MessageError::Malformed(e.to_string()))?;
    Ok(StatusEvent::from_value(value)?)
}

/// Sequential consumer feeding the transform and dispatch pipeline
pub struct Listener<Q, S> {
    source: Q,
    sink: S,
    transformer: Transformer,
    state: ListenerState,
    stats: ListenerStats,
}

impl<Q: MessageSource, S: AlertSink> Listener<Q, S> {
    /// Create a new listener
    pub fn new(source: Q, transformer: Transformer, sink: S) -> Self {
        Self {
            source,
            sink,
            transformer,
            state: ListenerState::Idle,
            stats: ListenerStats::default(),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ListenerState {
        self.state
    }

    /// Message counters
    pub fn stats(&self) -> ListenerStats {
        self.stats
    }

    /// Alert sink the listener delivers to
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Connect and consume until the connection is lost or the source is exhausted
    ///
    /// Poll failures are logged and retried; only connection failures end the loop.
    pub async fn run(&mut self) -> Result<(), ListenerError> {
        if self.state == ListenerState::Idle {
            self.source.connect().await?;
            self.state = ListenerState::Connected;
        }

        self.state = ListenerState::Consuming;
        info!("Listening for status events");

        loop {
            let batch = match self.source.poll().await {
                Ok(Some(batch)) => batch,
                Ok(None) => {
                    info!("Message source exhausted after {} messages", self.stats.total());
                    self.state = ListenerState::Idle;
                    return Ok(());
                }
                Err(ListenerError::Poll(e)) => {
                    warn!("Poll failed, retrying: {}", e);
                    tokio::time::sleep(POLL_RETRY_DELAY).await;
                    continue;
                }
                Err(e) => {
                    self.state = ListenerState::Idle;
                    return Err(e);
                }
            };

            for payload in batch {
                let outcome = self.handle_message(&payload).await;
                self.stats.record(outcome);
            }
        }
    }

    /// Run one payload through parse, transform, and dispatch
    pub async fn handle_message(&self, payload: &str) -> MessageOutcome {
        let event = match parse_event(payload) {
            Ok(event) => event,
            Err(MessageError::Malformed(e)) => {
                warn!("NOT JSON ({}): {}", e, payload);
                return MessageOutcome::Malformed;
            }
            Err(MessageError::Schema(e)) => {
                warn!("WRONG JSON SCHEMA ({}): {}", e, payload);
                return MessageOutcome::SchemaMismatch;
            }
        };

        let alert = match self.transformer.transform(&event) {
            Ok(alert) => alert,
            Err(e) => {
                warn!("WRONG JSON SCHEMA ({}): {}", e, payload);
                return MessageOutcome::SchemaMismatch;
            }
        };

        match self.sink.deliver(&alert).await {
            DispatchOutcome::Delivered => MessageOutcome::Delivered,
            DispatchOutcome::Failed(e) => {
                debug!("Skipping message after failed delivery: {}", e);
                MessageOutcome::Rejected
            }
        }
    }
}

//! Message Sources

use crate::error::ListenerError;
use kafka::consumer::{Consumer, FetchOffset, GroupOffsetStorage};
use std::future::Future;
use tracing::{debug, info};

/// Queue the listener pulls message payloads from
pub trait MessageSource {
    /// Establish the connection to the queue
    fn connect(&mut self) -> impl Future<Output = Result<(), ListenerError>>;

    /// Fetch the next batch of payloads
    ///
    /// An empty batch means nothing arrived yet. `None` means the source is
    /// exhausted and will never yield again.
    fn poll(&mut self) -> impl Future<Output = Result<Option<Vec<String>>, ListenerError>>;
}

/// Kafka consumer configuration
#[derive(Debug, Clone)]
pub struct KafkaConfig {
    /// Broker endpoints (host:port)
    pub brokers: Vec<String>,
    /// Topic carrying status events
    pub topic: String,
    /// Consumer group id
    pub group_id: String,
}

impl KafkaConfig {
    /// Build a config from a comma-separated broker list
    pub fn from_endpoints(endpoints: &str, topic: &str, group_id: &str) -> Self {
        Self {
            brokers: endpoints
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            topic: topic.to_string(),
            group_id: group_id.to_string(),
        }
    }
}

impl Default for KafkaConfig {
    fn default() -> Self {
        Self {
            brokers: vec!["localhost:9092".to_string()],
            topic: "metrics".to_string(),
            group_id: "argo-alerta".to_string(),
        }
    }
}

/// Kafka-backed message source
///
/// The client is blocking; each call runs on tokio's blocking pool and is
/// awaited before the listener continues. Offsets of a batch are committed
/// on the following poll, after the whole batch has been handled.
pub struct KafkaSource {
    config: KafkaConfig,
    consumer: Option<Consumer>,
    uncommitted: bool,
}

impl KafkaSource {
    /// Create a new, unconnected Kafka source
    pub fn new(config: KafkaConfig) -> Self {
        Self {
            config,
            consumer: None,
            uncommitted: false,
        }
    }
}

impl MessageSource for KafkaSource {
    async fn connect(&mut self) -> Result<(), ListenerError> {
        if self.config.brokers.is_empty() {
            return Err(ListenerError::Connection("no broker endpoints configured".to_string()));
        }

        let config = self.config.clone();
        info!(
            "Connecting to Kafka brokers {:?}, topic {}, group {}",
            config.brokers, config.topic, config.group_id
        );

        let consumer = tokio::task::spawn_blocking(move || {
            Consumer::from_hosts(config.brokers)
                .with_topic(config.topic)
                .with_group(config.group_id)
                .with_fallback_offset(FetchOffset::Latest)
                .with_offset_storage(GroupOffsetStorage::Kafka)
                .create()
        })
        .await
        .map_err(|e| ListenerError::Connection(e.to_string()))?
        .map_err(|e| ListenerError::Connection(e.to_string()))?;

        self.consumer = Some(consumer);
        info!("Connected to Kafka topic {}", self.config.topic);
        Ok(())
    }

    async fn poll(&mut self) -> Result<Option<Vec<String>>, ListenerError> {
        let mut consumer = self.consumer.take().ok_or(ListenerError::NotConnected)?;
        let commit = std::mem::replace(&mut self.uncommitted, false);

        let (consumer, result) = tokio::task::spawn_blocking(move || {
            let result = poll_batch(&mut consumer, commit);
            (consumer, result)
        })
        .await
        .map_err(|e| ListenerError::Connection(e.to_string()))?;

        self.consumer = Some(consumer);
        match result {
            Ok(payloads) => {
                self.uncommitted = !payloads.is_empty();
                Ok(Some(payloads))
            }
            Err(e) => {
                // handled offsets stay pending until a commit succeeds
                self.uncommitted = commit;
                Err(e)
            }
        }
    }
}

fn poll_batch(consumer: &mut Consumer, commit: bool) -> Result<Vec<String>, ListenerError> {
    if commit {
        consumer.commit_consumed()?;
    }

    let sets = consumer.poll()?;
    let mut payloads = Vec::new();
    for set in sets.iter() {
        for message in set.messages() {
            payloads.push(String::from_utf8_lossy(message.value).into_owned());
        }
        consumer.consume_messageset(set)?;
    }

    if !payloads.is_empty() {
        debug!("Fetched {} messages", payloads.len());
    }
    Ok(payloads)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broker_list_parsing() {
        let config = KafkaConfig::from_endpoints("k1:9092, k2:9092,,", "metrics", "argo-alerta");
        assert_eq!(config.brokers, vec!["k1:9092", "k2:9092"]);
        assert_eq!(config.topic, "metrics");
        assert_eq!(config.group_id, "argo-alerta");
    }

    #[tokio::test]
    async fn test_poll_before_connect() {
        let mut source = KafkaSource::new(KafkaConfig::default());
        assert!(matches!(source.poll().await, Err(ListenerError::NotConnected)));
    }

    #[tokio::test]
    async fn test_connect_without_brokers() {
        let mut source = KafkaSource::new(KafkaConfig::from_endpoints("", "metrics", "g"));
        assert!(matches!(
            source.connect().await,
            Err(ListenerError::Connection(_))
        ));
    }
}

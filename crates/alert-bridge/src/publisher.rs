//! Alert Publisher

use crate::error::BridgeError;
use crate::settings::BridgeConfig;
use alert_dispatch::AlertDispatcher;
use event_listener::{KafkaSource, Listener};
use status_transform::Transformer;
use tracing::{error, info};

/// Consume status events until the queue connection fails
pub async fn run_publisher(config: &BridgeConfig) -> Result<(), BridgeError> {
    let transformer = Transformer::new(config.transform_config());
    let dispatcher = AlertDispatcher::new(config.dispatcher_config()?)?;
    let source = KafkaSource::new(config.kafka_config());

    info!(
        "Publishing {} alerts from topic {} to {}",
        config.alerta.environment,
        config.kafka.topic,
        dispatcher.alert_url()
    );

    let mut listener = Listener::new(source, transformer, dispatcher);
    let result = listener.run().await;

    let stats = listener.stats();
    info!(
        "Listener stopped: {} delivered, {} rejected, {} malformed, {} schema mismatches",
        stats.delivered, stats.rejected, stats.malformed, stats.schema_mismatch
    );

    result.map_err(|e| {
        error!("Queue connection lost: {}", e);
        BridgeError::from(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[tokio::test]
    async fn test_requires_alerting_endpoint() {
        let err = run_publisher(&BridgeConfig::default()).await.unwrap_err();
        assert!(matches!(
            err,
            BridgeError::Config(ConfigError::Missing("alerta.endpoint"))
        ));
    }
}

//! Event-to-Alert Transformer

use crate::alert::{AlertAttributes, AlertRecord};
use crate::error::SchemaError;
use crate::event::{EventType, StatusEvent};
use crate::url;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Transformer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Alert environment (e.g. "Devel", "Production")
    pub environment: String,
    /// Label of the top-level grouping used by this tenant
    pub group_type: String,
    /// Alert timeout in seconds
    pub timeout: u64,
    /// Dashboard host for deep-links; `None` disables `_alert_url`
    pub ui_endpoint: Option<String>,
    /// Report name used in deep-links unless the event carries its own
    pub report: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            environment: "Devel".to_string(),
            group_type: "Group".to_string(),
            timeout: 3600,
            ui_endpoint: None,
            report: "Critical".to_string(),
        }
    }
}

/// Maps status events into alert records
#[derive(Debug, Clone)]
pub struct Transformer {
    config: TransformConfig,
}

impl Transformer {
    /// Create a new transformer
    pub fn new(mut config: TransformConfig) -> Self {
        if config.ui_endpoint.as_deref().is_some_and(str::is_empty) {
            config.ui_endpoint = None;
        }
        Self { config }
    }

    /// Transform a status event into an alert record
    pub fn transform(&self, event: &StatusEvent) -> Result<AlertRecord, SchemaError> {
        let severity = event.status.to_lowercase();
        let shout = severity.to_uppercase();
        let group = event.endpoint_group.as_str();
        let service = event.service.as_str();
        let hostname = event.hostname.as_str();
        let metric = event.metric.as_str();

        let report = match &event.report {
            Some(report) => {
                info!("Using report {} from event", report);
                report.as_str()
            }
            None => self.config.report.as_str(),
        };

        let (resource, text) = match event.event_type {
            EventType::EndpointGroup => (
                group.to_string(),
                format!(
                    "[ {} ] - {} {} is {}",
                    group, self.config.group_type, group, shout
                ),
            ),
            EventType::Service => (
                format!("{}/{}", group, service),
                format!("[ {} ] - Service {} is {}", group, service, shout),
            ),
            EventType::Endpoint => (
                format!("{}/{}/{}", group, service, hostname),
                format!(
                    "[ {} ] - Endpoint {}:{} is {}",
                    group, hostname, service, shout
                ),
            ),
            EventType::Metric => (
                format!("{}/{}/{}/{}", group, service, hostname, metric),
                format!(
                    "[ {} ] - Metric {}@({}:{}) is {}",
                    group, metric, hostname, service, shout
                ),
            ),
        };

        let alert_url = match self.config.ui_endpoint.as_deref() {
            Some(ui) => Some(self.alert_url(ui, report, event)?),
            None => None,
        };

        let alert = AlertRecord {
            environment: self.config.environment.clone(),
            event: format!("{}status", event.event_type),
            resource,
            service: vec![event.event_type.as_str().to_string()],
            severity,
            text,
            attributes: AlertAttributes {
                group: group.to_string(),
                service: service.to_string(),
                endpoint: hostname.to_string(),
                metric: metric.to_string(),
                repeat: event.repeat.clone(),
                ts_monitored: event.ts_monitored.clone(),
                ts_processed: event.ts_processed.clone(),
                alert_url,
            },
            timeout: self.config.timeout,
        };

        debug!("Transformed {} event into alert for {}", event.event_type, alert.resource);
        Ok(alert)
    }

    fn alert_url(
        &self,
        ui: &str,
        report: &str,
        event: &StatusEvent,
    ) -> Result<String, SchemaError> {
        let ts = event.ts_monitored.as_str();
        let group = event.endpoint_group.as_str();
        match event.event_type {
            EventType::EndpointGroup => url::group_url(ui, report, ts, group),
            EventType::Service => url::service_url(ui, report, ts, group),
            EventType::Endpoint => url::endpoint_url(ui, report, ts, group, &event.service),
            EventType::Metric => {
                url::metric_url(ui, report, ts, group, &event.service, &event.hostname)
            }
        }
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new(TransformConfig::default())
    }
}

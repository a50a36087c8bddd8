//! Alert Record Model

use serde::{Deserialize, Serialize};

/// Attributes attached to every alert
///
/// Serialized as a flat string map; key order is fixed by field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertAttributes {
    #[serde(rename = "_group")]
    pub group: String,
    #[serde(rename = "_service")]
    pub service: String,
    #[serde(rename = "_endpoint")]
    pub endpoint: String,
    #[serde(rename = "_metric")]
    pub metric: String,
    #[serde(rename = "_repeat")]
    pub repeat: String,
    #[serde(rename = "_ts_monitored")]
    pub ts_monitored: String,
    #[serde(rename = "_ts_processed")]
    pub ts_processed: String,
    /// Dashboard deep-link, present only when a UI endpoint is configured
    #[serde(rename = "_alert_url", default, skip_serializing_if = "Option::is_none")]
    pub alert_url: Option<String>,
}

/// Alert as accepted by the alert-management API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub environment: String,
    pub event: String,
    pub resource: String,
    /// Service tags; always exactly one entry naming the event type
    pub service: Vec<String>,
    pub severity: String,
    pub text: String,
    pub attributes: AlertAttributes,
    /// Alert timeout in seconds
    pub timeout: u64,
}

impl AlertRecord {
    /// Number of `/`-separated segments in the resource path
    pub fn resource_depth(&self) -> usize {
        self.resource.split('/').count()
    }
}

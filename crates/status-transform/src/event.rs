//! Status Event Model

use crate::error::SchemaError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Granularity of a status event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Top-level group (site, project, ...)
    EndpointGroup,
    /// Service inside a group
    Service,
    /// Host running a service
    Endpoint,
    /// Single probe result on an endpoint
    Metric,
}

impl EventType {
    /// Number of resource path segments for this granularity
    pub fn rank(self) -> usize {
        match self {
            EventType::EndpointGroup => 1,
            EventType::Service => 2,
            EventType::Endpoint => 3,
            EventType::Metric => 4,
        }
    }

    /// Wire name, also used as the alert service tag
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::EndpointGroup => "endpoint_group",
            EventType::Service => "service",
            EventType::Endpoint => "endpoint",
            EventType::Metric => "metric",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status event as published by the monitoring engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    #[serde(deserialize_with = "scalar_string")]
    pub status: String,
    #[serde(deserialize_with = "scalar_string")]
    pub hostname: String,
    #[serde(deserialize_with = "scalar_string")]
    pub metric: String,
    #[serde(deserialize_with = "scalar_string")]
    pub endpoint_group: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(deserialize_with = "scalar_string")]
    pub service: String,
    #[serde(deserialize_with = "scalar_string")]
    pub ts_monitored: String,
    #[serde(deserialize_with = "scalar_string")]
    pub ts_processed: String,
    #[serde(deserialize_with = "scalar_string")]
    pub repeat: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
}

impl StatusEvent {
    /// Build an event from an already-parsed JSON document
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Accept strings as-is and stringify booleans and numbers
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string, found {}",
            other
        ))),
    }
}

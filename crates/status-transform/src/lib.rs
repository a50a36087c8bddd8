//! Status Event Transformation
//!
//! Maps monitoring status events into alert records for the alert-management
//! service. Provides:
//! - Typed status event and alert record models
//! - Dashboard deep-link construction per event granularity
//! - The deterministic event-to-alert transformer

mod alert;
mod error;
mod event;
mod transformer;
pub mod url;

pub use alert::{AlertAttributes, AlertRecord};
pub use error::SchemaError;
pub use event::{EventType, StatusEvent};
pub use transformer::{TransformConfig, Transformer};

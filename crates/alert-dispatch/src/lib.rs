//! Alert Dispatch
//!
//! Delivers alert records to the alert-management API and reports the
//! outcome. Delivery failures are logged and returned as values; they never
//! propagate as errors into the consuming loop.

mod dispatcher;
mod error;

pub use dispatcher::{AlertDispatcher, AlertSink, DispatchOutcome, DispatcherConfig};
pub use error::DeliveryError;

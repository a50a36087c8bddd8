//! Contact Rules
//!
//! One-shot batch path that turns a contact-registry XML export into
//! alert-routing rules:
//! - Registry API client (client certificate or basic auth)
//! - Contact extraction with optional notification opt-in
//! - Rule generation and JSON output

mod contact;
mod error;
mod output;
mod registry;
mod rule;

pub use contact::{extract_contacts, Contact, ExtractOptions, NotificationFlag};
pub use error::{ExtractError, RegistryError, RuleWriteError};
pub use output::{render_rules, write_rules};
pub use registry::{RegistryAuth, RegistryClient, RegistryConfig};
pub use rule::{generate_rules, RoutingRule, RuleField};

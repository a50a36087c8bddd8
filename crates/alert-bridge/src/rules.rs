//! Rule Generation Run

use crate::error::BridgeError;
use crate::settings::BridgeConfig;
use contact_rules::{extract_contacts, generate_rules, write_rules, RegistryClient};
use std::path::Path;
use tracing::{info, warn};

/// Fetch contacts from the registry and write routing rules
///
/// Returns the number of rules written. An empty registry response writes
/// nothing and returns zero.
pub async fn run_rules(
    config: &BridgeConfig,
    output_override: Option<&Path>,
) -> Result<usize, BridgeError> {
    let output = config.rules_output(output_override)?;
    let client = RegistryClient::new(config.registry_config()?)?;

    let xml = client.fetch().await;
    if xml.is_empty() {
        warn!("No registry data received, rules file left untouched");
        return Ok(0);
    }

    let contacts = extract_contacts(&xml, &config.extract_options())?;
    let rules = generate_rules(&contacts, &config.alerta.extra_emails);
    write_rules(&rules, &output)?;

    info!("Wrote {} rules to {}", rules.len(), output.display());
    Ok(rules.len())
}

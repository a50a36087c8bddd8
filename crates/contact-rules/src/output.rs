//! Rule File Output

use crate::error::RuleWriteError;
use crate::rule::RoutingRule;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::Path;
use tracing::info;

/// Render rules as a JSON array indented by four spaces
pub fn render_rules(rules: &[RoutingRule]) -> Result<String, RuleWriteError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    rules.serialize(&mut ser)?;
    // serde_json only emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write rules to `path`, replacing any previous content
pub fn write_rules(rules: &[RoutingRule], path: &Path) -> Result<(), RuleWriteError> {
    let json = render_rules(rules)?;
    info!("Saving {} rules to file: {}", rules.len(), path.display());
    std::fs::write(path, json).map_err(|source| RuleWriteError::Io {
        path: path.to_path_buf(),
        source,
    })
}

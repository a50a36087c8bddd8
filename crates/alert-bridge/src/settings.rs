//! Bridge Configuration
//!
//! Settings are read from an optional file (format picked by extension) and
//! overridden by `ALERT_BRIDGE__<SECTION>__<KEY>` environment variables.

use crate::error::ConfigError;
use alert_dispatch::DispatcherConfig;
use config::{Config, Environment, File};
use contact_rules::{ExtractOptions, RegistryAuth, RegistryConfig};
use event_listener::KafkaConfig;
use serde::{Deserialize, Deserializer};
use status_transform::TransformConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "ALERT_BRIDGE";

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level or filter directive (e.g. "info", "event_listener=debug")
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Queue settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KafkaSettings {
    /// Comma-separated broker list
    pub endpoints: String,
    pub topic: String,
    pub group_id: String,
}

impl Default for KafkaSettings {
    fn default() -> Self {
        Self {
            endpoints: "localhost:9092".to_string(),
            topic: "metrics".to_string(),
            group_id: "argo-alerta".to_string(),
        }
    }
}

/// Alerting service settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AlertaSettings {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub environment: String,
    pub group_type: String,
    pub report: String,
    /// Alert timeout in seconds
    pub timeout: u64,
    /// HTTP request timeout in seconds
    pub request_timeout: u64,
    /// Where `alert-rules` writes its output
    pub rules_output: Option<PathBuf>,
    /// Recipients added to every generated rule
    #[serde(deserialize_with = "string_list")]
    pub extra_emails: Vec<String>,
}

impl Default for AlertaSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            token: None,
            environment: "Devel".to_string(),
            group_type: "Group".to_string(),
            report: "Critical".to_string(),
            timeout: 3600,
            request_timeout: 30,
            rules_output: None,
            extra_emails: Vec::new(),
        }
    }
}

/// Dashboard settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Dashboard host; empty or absent disables alert links
    pub endpoint: Option<String>,
}

/// Registry authentication method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    #[default]
    Cert,
    Basic,
}

/// Contact registry settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    pub url: Option<String>,
    pub auth: AuthMethod,
    pub cert: Option<PathBuf>,
    pub key: Option<PathBuf>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub ca_bundle: Option<PathBuf>,
    pub use_notifications_flag: bool,
    #[serde(deserialize_with = "optional_string_list")]
    pub test_emails: Option<Vec<String>>,
}

/// Complete bridge configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub logging: LoggingSettings,
    pub kafka: KafkaSettings,
    pub alerta: AlertaSettings,
    pub ui: UiSettings,
    pub registry: RegistrySettings,
}

impl BridgeConfig {
    /// Load from an optional file plus environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Apply a command-line log level override
    pub fn with_log_level(mut self, level: Option<String>) -> Self {
        if let Some(level) = level {
            self.logging.level = level;
        }
        self
    }

    /// Settings for the event transformer
    pub fn transform_config(&self) -> TransformConfig {
        TransformConfig {
            environment: self.alerta.environment.clone(),
            group_type: self.alerta.group_type.clone(),
            timeout: self.alerta.timeout,
            ui_endpoint: self.ui.endpoint.clone().filter(|e| !e.is_empty()),
            report: self.alerta.report.clone(),
        }
    }

    /// Settings for the alert dispatcher
    pub fn dispatcher_config(&self) -> Result<DispatcherConfig, ConfigError> {
        Ok(DispatcherConfig {
            endpoint: required(&self.alerta.endpoint, "alerta.endpoint")?,
            token: required(&self.alerta.token, "alerta.token")?,
            request_timeout: Duration::from_secs(self.alerta.request_timeout),
        })
    }

    /// Settings for the Kafka source
    pub fn kafka_config(&self) -> KafkaConfig {
        KafkaConfig::from_endpoints(
            &self.kafka.endpoints,
            &self.kafka.topic,
            &self.kafka.group_id,
        )
    }

    /// Settings for the registry client
    pub fn registry_config(&self) -> Result<RegistryConfig, ConfigError> {
        let registry = &self.registry;
        let auth = match registry.auth {
            AuthMethod::Cert => RegistryAuth::Cert {
                cert: registry.cert.clone().ok_or(ConfigError::Missing("registry.cert"))?,
                key: registry.key.clone().ok_or(ConfigError::Missing("registry.key"))?,
            },
            AuthMethod::Basic => RegistryAuth::Basic {
                username: required(&registry.username, "registry.username")?,
                password: required(&registry.password, "registry.password")?,
            },
        };

        Ok(RegistryConfig {
            url: required(&registry.url, "registry.url")?,
            auth,
            ca_bundle: registry.ca_bundle.clone(),
        })
    }

    /// Settings for contact extraction
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            use_notification_flag: self.registry.use_notifications_flag,
            test_emails: self.registry.test_emails.clone(),
        }
    }

    /// Rule output path, preferring an explicit override
    pub fn rules_output(&self, override_path: Option<&Path>) -> Result<PathBuf, ConfigError> {
        override_path
            .map(Path::to_path_buf)
            .or_else(|| self.alerta.rules_output.clone())
            .ok_or(ConfigError::Missing("alerta.rules_output"))
    }
}

fn required(value: &Option<String>, name: &'static str) -> Result<String, ConfigError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ConfigError::Missing(name))
}

/// List given either as an array or as a comma-separated string
#[derive(Deserialize)]
#[serde(untagged)]
enum StringList {
    Many(Vec<String>),
    One(String),
}

impl StringList {
    fn into_vec(self) -> Vec<String> {
        match self {
            StringList::Many(items) => items,
            StringList::One(joined) => joined
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(StringList::deserialize(deserializer)?.into_vec())
}

fn optional_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<StringList>::deserialize(deserializer)?.map(StringList::into_vec);
    Ok(items.filter(|v| !v.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(ext: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(ext).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.kafka.group_id, "argo-alerta");
        assert_eq!(config.alerta.timeout, 3600);
        assert_eq!(config.alerta.request_timeout, 30);
        assert_eq!(config.registry.auth, AuthMethod::Cert);
        assert!(config.transform_config().ui_endpoint.is_none());
        assert!(matches!(
            config.dispatcher_config(),
            Err(ConfigError::Missing("alerta.endpoint"))
        ));
    }

    #[test]
    fn test_load_toml() {
        let file = write_config(
            ".toml",
            r#"
[kafka]
endpoints = "k1:9092,k2:9092"
topic = "argo.status"

[alerta]
endpoint = "http://alerta.example.org/api"
token = "s3cr3t"
environment = "Production"
timeout = 600
request_timeout = 10
extra_emails = ["ops@example.org"]
rules_output = "/tmp/rules.json"

[ui]
endpoint = "ui.example.org"

[registry]
url = "https://registry.example.org/api?method=get_site"
auth = "basic"
username = "user"
password = "pass"
use_notifications_flag = true
test_emails = "t1@example.org, t2@example.org"
"#,
        );

        let config = BridgeConfig::load(Some(file.path())).unwrap();

        let kafka = config.kafka_config();
        assert_eq!(kafka.brokers, vec!["k1:9092", "k2:9092"]);
        assert_eq!(kafka.topic, "argo.status");
        assert_eq!(kafka.group_id, "argo-alerta");

        let dispatcher = config.dispatcher_config().unwrap();
        assert_eq!(dispatcher.endpoint, "http://alerta.example.org/api");
        assert_eq!(dispatcher.token, "s3cr3t");
        assert_eq!(dispatcher.request_timeout, Duration::from_secs(10));

        let transform = config.transform_config();
        assert_eq!(transform.environment, "Production");
        assert_eq!(transform.timeout, 600);
        assert_eq!(transform.ui_endpoint.as_deref(), Some("ui.example.org"));
        assert_eq!(transform.report, "Critical");

        assert_eq!(config.alerta.extra_emails, vec!["ops@example.org"]);
        assert_eq!(
            config.rules_output(None).unwrap(),
            PathBuf::from("/tmp/rules.json")
        );

        let registry = config.registry_config().unwrap();
        assert!(matches!(registry.auth, RegistryAuth::Basic { .. }));
        let options = config.extract_options();
        assert!(options.use_notification_flag);
        assert_eq!(
            options.test_emails,
            Some(vec!["t1@example.org".to_string(), "t2@example.org".to_string()])
        );
    }

    #[test]
    fn test_cert_auth_requires_key() {
        let file = write_config(
            ".toml",
            r#"
[registry]
url = "https://registry.example.org"
cert = "/etc/grid-security/hostcert.pem"
"#,
        );
        let config = BridgeConfig::load(Some(file.path())).unwrap();
        assert!(matches!(
            config.registry_config(),
            Err(ConfigError::Missing("registry.key"))
        ));
    }

    #[test]
    fn test_rules_output_override() {
        let config = BridgeConfig::default();
        assert!(config.rules_output(None).is_err());
        assert_eq!(
            config.rules_output(Some(Path::new("out.json"))).unwrap(),
            PathBuf::from("out.json")
        );
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(BridgeConfig::load(Some(Path::new("/nonexistent/bridge.toml"))).is_err());
    }
}

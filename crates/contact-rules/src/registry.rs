//! Contact Registry Client

use crate::error::RegistryError;
use reqwest::{Certificate, Client, Identity, StatusCode};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Registry authentication method
#[derive(Debug, Clone)]
pub enum RegistryAuth {
    /// Client certificate and private key, both PEM files
    Cert { cert: PathBuf, key: PathBuf },
    /// HTTP basic auth
    Basic { username: String, password: String },
}

/// Registry client configuration
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Full URL of the contact export call
    pub url: String,
    pub auth: RegistryAuth,
    /// CA bundle for server verification; without it verification is off
    pub ca_bundle: Option<PathBuf>,
}

/// Fetches the registry's XML contact export
pub struct RegistryClient {
    client: Client,
    url: String,
    auth: RegistryAuth,
}

fn read_file(path: &Path) -> Result<Vec<u8>, RegistryError> {
    std::fs::read(path).map_err(|source| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl RegistryClient {
    /// Build a client, loading credentials and CA bundle from disk
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryError> {
        let mut builder = Client::builder();

        match &config.ca_bundle {
            Some(path) => {
                let pem = read_file(path)?;
                let ca = Certificate::from_pem(&pem)
                    .map_err(|e| RegistryError::Tls(format!("{}: {}", path.display(), e)))?;
                builder = builder.add_root_certificate(ca);
            }
            None => {
                warn!("No CA bundle configured, registry TLS verification disabled");
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        if let RegistryAuth::Cert { cert, key } = &config.auth {
            let mut pem = read_file(cert)?;
            pem.push(b'\n');
            pem.extend(read_file(key)?);
            let identity = Identity::from_pem(&pem)
                .map_err(|e| RegistryError::Tls(format!("client identity: {}", e)))?;
            builder = builder.identity(identity);
        }

        let client = builder.build()?;
        Ok(Self {
            client,
            url: config.url,
            auth: config.auth,
        })
    }

    /// Fetch the registry document
    ///
    /// Any failure is logged and yields an empty string, meaning there is
    /// nothing to process.
    pub async fn fetch(&self) -> String {
        match self.try_fetch().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Registry data retrieval failed: {}", e);
                String::new()
            }
        }
    }

    /// Fetch the registry document, returning the failure
    pub async fn try_fetch(&self) -> Result<String, RegistryError> {
        info!("Requesting data from registry api: {}", self.url);

        let mut request = self.client.get(&self.url);
        if let RegistryAuth::Basic { username, password } = &self.auth {
            request = request.basic_auth(username, Some(password));
        }

        let response = request.send().await?;
        if response.status() != StatusCode::OK {
            return Err(RegistryError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        info!("Registry data retrieval successful");
        Ok(body.trim().to_string())
    }
}

//! Alert Dispatcher Implementation

use crate::error::DeliveryError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use status_transform::AlertRecord;
use std::future::Future;
use std::time::Duration;
use tracing::{error, info, warn};

/// Destination of transformed alerts
pub trait AlertSink {
    /// Deliver one alert; failures are reported in the outcome
    fn deliver(&self, alert: &AlertRecord) -> impl Future<Output = DispatchOutcome>;
}

/// Result of a single delivery attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// API acknowledged with 201 Created
    Delivered,
    /// Alert was not accepted
    Failed(DeliveryError),
}

impl DispatchOutcome {
    /// Whether the alert was accepted
    pub fn is_delivered(&self) -> bool {
        matches!(self, DispatchOutcome::Delivered)
    }
}

/// Dispatcher configuration
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Base URL of the alert-management API
    pub endpoint: String,
    /// API key sent as `Authorization: Key <token>`
    pub token: String,
    /// Upper bound on a whole request, connect through body
    pub request_timeout: Duration,
}

/// Posts alerts to `<endpoint>/alert`
pub struct AlertDispatcher {
    client: Client,
    alert_url: String,
    auth_header: String,
}

impl AlertDispatcher {
    /// Create a dispatcher whose requests give up after the configured timeout
    pub fn new(config: DispatcherConfig) -> Result<Self, DeliveryError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        let alert_url = format!("{}/alert", config.endpoint.trim_end_matches('/'));
        info!(
            "Creating alert dispatcher for {} (request timeout {:?})",
            alert_url, config.request_timeout
        );
        Ok(Self {
            client,
            alert_url,
            auth_header: format!("Key {}", config.token),
        })
    }

    /// Full URL alerts are posted to
    pub fn alert_url(&self) -> &str {
        &self.alert_url
    }

    /// Send an alert, logging the outcome
    pub async fn dispatch(&self, alert: &AlertRecord) -> DispatchOutcome {
        match self.send(alert).await {
            Ok(()) => {
                info!("Alert for {} sent successfully", alert.resource);
                DispatchOutcome::Delivered
            }
            Err(DeliveryError::Rejected { status, body }) => {
                warn!("Alert for {} was not accepted (HTTP {})", alert.resource, status);
                warn!("{}", body);
                DispatchOutcome::Failed(DeliveryError::Rejected { status, body })
            }
            Err(e) => {
                error!("Alert for {} could not be sent: {}", alert.resource, e);
                DispatchOutcome::Failed(e)
            }
        }
    }

    /// Send an alert, returning the delivery error instead of logging it
    pub async fn send(&self, alert: &AlertRecord) -> Result<(), DeliveryError> {
        let payload = serde_json::to_string(alert)?;
        info!("Attempting to send alert: {}", payload);

        let response = self
            .client
            .post(&self.alert_url)
            .header(AUTHORIZATION, &self.auth_header)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::CREATED {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(DeliveryError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

impl AlertSink for AlertDispatcher {
    async fn deliver(&self, alert: &AlertRecord) -> DispatchOutcome {
        self.dispatch(alert).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use status_transform::{EventType, StatusEvent, Transformer};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn alert() -> AlertRecord {
        let event = StatusEvent {
            status: "WARNING".to_string(),
            hostname: "H".to_string(),
            metric: "M".to_string(),
            endpoint_group: "G".to_string(),
            event_type: EventType::Service,
            service: "S".to_string(),
            ts_monitored: "2018-04-24T13:35:33Z".to_string(),
            ts_processed: "2018-04-24T13:36:01Z".to_string(),
            repeat: "false".to_string(),
            report: None,
        };
        Transformer::default().transform(&event).unwrap()
    }

    fn dispatcher_with_timeout(endpoint: &str, request_timeout: Duration) -> AlertDispatcher {
        AlertDispatcher::new(DispatcherConfig {
            endpoint: endpoint.to_string(),
            token: "s3cr3t".to_string(),
            request_timeout,
        })
        .unwrap()
    }

    fn dispatcher(endpoint: &str) -> AlertDispatcher {
        dispatcher_with_timeout(endpoint, Duration::from_secs(5))
    }

    /// URL of a local port nothing is listening on
    fn closed_address() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    #[test]
    fn test_trailing_slash_in_endpoint() {
        let d = dispatcher("http://alerta.example.org/api/");
        assert_eq!(d.alert_url(), "http://alerta.example.org/api/alert");
    }

    #[tokio::test]
    async fn test_created_is_delivered() {
        let server = MockServer::start().await;
        let alert = alert();
        Mock::given(method("POST"))
            .and(path("/alert"))
            .and(header("Authorization", "Key s3cr3t"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(&alert))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = dispatcher(&server.uri()).dispatch(&alert).await;
        assert_eq!(outcome, DispatchOutcome::Delivered);
    }

    #[tokio::test]
    async fn test_server_error_is_reported_not_raised() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/alert"))
            .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
            .mount(&server)
            .await;

        let outcome = dispatcher(&server.uri()).dispatch(&alert()).await;
        assert_eq!(
            outcome,
            DispatchOutcome::Failed(DeliveryError::Rejected {
                status: 500,
                body: "database down".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_ok_without_created_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let outcome = dispatcher(&server.uri()).dispatch(&alert()).await;
        assert!(!outcome.is_delivered());
    }

    #[tokio::test]
    async fn test_transport_error_is_reported() {
        let outcome = dispatcher(&closed_address()).deliver(&alert()).await;
        assert!(matches!(
            outcome,
            DispatchOutcome::Failed(DeliveryError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_slow_api_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/alert"))
            .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let d = dispatcher_with_timeout(&server.uri(), Duration::from_millis(200));
        let outcome = d.dispatch(&alert()).await;
        assert!(matches!(
            outcome,
            DispatchOutcome::Failed(DeliveryError::Transport(_))
        ));
    }
}

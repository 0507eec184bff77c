//! Catalog fetch API and the daemon-backed implementation

use hwimport_core::Discoverer;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Path of the catalog endpoint on the daemon
pub const DISCOVERERS_PATH: &str = "/api/discovery/discoverers";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Server responded with status {0}")]
    Status(u16),
    #[error("Invalid catalog payload: {0}")]
    Decode(String),
}

/// Anything that can list the available discoverers
pub trait CatalogSource: Send + Sync + 'static {
    fn list_discoverers(&self) -> impl Future<Output = Result<Vec<Discoverer>, FetchError>> + Send;
}

/// Where the daemon's REST API lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonEndpoint {
    /// HTTP(S) base URL (e.g., "http://192.168.1.100:8080")
    pub http_url: String,
}

impl DaemonEndpoint {
    /// Create an endpoint from a daemon address (host:port or full URL)
    pub fn from_daemon_address(addr: &str) -> Self {
        let addr = addr.trim().trim_end_matches('/');
        let http_url = if addr.starts_with("https://") || addr.starts_with("http://") {
            addr.to_string()
        } else {
            format!("http://{}", addr)
        };
        Self { http_url }
    }

    pub fn discoverers_url(&self) -> String {
        format!("{}{}", self.http_url, DISCOVERERS_PATH)
    }
}

/// Fetches the catalog from the daemon over HTTP
pub struct HttpCatalogSource {
    client: reqwest::Client,
    endpoint: DaemonEndpoint,
}

impl HttpCatalogSource {
    pub fn new(endpoint: DaemonEndpoint) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &DaemonEndpoint {
        &self.endpoint
    }
}

impl CatalogSource for HttpCatalogSource {
    async fn list_discoverers(&self) -> Result<Vec<Discoverer>, FetchError> {
        let url = self.endpoint.discoverers_url();
        debug!(url = %url, "Fetching discoverer catalog");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let discoverers: Vec<Discoverer> = response.json().await.map_err(|e| {
            if e.is_decode() {
                FetchError::Decode(e.to_string())
            } else {
                FetchError::Transport(e.to_string())
            }
        })?;

        info!(count = discoverers.len(), "Fetched discoverer catalog");
        Ok(discoverers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use hwimport_core::DiscovererKind;
    use serde_json::json;

    async fn serve(app: Router) -> DaemonEndpoint {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        DaemonEndpoint::from_daemon_address(&addr.to_string())
    }

    #[test]
    fn test_endpoint_from_address() {
        assert_eq!(
            DaemonEndpoint::from_daemon_address("192.168.1.100:8080").discoverers_url(),
            "http://192.168.1.100:8080/api/discovery/discoverers"
        );
        assert_eq!(
            DaemonEndpoint::from_daemon_address("https://hub.local/").http_url,
            "https://hub.local"
        );
    }

    #[tokio::test]
    async fn test_fetch_catalog() {
        let app = Router::new().route(
            DISCOVERERS_PATH,
            get(|| async {
                Json(json!([
                    {"id": "a", "name": "Router", "type": "ScanDevices"},
                    {"id": "b", "name": "Manual", "type": "FromString", "hint": "csv"}
                ]))
            }),
        );
        let source = HttpCatalogSource::new(serve(app).await).unwrap();

        let catalog = source.list_discoverers().await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].kind, DiscovererKind::ScanDevices);
        assert_eq!(catalog[1].config.get("hint"), Some(&json!("csv")));
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let app = Router::new().route(
            DISCOVERERS_PATH,
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let source = HttpCatalogSource::new(serve(app).await).unwrap();
        assert_eq!(source.list_discoverers().await, Err(FetchError::Status(500)));
    }

    #[tokio::test]
    async fn test_fetch_error_decode() {
        let app = Router::new().route(DISCOVERERS_PATH, get(|| async { "not json" }));
        let source = HttpCatalogSource::new(serve(app).await).unwrap();
        assert!(matches!(
            source.list_discoverers().await,
            Err(FetchError::Decode(_))
        ));
    }
}

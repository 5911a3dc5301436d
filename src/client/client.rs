//! Tracking Backend REST Client
//!
//! HTTP client for the shipment/RFID backend. Each operation comes in two
//! flavours: a `try_` method returning [`ClientResult`], and a fallback
//! method that logs the failure and hands back an empty value instead.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::Instrument;

use super::endpoint::{Endpoint, Method};
use super::error::{ClientError, ClientResult};

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Configuration for the tracking client
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to (e.g., "http://localhost:8000/api")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in milliseconds; `None` keeps the transport default
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: None,
        }
    }
}

impl ClientConfig {
    /// Config pointing at `base_url` with no timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// REST client for the tracking backend
///
/// Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder.build().map_err(ClientError::Build)?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issue one request and decode the JSON body
    ///
    /// Non-2xx responses and undecodable bodies are errors.
    pub async fn request<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> ClientResult<T> {
        let request_id = uuid::Uuid::new_v4();
        let span = tracing::debug_span!(
            "api_request",
            operation = endpoint.operation,
            method = endpoint.method.as_str(),
            path = %endpoint.path,
            request_id = %request_id,
        );

        async move {
            let url = endpoint.url(&self.config.base_url);

            let mut builder = match endpoint.method {
                Method::Get => self.client.get(&url),
                Method::Post => self.client.post(&url),
            };
            if let Some(payload) = &endpoint.payload {
                builder = builder.json(payload);
            }

            let response = builder.send().await?;
            let status = response.status();

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(ClientError::Status {
                    status: status.as_u16(),
                    message,
                });
            }

            let bytes = response.bytes().await?;
            let body = serde_json::from_slice(&bytes)?;

            tracing::debug!(status = status.as_u16(), bytes = bytes.len(), "Request completed");
            Ok(body)
        }
        .instrument(span)
        .await
    }

    /// Issue one request, swallowing any failure into `fallback`
    async fn request_or<T: DeserializeOwned>(&self, endpoint: Endpoint, fallback: T) -> T {
        let result = self.request(&endpoint).await;
        recover(endpoint.operation, result, fallback)
    }

    // ============ Tagged operations ============

    pub async fn try_list_shipments(&self) -> ClientResult<Vec<Value>> {
        self.request(&Endpoint::list_shipments()).await
    }

    pub async fn try_fetch_mock_data(&self) -> ClientResult<Value> {
        self.request(&Endpoint::mock_data()).await
    }

    pub async fn try_scan_rfid(&self) -> ClientResult<Value> {
        self.request(&Endpoint::rfid_scan()).await
    }

    pub async fn try_pair_rfid(&self, uid: &str, item_id: &str) -> ClientResult<Value> {
        self.request(&Endpoint::rfid_pair(uid, item_id)).await
    }

    pub async fn try_fetch_manifest(&self, shipment_id: &str) -> ClientResult<Value> {
        self.request(&Endpoint::manifest(shipment_id)).await
    }

    pub async fn try_fetch_item(&self, item_id: &str) -> ClientResult<Value> {
        self.request(&Endpoint::item(item_id)).await
    }

    // ============ Fallback operations ============

    /// List shipments, or an empty list if the request fails
    pub async fn list_shipments(&self) -> Vec<Value> {
        self.request_or(Endpoint::list_shipments(), Vec::new()).await
    }

    /// Fetch the backend's mock dataset
    pub async fn fetch_mock_data(&self) -> Option<Value> {
        self.request_or(Endpoint::mock_data(), None).await
    }

    /// Ask the reader for the tag currently in range
    pub async fn scan_rfid(&self) -> Option<Value> {
        self.request_or(Endpoint::rfid_scan(), None).await
    }

    /// Pair tag `uid` with item `item_id`
    pub async fn pair_rfid(&self, uid: &str, item_id: &str) -> Option<Value> {
        self.request_or(Endpoint::rfid_pair(uid, item_id), None).await
    }

    pub async fn fetch_manifest(&self, shipment_id: &str) -> Option<Value> {
        self.request_or(Endpoint::manifest(shipment_id), None).await
    }

    pub async fn fetch_item(&self, item_id: &str) -> Option<Value> {
        self.request_or(Endpoint::item(item_id), None).await
    }
}

/// Unwrap `result`, logging a failure and returning `fallback` in its place
///
/// A fallback is indistinguishable from a legitimately empty answer; the log
/// line is the only trace. Callers that care use the `try_` operations.
pub fn recover<T>(operation: &str, result: ClientResult<T>, fallback: T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(operation = %operation, error = %e, "Failed to {}", operation);
            fallback
        }
    }
}

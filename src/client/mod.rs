//! Tracking Backend Client
//!
//! Talks to the shipment/RFID REST backend.
//!
//! ## Endpoints
//!
//! - `GET  /shipments/` - List shipments
//! - `GET  /mock-data` - Backend mock dataset
//! - `GET  /rfid/scan` - Tag currently in reader range
//! - `POST /rfid/pair` - Pair a tag with an item (`{ uid, itemId }`)
//! - `GET  /manifests/{shipmentId}` - Shipment manifest
//! - `GET  /items/{itemId}` - Single item
//!
//! ## Failure handling
//!
//! The plain operations never fail: a transport error, non-2xx status or
//! undecodable body is logged and replaced by an empty list or `None`.
//! The `try_` operations surface the same failures as [`ClientError`].

#[allow(clippy::module_inception)]
mod client;
mod endpoint;
mod error;

pub use client::{recover, ApiClient, ClientConfig, DEFAULT_BASE_URL};
pub use endpoint::{Endpoint, Method};
pub use error::{ClientError, ClientResult};

use async_trait::async_trait;
use serde_json::Value;

/// Fallback-style access to the tracking backend
///
/// Implemented by [`ApiClient`]; view loaders take `&dyn ShipmentApi` so a
/// canned implementation can stand in for the network.
#[async_trait]
pub trait ShipmentApi: Send + Sync {
    async fn list_shipments(&self) -> Vec<Value>;

    async fn fetch_mock_data(&self) -> Option<Value>;

    async fn scan_rfid(&self) -> Option<Value>;

    async fn pair_rfid(&self, uid: &str, item_id: &str) -> Option<Value>;

    async fn fetch_manifest(&self, shipment_id: &str) -> Option<Value>;

    async fn fetch_item(&self, item_id: &str) -> Option<Value>;
}

#[async_trait]
impl ShipmentApi for ApiClient {
    async fn list_shipments(&self) -> Vec<Value> {
        ApiClient::list_shipments(self).await
    }

    async fn fetch_mock_data(&self) -> Option<Value> {
        ApiClient::fetch_mock_data(self).await
    }

    async fn scan_rfid(&self) -> Option<Value> {
        ApiClient::scan_rfid(self).await
    }

    async fn pair_rfid(&self, uid: &str, item_id: &str) -> Option<Value> {
        ApiClient::pair_rfid(self, uid, item_id).await
    }

    async fn fetch_manifest(&self, shipment_id: &str) -> Option<Value> {
        ApiClient::fetch_manifest(self, shipment_id).await
    }

    async fn fetch_item(&self, item_id: &str) -> Option<Value> {
        ApiClient::fetch_item(self, item_id).await
    }
}

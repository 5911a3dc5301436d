//! Endpoint Descriptions
//!
//! One `Endpoint` per backend capability. Built fresh for every call.

use serde_json::{json, Value};

/// HTTP method used by an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A single request against the backend: operation name, method, path and payload
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// Operation name used in diagnostics
    pub operation: &'static str,
    pub method: Method,
    /// Path below the base URL, always starting with `/`
    pub path: String,
    pub payload: Option<Value>,
}

impl Endpoint {
    fn get(operation: &'static str, path: impl Into<String>) -> Self {
        Self {
            operation,
            method: Method::Get,
            path: path.into(),
            payload: None,
        }
    }

    pub fn list_shipments() -> Self {
        Self::get("list shipments", "/shipments/")
    }

    pub fn mock_data() -> Self {
        Self::get("fetch mock data", "/mock-data")
    }

    pub fn rfid_scan() -> Self {
        Self::get("scan RFID tag", "/rfid/scan")
    }

    /// Pairing sends exactly `{ "uid", "itemId" }`
    pub fn rfid_pair(uid: &str, item_id: &str) -> Self {
        Self {
            operation: "pair RFID tag",
            method: Method::Post,
            path: "/rfid/pair".to_string(),
            payload: Some(json!({ "uid": uid, "itemId": item_id })),
        }
    }

    pub fn manifest(shipment_id: &str) -> Self {
        Self::get(
            "fetch manifest",
            format!("/manifests/{}", urlencoding::encode(shipment_id)),
        )
    }

    pub fn item(item_id: &str) -> Self {
        Self::get("fetch item", format!("/items/{}", urlencoding::encode(item_id)))
    }

    /// Full URL for this endpoint under `base_url`
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path)
    }
}

//! Dashboard Shell Routes
//!
//! The dashboard has three views, each mounted at a path:
//!
//! - `/` - Shipments overview
//! - `/scan` - RFID scanner
//! - `/manifests/:shipmentId` - Manifest of one shipment
//!
//! [`load_view`] fetches whatever a view renders from, falling back to an
//! empty view on failure. [`try_load_view`] reports the failure instead.

use serde::Serialize;
use serde_json::Value;

use crate::client::{ApiClient, ClientResult, ShipmentApi};

/// A resolved route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Shipments,
    Scanner,
    Manifest { shipment_id: String },
}

impl Route {
    /// Map a path to a view; `None` for anything unknown
    ///
    /// One trailing slash is tolerated; empty segments (`//scan`) are not.
    /// The shipment id is percent-decoded.
    pub fn resolve(path: &str) -> Option<Self> {
        let rest = path.trim().strip_prefix('/')?;
        if rest.is_empty() {
            return Some(Route::Shipments);
        }

        let rest = rest.strip_suffix('/').unwrap_or(rest);
        let segments: Vec<&str> = rest.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }

        match segments.as_slice() {
            ["scan"] => Some(Route::Scanner),
            ["manifests", id] => Some(Route::Manifest {
                shipment_id: urlencoding::decode(id).ok()?.into_owned(),
            }),
            _ => None,
        }
    }

    /// Canonical path of this route
    pub fn path(&self) -> String {
        match self {
            Route::Shipments => "/".to_string(),
            Route::Scanner => "/scan".to_string(),
            Route::Manifest { shipment_id } => {
                format!("/manifests/{}", urlencoding::encode(shipment_id))
            }
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Shipments => "Shipments",
            Route::Scanner => "RFID Scanner",
            Route::Manifest { .. } => "Manifest",
        }
    }
}

/// Data backing a rendered view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewData {
    Shipments { shipments: Vec<Value> },
    Scanner { tag: Option<Value> },
    Manifest { shipment_id: String, manifest: Option<Value> },
}

impl ViewData {
    /// True when the view has nothing to show (empty list or absent value)
    pub fn is_empty(&self) -> bool {
        match self {
            ViewData::Shipments { shipments } => shipments.is_empty(),
            ViewData::Scanner { tag } => tag.is_none(),
            ViewData::Manifest { manifest, .. } => manifest.is_none(),
        }
    }
}

/// Fetch the data for `route`
pub async fn load_view(api: &dyn ShipmentApi, route: &Route) -> ViewData {
    tracing::debug!(path = %route.path(), "Loading view");

    match route {
        Route::Shipments => ViewData::Shipments {
            shipments: api.list_shipments().await,
        },
        Route::Scanner => ViewData::Scanner {
            tag: api.scan_rfid().await,
        },
        Route::Manifest { shipment_id } => ViewData::Manifest {
            shipment_id: shipment_id.clone(),
            manifest: api.fetch_manifest(shipment_id).await,
        },
    }
}

/// Fetch the data for `route`, surfacing request failures
///
/// A successful empty answer is `Ok`, never an error.
pub async fn try_load_view(client: &ApiClient, route: &Route) -> ClientResult<ViewData> {
    tracing::debug!(path = %route.path(), "Loading view");

    let data = match route {
        Route::Shipments => ViewData::Shipments {
            shipments: client.try_list_shipments().await?,
        },
        Route::Scanner => ViewData::Scanner {
            tag: Some(client.try_scan_rfid().await?),
        },
        Route::Manifest { shipment_id } => ViewData::Manifest {
            shipment_id: shipment_id.clone(),
            manifest: Some(client.try_fetch_manifest(shipment_id).await?),
        },
    };
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientConfig;
    use async_trait::async_trait;
    use axum::{routing::get, Json, Router};
    use serde_json::json;

    /// Canned backend: one shipment, one tag, manifests only for SH-1
    struct CannedApi;

    #[async_trait]
    impl ShipmentApi for CannedApi {
        async fn list_shipments(&self) -> Vec<Value> {
            vec![json!({ "id": "SH-1" })]
        }

        async fn fetch_mock_data(&self) -> Option<Value> {
            None
        }

        async fn scan_rfid(&self) -> Option<Value> {
            Some(json!({ "uid": "E200-01" }))
        }

        async fn pair_rfid(&self, _uid: &str, _item_id: &str) -> Option<Value> {
            None
        }

        async fn fetch_manifest(&self, shipment_id: &str) -> Option<Value> {
            (shipment_id == "SH-1").then(|| json!({ "shipmentId": "SH-1" }))
        }

        async fn fetch_item(&self, _item_id: &str) -> Option<Value> {
            None
        }
    }

    #[test]
    fn test_resolve() {
        assert_eq!(Route::resolve("/"), Some(Route::Shipments));
        assert_eq!(Route::resolve(""), None);
        assert_eq!(Route::resolve("/scan"), Some(Route::Scanner));
        assert_eq!(Route::resolve("/scan/"), Some(Route::Scanner));
        assert_eq!(
            Route::resolve("/manifests/SH-1"),
            Some(Route::Manifest {
                shipment_id: "SH-1".to_string()
            })
        );
        assert_eq!(Route::resolve("/manifests"), None);
        assert_eq!(Route::resolve("/manifests/SH-1/extra"), None);
        assert_eq!(Route::resolve("/settings"), None);
        assert_eq!(Route::resolve("scan"), None);
        assert_eq!(Route::resolve("//scan"), None);
        assert_eq!(Route::resolve("//"), None);
        assert_eq!(Route::resolve("/manifests//"), None);
    }

    #[test]
    fn test_manifest_id_is_decoded_once() {
        let route = Route::resolve("/manifests/a%2Fb").unwrap();
        assert_eq!(
            route,
            Route::Manifest {
                shipment_id: "a/b".to_string()
            }
        );
        assert_eq!(route.path(), "/manifests/a%2Fb");
        assert_eq!(crate::client::Endpoint::manifest("a/b").path, "/manifests/a%2Fb");
    }

    #[test]
    fn test_path_resolves_back() {
        let routes = [
            Route::Shipments,
            Route::Scanner,
            Route::Manifest {
                shipment_id: "SH-9".to_string(),
            },
            Route::Manifest {
                shipment_id: "a/b c".to_string(),
            },
        ];
        for route in routes {
            assert_eq!(Route::resolve(&route.path()), Some(route));
        }
    }

    #[tokio::test]
    async fn test_load_views() {
        let shipments = load_view(&CannedApi, &Route::Shipments).await;
        assert_eq!(
            shipments,
            ViewData::Shipments {
                shipments: vec![json!({ "id": "SH-1" })]
            }
        );

        let scanner = load_view(&CannedApi, &Route::Scanner).await;
        assert!(!scanner.is_empty());

        let missing = load_view(
            &CannedApi,
            &Route::Manifest {
                shipment_id: "SH-2".to_string(),
            },
        )
        .await;
        assert!(missing.is_empty());
    }

    #[test]
    fn test_view_data_serializes_with_tag() {
        let data = ViewData::Scanner { tag: None };
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({ "view": "scanner", "tag": null })
        );
    }

    #[tokio::test]
    async fn test_strict_load_keeps_empty_list() {
        let backend = Router::new().route("/api/shipments/", get(|| async { Json(json!([])) }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, backend).await.unwrap();
        });
        let client = ApiClient::new(ClientConfig::new(format!("http://{}/api", addr))).unwrap();

        let data = try_load_view(&client, &Route::Shipments).await.unwrap();
        assert_eq!(data, ViewData::Shipments { shipments: vec![] });
    }

    #[tokio::test]
    async fn test_strict_load_reports_connection_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = ApiClient::new(ClientConfig::new(format!("http://{}/api", addr))).unwrap();

        let err = try_load_view(&client, &Route::Shipments).await.unwrap_err();
        assert!(err.is_unreachable());
    }
}

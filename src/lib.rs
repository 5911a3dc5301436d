//! # Shiptrack
//!
//! Client side of a shipment and RFID tracking dashboard.
//!
//! ## Modules
//!
//! - [`client`]: REST client for the tracking backend
//! - [`theme`]: Static dashboard color palette
//! - [`shell`]: Dashboard routes and view loading
//! - [`config`]: TOML + environment configuration
//! - [`telemetry`]: Logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shiptrack::client::{ApiClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::new("http://localhost:8000/api"))?;
//!
//!     // Never fails: an unreachable backend yields None
//!     if let Some(item) = client.fetch_item("X1").await {
//!         println!("{}", item);
//!     }
//!
//!     // Tagged variant when a failure must be told apart from "empty"
//!     let shipments = client.try_list_shipments().await?;
//!     println!("{} shipments", shipments.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod shell;
pub mod telemetry;
pub mod theme;

pub use client::{ApiClient, ClientConfig, ClientError, ClientResult, Endpoint, ShipmentApi};
pub use config::{Config, ConfigError, LoadedConfig, LogFormat, LoggingConfig};
pub use shell::{load_view, try_load_view, Route, ViewData};

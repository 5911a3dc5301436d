//! Shiptrack CLI
//!
//! Terminal front end for the tracking backend:
//! - Query shipments, manifests and items
//! - Scan and pair RFID tags
//! - Open a dashboard view by path
//! - Inspect the color palette

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

use shiptrack::client::ApiClient;
use shiptrack::config::{generate_default_config, Config};
use shiptrack::shell::{load_view, try_load_view, Route};
use shiptrack::{telemetry, theme};

#[derive(Parser)]
#[command(name = "shiptrack")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Shipment and RFID tracking dashboard client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (overrides config and SHIPTRACK_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Fail on request errors instead of printing an empty result
    #[arg(long, global = true)]
    pub strict: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List shipments
    Shipments,

    /// Show the backend's mock dataset
    MockData,

    /// Read the RFID tag currently in range
    Scan,

    /// Pair an RFID tag with an item
    Pair {
        /// Tag UID
        uid: String,
        /// Item identifier
        item_id: String,
    },

    /// Show a shipment manifest
    Manifest {
        shipment_id: String,
    },

    /// Show a single item
    Item {
        item_id: String,
    },

    /// Open a dashboard view by path (/, /scan, /manifests/<id>)
    Open {
        path: String,
    },

    /// Show the color palette, or one role
    Theme {
        role: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    telemetry::init_logging(&loaded.config.logging).context("Failed to initialize logging")?;
    loaded.report();

    let mut config = loaded.config;
    if let Some(url) = &cli.api_url {
        config.client.base_url = url.clone();
    }

    let client = ApiClient::new(config.client.clone())?;
    tracing::debug!("Using backend {}", client.config().base_url);

    let output = match cli.command {
        Commands::Shipments => {
            if cli.strict {
                Value::Array(client.try_list_shipments().await?)
            } else {
                Value::Array(client.list_shipments().await)
            }
        }
        Commands::MockData => {
            if cli.strict {
                client.try_fetch_mock_data().await?
            } else {
                client.fetch_mock_data().await.unwrap_or(Value::Null)
            }
        }
        Commands::Scan => {
            if cli.strict {
                client.try_scan_rfid().await?
            } else {
                client.scan_rfid().await.unwrap_or(Value::Null)
            }
        }
        Commands::Pair { uid, item_id } => {
            if cli.strict {
                client.try_pair_rfid(&uid, &item_id).await?
            } else {
                client.pair_rfid(&uid, &item_id).await.unwrap_or(Value::Null)
            }
        }
        Commands::Manifest { shipment_id } => {
            if cli.strict {
                client.try_fetch_manifest(&shipment_id).await?
            } else {
                client.fetch_manifest(&shipment_id).await.unwrap_or(Value::Null)
            }
        }
        Commands::Item { item_id } => {
            if cli.strict {
                client.try_fetch_item(&item_id).await?
            } else {
                client.fetch_item(&item_id).await.unwrap_or(Value::Null)
            }
        }
        Commands::Open { path } => {
            let Some(route) = Route::resolve(&path) else {
                bail!("No view at {}", path);
            };
            println!("# {}", route.title());

            let data = if cli.strict {
                try_load_view(&client, &route).await?
            } else {
                load_view(&client, &route).await
            };
            serde_json::to_value(&data)?
        }
        Commands::Theme { role } => return show_theme(role.as_deref()),
        Commands::Config { output } => return write_config(output),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn write_config(output: Option<PathBuf>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(&path, content).with_context(|| format!("Failed to write {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn show_theme(role: Option<&str>) -> anyhow::Result<()> {
    match role {
        Some(name) => {
            let Some(hex) = theme::color(name) else {
                bail!("Unknown color role: {}", name);
            };
            println!("{}", swatch(name, hex));
        }
        None => {
            for (name, hex) in theme::entries() {
                println!("{}", swatch(name, hex));
            }
        }
    }
    Ok(())
}

fn swatch(name: &str, hex: &str) -> String {
    match theme::rgb(hex) {
        Some((r, g, b)) => format!("\x1b[48;2;{};{};{}m    \x1b[0m {:<16} {}", r, g, b, name, hex),
        None => format!("     {:<16} {}", name, hex),
    }
}

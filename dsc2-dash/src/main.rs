//! dsc2-dash (Dashboard) - Read-only operational dashboard
//!
//! Serves summary metrics, timelines, rollups, and exportable reports over
//! the IVA event log and the access-control decision log. Both sources are
//! re-read on every request; missing files degrade to warnings, never to a
//! dead page.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dsc2_common::config::{resolve_data_folder, DataPaths};
use dsc2_dash::{build_router, AppState};

/// Command-line arguments for dsc2-dash
#[derive(Parser, Debug)]
#[command(name = "dsc2-dash")]
#[command(about = "Operational dashboard for IVA and access-control logs")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5730", env = "DSC2_PORT")]
    port: u16,

    /// Folder holding iva_logs.csv, access_logs.json, and heatmap.png
    #[arg(short, long)]
    data_folder: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dsc2_dash=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("Starting DS-C2 Dashboard (dsc2-dash) v{}", env!("CARGO_PKG_VERSION"));

    let folder = resolve_data_folder(args.data_folder.as_deref());
    info!("Data folder: {}", folder.display());

    let paths = DataPaths::new(folder);
    if !paths.iva_log().exists() {
        warn!("IVA log not found at {}", paths.iva_log().display());
    }
    if !paths.access_log().exists() {
        warn!("Access log not found at {}", paths.access_log().display());
    }

    let state = AppState::new(paths);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port))
        .await
        .with_context(|| format!("Failed to bind port {}", args.port))?;
    info!("dsc2-dash listening on http://127.0.0.1:{}", args.port);
    info!("Health check: http://127.0.0.1:{}/health", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}

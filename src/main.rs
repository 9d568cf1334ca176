//! openclaw-api - Mock fleet API server for the OpenClaw dashboard
//!
//! Seeds the in-memory fleet snapshot, then serves the HTTP API until
//! interrupted. All data is fabricated at startup; nothing persists.

use clap::Parser;
use openclaw_core::{ApiServer, ApiServerConfig, FleetSnapshot};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "openclaw-api")]
#[command(about = "Mock fleet monitoring and command API for the OpenClaw dashboard")]
#[command(version)]
struct Cli {
    /// Address to bind
    #[arg(long, env = "OPENCLAW_API_HOST", default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to bind (falls back to the next ten ports if taken)
    #[arg(long, env = "OPENCLAW_API_PORT", default_value = "8000")]
    port: u16,

    /// Dashboard origin allowed by CORS
    #[arg(
        long,
        env = "OPENCLAW_API_CORS_ORIGIN",
        default_value = "http://localhost:5173"
    )]
    cors_origin: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let fleet = Arc::new(FleetSnapshot::seeded());
    info!(
        "Seeded fleet: {} agents, {} tasks, {} heartbeats, {} alerts",
        fleet.agents().len(),
        fleet.tasks().len(),
        fleet.heartbeats().len(),
        fleet.alerts().len()
    );

    let config = ApiServerConfig {
        addr: SocketAddr::new(cli.host, cli.port),
        cors_origin: cli.cors_origin,
    };

    ApiServer::new(config, fleet).serve().await
}

//! HTTP server and request handlers
//!
//! Every handler reads from the shared [`FleetSnapshot`]; nothing mutates
//! it, so the state is just an `Arc` with no lock. The command endpoint
//! acknowledges and echoes without dispatching anything.

use crate::error::{OrchestratorError, Result};
use crate::fleet::FleetSnapshot;
use crate::types::{Agent, Alert, Command, Heartbeat, PerformanceMetrics, Task};
use axum::{
    extract::{Path, State},
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info};

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Server address
    pub addr: SocketAddr,
    /// Dashboard development origin allowed by CORS
    pub cors_origin: String,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            addr: ([127, 0, 0, 1], 8000).into(),
            cors_origin: "http://localhost:5173".to_string(),
        }
    }
}

/// API server
pub struct ApiServer {
    config: ApiServerConfig,
    fleet: Arc<FleetSnapshot>,
}

impl ApiServer {
    /// Create new API server over an already seeded snapshot
    pub fn new(config: ApiServerConfig, fleet: Arc<FleetSnapshot>) -> Self {
        Self { config, fleet }
    }

    /// Start serving with dynamic port allocation
    ///
    /// Tries the configured address first, then attempts alternative ports
    /// if the primary port is unavailable.
    pub async fn serve(self) -> anyhow::Result<()> {
        let origin: HeaderValue = self.config.cors_origin.parse().map_err(|_| {
            anyhow::anyhow!("invalid CORS origin: {}", self.config.cors_origin)
        })?;
        let app = router(self.fleet.clone(), origin);

        // Try configured address first
        match tokio::net::TcpListener::bind(self.config.addr).await {
            Ok(listener) => {
                info!("Orchestrator API listening on http://{}", self.config.addr);
                axum::serve(listener, app).await?;
                return Ok(());
            }
            Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
                debug!(
                    "Port {} in use, trying alternative ports...",
                    self.config.addr.port()
                );
            }
            Err(e) => return Err(e.into()),
        }

        // Try alternative ports
        let base_port = self.config.addr.port();
        for offset in 1..=10 {
            let alt_addr = SocketAddr::new(self.config.addr.ip(), base_port + offset);

            match tokio::net::TcpListener::bind(alt_addr).await {
                Ok(listener) => {
                    info!("Orchestrator API listening on http://{}", alt_addr);
                    axum::serve(listener, app).await?;
                    return Ok(());
                }
                Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(anyhow::anyhow!(
            "All ports ({}-{}) are in use, orchestrator API unavailable",
            base_port,
            base_port + 10
        ))
    }
}

/// Build the application router
pub fn router(fleet: Arc<FleetSnapshot>, cors_origin: HeaderValue) -> Router {
    // Credentials + wildcard is rejected by tower-http, so methods and
    // headers mirror the request instead of using Any.
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Agent directory
        .route("/agents", get(list_agents_handler))
        .route("/agents/:agent_id", get(get_agent_handler))
        .route("/agents/:agent_id/tasks", get(agent_tasks_handler))
        .route("/agents/:agent_id/commands", post(send_command_handler))
        // Fleet-wide collections
        .route("/tasks", get(list_tasks_handler))
        .route("/heartbeats/recent", get(recent_heartbeats_handler))
        .route("/alerts", get(list_alerts_handler))
        .route("/metrics/performance", get(performance_metrics_handler))
        // State
        .with_state(fleet)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Health check handler
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    timestamp: DateTime<Utc>,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
    })
}

/// List agents handler
async fn list_agents_handler(State(fleet): State<Arc<FleetSnapshot>>) -> Json<Vec<Agent>> {
    Json(fleet.agents().to_vec())
}

/// Single agent lookup handler
async fn get_agent_handler(
    State(fleet): State<Arc<FleetSnapshot>>,
    Path(agent_id): Path<String>,
) -> Result<Json<Agent>> {
    fleet
        .agent(&agent_id)
        .cloned()
        .map(Json)
        .ok_or(OrchestratorError::AgentNotFound(agent_id))
}

/// Per-agent task list handler
///
/// Unknown agent ids get an empty list, never a 404.
async fn agent_tasks_handler(
    State(fleet): State<Arc<FleetSnapshot>>,
    Path(agent_id): Path<String>,
) -> Json<Vec<Task>> {
    Json(fleet.tasks_for_agent(&agent_id))
}

/// List tasks handler
async fn list_tasks_handler(State(fleet): State<Arc<FleetSnapshot>>) -> Json<Vec<Task>> {
    Json(fleet.tasks().to_vec())
}

/// Recent heartbeats handler
async fn recent_heartbeats_handler(
    State(fleet): State<Arc<FleetSnapshot>>,
) -> Json<Vec<Heartbeat>> {
    Json(fleet.heartbeats().to_vec())
}

/// List alerts handler
async fn list_alerts_handler(State(fleet): State<Arc<FleetSnapshot>>) -> Json<Vec<Alert>> {
    Json(fleet.alerts().to_vec())
}

/// Performance metrics handler
async fn performance_metrics_handler(
    State(fleet): State<Arc<FleetSnapshot>>,
) -> Json<Vec<PerformanceMetrics>> {
    Json(fleet.performance().to_vec())
}

/// Acknowledgement returned by the command stub
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandAck {
    pub agent_id: String,
    pub command: Command,
    pub status: String,
    pub message: String,
}

/// Command submission handler
///
/// Echo-only stub: accepts any agent id and any well-formed command, and
/// never dispatches to a runtime.
async fn send_command_handler(
    Path(agent_id): Path<String>,
    Json(command): Json<Command>,
) -> Json<CommandAck> {
    debug!("Received command '{}' for {}", command.command_type, agent_id);

    Json(CommandAck {
        agent_id,
        command,
        status: "accepted".to_string(),
        message: "Command queued (mock)".to_string(),
    })
}

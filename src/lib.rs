//! OpenClaw Agent Orchestrator API
//!
//! Mock backend for the OpenClaw fleet dashboard. Serves a read-only view
//! of a fabricated agent fleet (agents, tasks, heartbeats, alerts,
//! performance metrics) plus a stub command endpoint that acknowledges
//! without dispatching.
//!
//! The fleet is seeded once at startup into an immutable [`FleetSnapshot`]
//! and shared with handlers through an `Arc`; no request ever mutates it.

pub mod api;
pub mod error;
pub mod fleet;
pub mod types;

// Re-export commonly used types
pub use api::{router, ApiServer, ApiServerConfig, CommandAck};
pub use error::{OrchestratorError, Result};
pub use fleet::FleetSnapshot;
pub use types::{
    Agent, AgentStatus, AgentType, Alert, AlertSeverity, Command, Heartbeat, PerformanceMetrics,
    Task, TaskStatus,
};

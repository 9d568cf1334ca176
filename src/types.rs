//! Core data structures for the agent fleet
//!
//! Wire formats match what the dashboard expects: closed string enums for
//! statuses and severities, ISO-8601 timestamps, and explicit `null` for
//! absent optional fields (no field skipping).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which runtime family an agent belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AgentType {
    #[serde(rename = "CrewAI")]
    CrewAi,
    LangGraph,
    #[serde(rename = "BeeAI")]
    BeeAi,
    OpenClaw,
    Admin,
}

/// Agent liveness/activity state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Online,
    Offline,
    Busy,
    Error,
}

/// Task execution state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

/// Alert severity level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

/// A monitored AI worker process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Unique agent id
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Runtime family
    #[serde(rename = "type")]
    pub agent_type: AgentType,
    /// Current status
    pub status: AgentStatus,
    /// Last heartbeat timestamp
    pub last_heartbeat: DateTime<Utc>,
    /// Weak reference to the task the agent is working on, if any
    #[serde(default)]
    pub current_task_id: Option<String>,
}

/// A unit of work attributed to one agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task id
    pub id: String,
    /// Weak reference to the owning agent
    pub agent_id: String,
    /// What the task does
    pub description: String,
    /// Execution state
    pub status: TaskStatus,
    /// When execution started
    pub started_at: DateTime<Utc>,
    /// When execution finished; >= started_at when set
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    /// Result summary, expected for completed/failed tasks
    #[serde(default)]
    pub output_summary: Option<String>,
}

/// A point-in-time liveness/status snapshot emitted by an agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heartbeat {
    /// Unique heartbeat id
    pub id: String,
    /// Weak reference to the emitting agent
    pub agent_id: String,
    /// When the heartbeat was emitted
    pub timestamp: DateTime<Utc>,
    /// Agent status at emission time
    pub status: AgentStatus,
    /// Open metadata (arbitrary JSON values)
    #[serde(default)]
    pub meta: Map<String, Value>,
}

/// A generated notice about an agent or task condition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Unique alert id
    pub id: String,
    /// Severity level
    pub severity: AlertSeverity,
    /// Human-readable message
    pub message: String,
    /// Weak reference to the related agent, if any
    #[serde(default)]
    pub related_agent_id: Option<String>,
    /// Weak reference to the related task, if any
    #[serde(default)]
    pub related_task_id: Option<String>,
    /// When the alert was raised
    pub created_at: DateTime<Utc>,
    /// When the alert was resolved; unset while open
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Current performance snapshot for one agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Weak reference to the measured agent
    pub agent_id: String,
    /// CPU usage percentage
    pub cpu_usage: f64,
    /// Memory usage percentage
    pub memory_usage: f64,
    /// Task throughput
    pub tasks_per_minute: f64,
    /// Error rate
    pub error_rate_per_hour: f64,
}

/// An instruction submitted for an agent
///
/// Transient: constructed from a request body, echoed back in the
/// acknowledgement, never stored. `type` is deliberately free-form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Command {
    /// Free-form command tag
    #[serde(rename = "type")]
    pub command_type: String,
    /// Optional open payload
    #[serde(default)]
    pub payload: Option<Map<String, Value>>,
}

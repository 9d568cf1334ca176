//! Immutable fleet snapshot and the queries the API answers from it
//!
//! The snapshot is built once at process start, wrapped in `Arc`, and
//! handed to request handlers. Nothing mutates it afterwards, so no
//! locking is needed no matter how many requests run in parallel.

use crate::types::{
    Agent, AgentStatus, AgentType, Alert, AlertSeverity, Heartbeat, PerformanceMetrics, Task,
    TaskStatus,
};
use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value};

/// In-memory view of the whole agent fleet at a single point in time
#[derive(Debug, Clone)]
pub struct FleetSnapshot {
    agents: Vec<Agent>,
    tasks: Vec<Task>,
    heartbeats: Vec<Heartbeat>,
    alerts: Vec<Alert>,
    performance: Vec<PerformanceMetrics>,
}

fn meta(entries: &[(&str, Value)]) -> Map<String, Value> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

impl FleetSnapshot {
    /// Build the fabricated fleet used by the mock API
    ///
    /// Timestamps are offsets from "now" at construction so the dashboard
    /// always sees plausibly fresh data.
    pub fn seeded() -> Self {
        Self::seeded_at(Utc::now())
    }

    /// Same as [`seeded`](Self::seeded) with an explicit reference time
    pub fn seeded_at(now: DateTime<Utc>) -> Self {
        let agents = vec![
            Agent {
                id: "agent-crewai-researcher".to_string(),
                name: "CrewAI Researcher".to_string(),
                agent_type: AgentType::CrewAi,
                status: AgentStatus::Busy,
                last_heartbeat: now - Duration::seconds(10),
                current_task_id: Some("task-1".to_string()),
            },
            Agent {
                id: "agent-langgraph-orchestrator".to_string(),
                name: "LangGraph Orchestrator".to_string(),
                agent_type: AgentType::LangGraph,
                status: AgentStatus::Online,
                last_heartbeat: now - Duration::seconds(5),
                current_task_id: None,
            },
            Agent {
                id: "agent-beeai-pm".to_string(),
                name: "BeeAI Project Manager".to_string(),
                agent_type: AgentType::BeeAi,
                status: AgentStatus::Online,
                last_heartbeat: now - Duration::seconds(20),
                current_task_id: Some("task-2".to_string()),
            },
            Agent {
                id: "agent-openclaw-1".to_string(),
                name: "OpenClaw Agent 1".to_string(),
                agent_type: AgentType::OpenClaw,
                status: AgentStatus::Offline,
                last_heartbeat: now - Duration::minutes(15),
                current_task_id: None,
            },
            Agent {
                id: "agent-admin-client".to_string(),
                name: "OpenClaw Admin Client".to_string(),
                agent_type: AgentType::Admin,
                status: AgentStatus::Online,
                last_heartbeat: now - Duration::seconds(30),
                current_task_id: None,
            },
        ];

        let tasks = vec![
            Task {
                id: "task-1".to_string(),
                agent_id: "agent-crewai-researcher".to_string(),
                description: "Research latest AI maturity models".to_string(),
                status: TaskStatus::Running,
                started_at: now - Duration::minutes(5),
                finished_at: None,
                output_summary: None,
            },
            Task {
                id: "task-2".to_string(),
                agent_id: "agent-beeai-pm".to_string(),
                description: "Update project plan for OpenClaw dashboard".to_string(),
                status: TaskStatus::Pending,
                started_at: now - Duration::minutes(2),
                finished_at: None,
                output_summary: None,
            },
        ];

        let heartbeats = vec![
            Heartbeat {
                id: "hb-1".to_string(),
                agent_id: "agent-crewai-researcher".to_string(),
                timestamp: now - Duration::seconds(10),
                status: AgentStatus::Busy,
                meta: meta(&[("cpu", Value::from(0.7))]),
            },
            Heartbeat {
                id: "hb-2".to_string(),
                agent_id: "agent-langgraph-orchestrator".to_string(),
                timestamp: now - Duration::seconds(5),
                status: AgentStatus::Online,
                meta: meta(&[("graphs", Value::from(3))]),
            },
            Heartbeat {
                id: "hb-3".to_string(),
                agent_id: "agent-beeai-pm".to_string(),
                timestamp: now - Duration::seconds(20),
                status: AgentStatus::Online,
                meta: meta(&[("tasks_tracked", Value::from(12))]),
            },
        ];

        let alerts = vec![Alert {
            id: "alert-1".to_string(),
            severity: AlertSeverity::Warning,
            message: "OpenClaw Agent 1 has been offline for 15 minutes".to_string(),
            related_agent_id: Some("agent-openclaw-1".to_string()),
            related_task_id: None,
            created_at: now - Duration::minutes(15),
            resolved_at: None,
        }];

        let performance = vec![
            PerformanceMetrics {
                agent_id: "agent-crewai-researcher".to_string(),
                cpu_usage: 72.5,
                memory_usage: 63.2,
                tasks_per_minute: 0.4,
                error_rate_per_hour: 0.1,
            },
            PerformanceMetrics {
                agent_id: "agent-langgraph-orchestrator".to_string(),
                cpu_usage: 34.1,
                memory_usage: 41.8,
                tasks_per_minute: 0.2,
                error_rate_per_hour: 0.0,
            },
            PerformanceMetrics {
                agent_id: "agent-beeai-pm".to_string(),
                cpu_usage: 55.3,
                memory_usage: 52.7,
                tasks_per_minute: 0.6,
                error_rate_per_hour: 0.05,
            },
            PerformanceMetrics {
                agent_id: "agent-openclaw-1".to_string(),
                cpu_usage: 0.0,
                memory_usage: 0.0,
                tasks_per_minute: 0.0,
                error_rate_per_hour: 0.0,
            },
            PerformanceMetrics {
                agent_id: "agent-admin-client".to_string(),
                cpu_usage: 12.3,
                memory_usage: 22.5,
                tasks_per_minute: 0.1,
                error_rate_per_hour: 0.0,
            },
        ];

        Self {
            agents,
            tasks,
            heartbeats,
            alerts,
            performance,
        }
    }

    /// All agents, insertion order
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Look up one agent by exact id
    pub fn agent(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.id == id)
    }

    /// All tasks, insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks belonging to one agent, relative order preserved
    ///
    /// Unknown agent ids yield an empty list, not an error; this endpoint
    /// never validates agent existence.
    pub fn tasks_for_agent(&self, agent_id: &str) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.agent_id == agent_id)
            .cloned()
            .collect()
    }

    /// All heartbeats, insertion order
    ///
    /// No recency filtering or sorting happens here despite the route name
    /// this backs; the seed merely happens to be newest-first.
    pub fn heartbeats(&self) -> &[Heartbeat] {
        &self.heartbeats
    }

    /// All alerts, insertion order
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// All performance snapshots, insertion order
    pub fn performance(&self) -> &[PerformanceMetrics] {
        &self.performance
    }
}

impl Default for FleetSnapshot {
    fn default() -> Self {
        Self::seeded()
    }
}

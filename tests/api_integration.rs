//! End-to-end HTTP tests for the orchestrator API
//!
//! Boots the router on an ephemeral port and drives it with a real HTTP
//! client, the way the dashboard would.

use axum::http::HeaderValue;
use openclaw_core::{router, FleetSnapshot};
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;

const DASHBOARD_ORIGIN: &str = "http://localhost:5173";

/// Spawn the API on an ephemeral port, returning its base URL
async fn spawn_server() -> String {
    let fleet = Arc::new(FleetSnapshot::seeded());
    let origin: HeaderValue = DASHBOARD_ORIGIN.parse().unwrap();
    let app = router(fleet, origin);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn get_json(client: &Client, url: &str) -> Value {
    let response = client.get(url).send().await.expect("request failed");
    assert!(
        response.status().is_success(),
        "GET {} -> {}",
        url,
        response.status()
    );
    response.json().await.expect("invalid JSON body")
}

#[tokio::test]
async fn test_health_reports_ok() {
    let base = spawn_server().await;
    let client = Client::new();

    let body = get_json(&client, &format!("{}/health", base)).await;
    assert_eq!(body["status"], "ok");
    // ISO-8601 timestamp
    let ts = body["timestamp"].as_str().expect("timestamp missing");
    assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
}

#[tokio::test]
async fn test_list_agents_returns_seeded_fleet() {
    let base = spawn_server().await;
    let client = Client::new();

    let agents = get_json(&client, &format!("{}/agents", base)).await;
    let agents = agents.as_array().unwrap();
    assert_eq!(agents.len(), 5);
    assert_eq!(agents[0]["id"], "agent-crewai-researcher");
    assert_eq!(agents[3]["id"], "agent-openclaw-1");
    assert_eq!(agents[3]["status"], "offline");
}

#[tokio::test]
async fn test_get_agent_by_id() {
    let base = spawn_server().await;
    let client = Client::new();

    let agent = get_json(&client, &format!("{}/agents/agent-crewai-researcher", base)).await;
    assert_eq!(agent["id"], "agent-crewai-researcher");
    assert_eq!(agent["type"], "CrewAI");
    assert_eq!(agent["status"], "busy");
    assert_eq!(agent["current_task_id"], "task-1");
}

#[tokio::test]
async fn test_get_agent_unknown_id_is_404() {
    let base = spawn_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/agents/unknown-id", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.unwrap();
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("unknown-id"), "error was: {}", message);
}

#[tokio::test]
async fn test_agent_tasks_filters_by_agent() {
    let base = spawn_server().await;
    let client = Client::new();

    let tasks = get_json(&client, &format!("{}/agents/agent-beeai-pm/tasks", base)).await;
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], "task-2");
    assert_eq!(tasks[0]["status"], "pending");
}

#[tokio::test]
async fn test_agent_tasks_unknown_agent_is_empty_200() {
    let base = spawn_server().await;
    let client = Client::new();

    let tasks = get_json(&client, &format!("{}/agents/no-such-agent/tasks", base)).await;
    assert_eq!(tasks, json!([]));
}

#[tokio::test]
async fn test_list_tasks() {
    let base = spawn_server().await;
    let client = Client::new();

    let tasks = get_json(&client, &format!("{}/tasks", base)).await;
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["id"], "task-1");
    assert_eq!(tasks[0]["status"], "running");
    assert_eq!(tasks[0]["finished_at"], Value::Null);
    assert_eq!(tasks[1]["id"], "task-2");
}

#[tokio::test]
async fn test_recent_heartbeats_returns_all_seeded() {
    let base = spawn_server().await;
    let client = Client::new();

    let heartbeats = get_json(&client, &format!("{}/heartbeats/recent", base)).await;
    let heartbeats = heartbeats.as_array().unwrap();
    let ids: Vec<_> = heartbeats.iter().map(|hb| hb["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["hb-1", "hb-2", "hb-3"]);
    assert_eq!(heartbeats[0]["meta"]["cpu"], json!(0.7));
    assert_eq!(heartbeats[2]["meta"]["tasks_tracked"], json!(12));
}

#[tokio::test]
async fn test_list_alerts() {
    let base = spawn_server().await;
    let client = Client::new();

    let alerts = get_json(&client, &format!("{}/alerts", base)).await;
    let alerts = alerts.as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["id"], "alert-1");
    assert_eq!(alerts[0]["severity"], "warning");
    assert_eq!(alerts[0]["related_agent_id"], "agent-openclaw-1");
    assert_eq!(alerts[0]["resolved_at"], Value::Null);
}

#[tokio::test]
async fn test_performance_metrics() {
    let base = spawn_server().await;
    let client = Client::new();

    let metrics = get_json(&client, &format!("{}/metrics/performance", base)).await;
    let metrics = metrics.as_array().unwrap();
    assert_eq!(metrics.len(), 5);
    assert_eq!(metrics[0]["agent_id"], "agent-crewai-researcher");
    assert_eq!(metrics[0]["cpu_usage"], json!(72.5));
    assert_eq!(metrics[3]["tasks_per_minute"], json!(0.0));
}

#[tokio::test]
async fn test_list_endpoints_are_idempotent() {
    let base = spawn_server().await;
    let client = Client::new();

    for path in [
        "/agents",
        "/tasks",
        "/heartbeats/recent",
        "/alerts",
        "/metrics/performance",
    ] {
        let url = format!("{}{}", base, path);
        let first = get_json(&client, &url).await;
        let second = get_json(&client, &url).await;
        assert_eq!(first, second, "{} changed between calls", path);
    }
}

#[tokio::test]
async fn test_send_command_acknowledges_and_echoes() {
    let base = spawn_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/agents/agent-openclaw-1/commands", base))
        .json(&json!({"type": "restart"}))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "agent_id": "agent-openclaw-1",
            "command": {"type": "restart", "payload": null},
            "status": "accepted",
            "message": "Command queued (mock)"
        })
    );
}

#[tokio::test]
async fn test_send_command_unknown_agent_still_accepted() {
    let base = spawn_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/agents/never-registered/commands", base))
        .json(&json!({"type": "pause", "payload": {"grace_seconds": 30}}))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["agent_id"], "never-registered");
    assert_eq!(body["status"], "accepted");
    assert_eq!(body["command"]["payload"]["grace_seconds"], json!(30));
}

#[tokio::test]
async fn test_send_command_missing_type_rejected() {
    let base = spawn_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/agents/agent-openclaw-1/commands", base))
        .json(&json!({"payload": {"force": true}}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 422);
}

#[tokio::test]
async fn test_cors_allows_dashboard_origin() {
    let base = spawn_server().await;
    let client = Client::new();

    let response = client
        .request(reqwest::Method::OPTIONS, format!("{}/agents", base))
        .header("Origin", DASHBOARD_ORIGIN)
        .header("Access-Control-Request-Method", "GET")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let headers = response.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        DASHBOARD_ORIGIN
    );
    assert_eq!(headers.get("access-control-allow-credentials").unwrap(), "true");
}

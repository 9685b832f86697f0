//! Integration tests for the API layer.
//!
//! These tests spin up a real HTTP server on a random port and talk to it
//! over the network, with a scripted agent runner standing in for the model.

use async_trait::async_trait;
use std::sync::Arc;
use studio_api::{AppState, create_router};
use studio_common::{GenerationOutput, GenerationType, Result, StudioError, StyleAgent};
use studio_llm::{LlmClient, LlmRequest, LlmResponse};
use studio_orchestrator::{HttpTriageClient, Orchestrator};
use studio_triage::{AgentRunner, DEFAULT_TRIAGE_INSTRUCTIONS, LlmAgentRunner, TriageDispatcher};

/// Picks a style from keywords in the input and echoes the instructions'
/// first line so tests can tell which instructions were used. Inputs
/// containing "explode" fail like an unreachable provider.
struct ScriptedRunner;

#[async_trait]
impl AgentRunner for ScriptedRunner {
    async fn route(&self, instructions: &str, input: &str) -> Result<String> {
        if input.contains("explode") {
            return Err(StudioError::Agent("connection refused".into()));
        }
        let style = if input.contains("exciting") {
            "Hype Agent"
        } else if input.contains("product") {
            "Launch Agent"
        } else {
            "Talking Head Agent"
        };
        let first_line = instructions.lines().next().unwrap_or_default();
        Ok(format!("{style}\nInstructions: {first_line}"))
    }

    fn model_name(&self) -> &str {
        "scripted-runner"
    }
}

/// Model that always completes with an empty string.
struct SilentModel;

#[async_trait]
impl LlmClient for SilentModel {
    async fn complete(&self, _request: LlmRequest) -> Result<LlmResponse> {
        Ok(LlmResponse {
            content: String::new(),
            model: "silent".into(),
            usage: None,
            finish_reason: Some("stop".into()),
        })
    }

    fn model_name(&self) -> &str {
        "silent"
    }
}

async fn start_server_with(state: AppState) -> String {
    let router = create_router(Arc::new(state), &["*".to_string()]);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Spin up a test server on a random port and return the base URL.
async fn start_test_server() -> String {
    let dispatcher = TriageDispatcher::new(Arc::new(ScriptedRunner));
    start_server_with(AppState::new(Arc::new(dispatcher))).await
}

/// Helper to GET a URL and return (status, body as JSON).
async fn get(base: &str, path: &str) -> (u16, serde_json::Value) {
    let resp = reqwest::Client::new()
        .get(format!("{}{}", base, path))
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

/// Helper to POST a body with an explicit content type.
async fn post_with_content_type(
    base: &str,
    path: &str,
    content_type: &str,
    body: &str,
) -> (u16, serde_json::Value) {
    let resp = reqwest::Client::new()
        .post(format!("{}{}", base, path))
        .header("content-type", content_type)
        .body(body.to_string())
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

/// Helper to POST a raw JSON string and return (status, body as JSON).
async fn post_json(base: &str, path: &str, json: &str) -> (u16, serde_json::Value) {
    post_with_content_type(base, path, "application/json", json).await
}

// ============================================================================
// Health and catalog
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let base = start_test_server().await;
    let (status, body) = get(&base, "/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["runner_model"], "scripted-runner");
}

#[tokio::test]
async fn test_catalog_lists_every_generation_type() {
    let base = start_test_server().await;
    let (status, body) = get(&base, "/api/catalog").await;
    assert_eq!(status, 200);

    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), GenerationType::ALL.len());
    let triage = entries.iter().find(|e| e["type"] == "triage").unwrap();
    assert_eq!(triage["defaultSystemPrompt"], DEFAULT_TRIAGE_INSTRUCTIONS);
    assert!(!triage["models"].as_array().unwrap().is_empty());
}

// ============================================================================
// Triage endpoint
// ============================================================================

#[tokio::test]
async fn test_triage_returns_decision_in_data_and_style() {
    let base = start_test_server().await;
    let (status, body) = post_json(
        &base,
        "/api/agent",
        r#"{"message":"make this sound exciting"}"#,
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], body["style"]);

    let decision = body["data"].as_str().unwrap();
    assert_eq!(StyleAgent::detect(decision), Some(StyleAgent::Hype));

    let default_first_line = DEFAULT_TRIAGE_INSTRUCTIONS.lines().next().unwrap();
    assert!(decision.contains(default_first_line));

    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(timestamp.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_triage_uses_supplied_system_prompt() {
    let base = start_test_server().await;
    let (status, body) = post_json(
        &base,
        "/api/agent",
        r#"{"systemPrompt":"Only pick Launch Agent.","message":"new product drop"}"#,
    )
    .await;

    assert_eq!(status, 200);
    let decision = body["data"].as_str().unwrap();
    assert!(decision.starts_with("Launch Agent"));
    assert!(decision.contains("Only pick Launch Agent."));
}

#[tokio::test]
async fn test_triage_requires_message() {
    let base = start_test_server().await;

    for payload in [r#"{}"#, r#"{"message":""}"#, r#"{"systemPrompt":"x"}"#] {
        let (status, body) = post_json(&base, "/api/agent", payload).await;
        assert_eq!(status, 400, "payload {payload}");
        assert_eq!(body, serde_json::json!({"error": "Message is required"}));
    }
}

#[tokio::test]
async fn test_triage_runner_failure_is_opaque() {
    let base = start_test_server().await;
    let (status, body) = post_json(&base, "/api/agent", r#"{"message":"explode please"}"#).await;

    assert_eq!(status, 500);
    assert_eq!(body, serde_json::json!({"error": "Internal server error"}));
    assert!(!body.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_triage_malformed_body() {
    let base = start_test_server().await;
    let (status, body) = post_json(&base, "/api/agent", "{not json").await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Invalid request body");
}

#[tokio::test]
async fn test_triage_wrong_content_type_is_bad_request() {
    let base = start_test_server().await;
    let (status, body) = post_with_content_type(
        &base,
        "/api/agent",
        "text/plain",
        r#"{"message":"make this sound exciting"}"#,
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Invalid request body");
}

#[tokio::test]
async fn test_triage_empty_decision_is_passed_through() {
    let runner = LlmAgentRunner::new(Arc::new(SilentModel));
    let dispatcher = TriageDispatcher::new(Arc::new(runner));
    let base = start_server_with(AppState::new(Arc::new(dispatcher))).await;

    let (status, body) = post_json(
        &base,
        "/api/agent",
        r#"{"message":"make this sound exciting"}"#,
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], "");
    assert_eq!(body["style"], "");
}

#[tokio::test]
async fn test_triage_oversized_body() {
    let dispatcher = TriageDispatcher::new(Arc::new(ScriptedRunner));
    let base = start_server_with(AppState::new(Arc::new(dispatcher)).with_body_limit(256)).await;

    let payload = serde_json::json!({ "message": "a".repeat(4096) }).to_string();
    let (status, body) = post_json(&base, "/api/agent", &payload).await;

    assert_eq!(status, 413);
    assert_eq!(body["error"], "Request body too large");
}

#[tokio::test]
async fn test_triage_descriptor() {
    let base = start_test_server().await;
    let (status, body) = get(&base, "/api/agent").await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        serde_json::json!({
            "message": "Triage Agent API",
            "methods": ["POST"],
            "description": "Send a POST request with a message to get triage analysis"
        })
    );
}

// ============================================================================
// Script agent endpoint
// ============================================================================

#[tokio::test]
async fn test_script_agent_echoes_instruction() {
    let base = start_test_server().await;
    let (status, body) = post_json(
        &base,
        "/api/script-agent",
        r#"{"instruction":"Add a twist ending"}"#,
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["message"], "Instruction received successfully");
    assert_eq!(body["instruction"], "Add a twist ending");
}

#[tokio::test]
async fn test_script_agent_requires_instruction() {
    let base = start_test_server().await;

    for payload in [r#"{}"#, r#"{"instruction":""}"#] {
        let (status, body) = post_json(&base, "/api/script-agent", payload).await;
        assert_eq!(status, 400, "payload {payload}");
        assert_eq!(body["error"], "Instruction is required");
    }
}

#[tokio::test]
async fn test_script_agent_malformed_body() {
    let base = start_test_server().await;
    let (status, body) = post_json(&base, "/api/script-agent", "{not json").await;

    assert_eq!(status, 400);
    assert_eq!(body, serde_json::json!({"error": "Invalid request body"}));
}

// ============================================================================
// Orchestrator over HTTP
// ============================================================================

#[tokio::test]
async fn test_orchestrator_triage_over_http() {
    let base = start_test_server().await;
    let mut orch = Orchestrator::new(Arc::new(HttpTriageClient::new(&base)));

    let ok = orch
        .submit(GenerationType::Triage, "style-triage", "", "new product drop")
        .unwrap();
    let failing = orch
        .submit(GenerationType::Triage, "style-triage", "", "explode")
        .unwrap();

    assert_eq!(orch.settle_all().await, 2);

    let Some(GenerationOutput::Triage(decision)) = &orch.requests().get(&ok).unwrap().result else {
        panic!("expected a triage decision");
    };
    assert_eq!(StyleAgent::detect(decision), Some(StyleAgent::Launch));

    let failed = orch.requests().get(&failing).unwrap();
    assert!(!failed.is_generating);
    assert!(matches!(
        failed.result,
        Some(GenerationOutput::Failed { ref error }) if error.contains("Internal server error")
    ));
}

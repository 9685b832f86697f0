//! HTTP route handlers for the API.

use crate::{AppState, error::ApiError};
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use studio_common::{TypeCatalog, catalog};
use studio_triage::{AgentDescriptor, AgentRequest, AgentResponse};
use tracing::info;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub runner_model: String,
}

/// Health check endpoint.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
        runner_model: state.dispatcher.model_name().to_string(),
    })
}

/// `POST /api/agent`: run the triage agent once against the message.
pub async fn triage(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AgentRequest>, JsonRejection>,
) -> Result<Json<AgentResponse>, ApiError> {
    let Json(request) = payload?;
    let message = request.message.unwrap_or_default();

    let outcome = state
        .dispatcher
        .dispatch(request.system_prompt.as_deref(), &message)
        .await?;

    Ok(Json(AgentResponse::from_outcome(outcome)))
}

/// `GET /api/agent`: static capability descriptor.
pub async fn describe_triage() -> Json<AgentDescriptor> {
    Json(AgentDescriptor::default())
}

/// Script agent request body.
#[derive(Debug, Deserialize)]
pub struct ScriptAgentRequest {
    #[serde(default)]
    pub instruction: Option<String>,
}

/// Script agent response body.
#[derive(Debug, Serialize)]
pub struct ScriptAgentResponse {
    pub message: &'static str,
    pub instruction: String,
}

/// `POST /api/script-agent`: acknowledge an instruction without processing it.
pub async fn script_agent(
    payload: Result<Json<ScriptAgentRequest>, JsonRejection>,
) -> Result<Json<ScriptAgentResponse>, ApiError> {
    let Json(request) = payload?;

    let instruction = request
        .instruction
        .filter(|instruction| !instruction.is_empty())
        .ok_or_else(|| ApiError::Validation("Instruction is required".into()))?;

    info!(
        instruction_preview = %instruction.chars().take(50).collect::<String>(),
        "Script instruction received"
    );

    Ok(Json(ScriptAgentResponse {
        message: "Instruction received successfully",
        instruction,
    }))
}

/// `GET /api/catalog`: models and default prompts per generation type.
pub async fn model_catalog() -> Json<Vec<TypeCatalog>> {
    Json(catalog())
}

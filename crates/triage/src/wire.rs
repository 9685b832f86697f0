//! JSON bodies of the triage HTTP surface.
//!
//! Shared by the server routes and by HTTP clients of the endpoint so the
//! two sides cannot drift apart.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::dispatcher::TriageOutcome;

/// Body of `POST /api/agent`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    /// Optional at the type level so a missing field is reported as a
    /// validation failure rather than a malformed body.
    #[serde(default)]
    pub message: Option<String>,
}

/// Success body of `POST /api/agent`.
///
/// `data` and `style` always carry the same text; both are kept because
/// clients read either one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub success: bool,
    pub data: String,
    pub style: String,
    /// ISO-8601, millisecond precision, `Z` suffix
    pub timestamp: String,
}

impl AgentResponse {
    pub fn from_outcome(outcome: TriageOutcome) -> Self {
        Self {
            success: true,
            style: outcome.final_output.clone(),
            data: outcome.final_output,
            timestamp: iso_timestamp(outcome.timestamp),
        }
    }
}

/// Static descriptor served by `GET /api/agent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDescriptor {
    pub message: String,
    pub methods: Vec<String>,
    pub description: String,
}

impl Default for AgentDescriptor {
    fn default() -> Self {
        Self {
            message: "Triage Agent API".into(),
            methods: vec!["POST".into()],
            description: "Send a POST request with a message to get triage analysis".into(),
        }
    }
}

/// Error body shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

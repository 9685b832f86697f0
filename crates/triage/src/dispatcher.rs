//! Triage dispatcher: validation plus one agent run per request.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use studio_common::{DEFAULT_TRIAGE_INSTRUCTIONS, Result, StudioError, StyleAgent};
use tracing::{info, warn};

use crate::runner::AgentRunner;

/// Message returned when a request has no message to triage.
pub const MESSAGE_REQUIRED: &str = "Message is required";

/// Result of a successful triage run.
#[derive(Debug, Clone)]
pub struct TriageOutcome {
    /// The agent's final output, verbatim
    pub final_output: String,

    /// Style agent the output names, if one could be recognized.
    /// Informational only; `final_output` is what callers receive.
    pub recognized: Option<StyleAgent>,

    pub timestamp: DateTime<Utc>,
}

/// Routes free-text requests to a style agent via an instruction-following agent.
pub struct TriageDispatcher {
    runner: Arc<dyn AgentRunner>,
    default_instructions: String,
}

impl TriageDispatcher {
    pub fn new(runner: Arc<dyn AgentRunner>) -> Self {
        Self {
            runner,
            default_instructions: DEFAULT_TRIAGE_INSTRUCTIONS.to_string(),
        }
    }

    /// Instructions used when a request carries no system prompt.
    pub fn with_default_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.default_instructions = instructions.into();
        self
    }

    pub fn default_instructions(&self) -> &str {
        &self.default_instructions
    }

    pub fn model_name(&self) -> &str {
        self.runner.model_name()
    }

    /// Run one triage.
    ///
    /// Fails with `StudioError::Validation` when `message` is empty, and
    /// passes any runner failure through unchanged. There is exactly one
    /// agent run per call.
    pub async fn dispatch(&self, system_prompt: Option<&str>, message: &str) -> Result<TriageOutcome> {
        if message.is_empty() {
            return Err(StudioError::Validation(MESSAGE_REQUIRED.to_string()));
        }

        let instructions = system_prompt.unwrap_or(self.default_instructions.as_str());

        info!(
            content_preview = %message.chars().take(50).collect::<String>(),
            custom_instructions = system_prompt.is_some(),
            model = %self.runner.model_name(),
            "Triaging request"
        );

        let final_output = self.runner.route(instructions, message).await.map_err(|e| {
            warn!(error = %e, "Triage agent run failed");
            e
        })?;

        let recognized = StyleAgent::detect(&final_output);
        info!(
            recognized = ?recognized,
            output_len = final_output.len(),
            "Triage decision made"
        );

        Ok(TriageOutcome {
            final_output,
            recognized,
            timestamp: Utc::now(),
        })
    }
}

//! The agent runtime seam.

use async_trait::async_trait;
use std::sync::Arc;
use studio_common::Result;
use studio_llm::{LlmClient, LlmRequest};
use tracing::debug;

/// Runs an instruction-following agent once and returns its final output.
#[async_trait]
pub trait AgentRunner: Send + Sync {
    /// Run an agent configured with `instructions` against `input`.
    async fn route(&self, instructions: &str, input: &str) -> Result<String>;

    /// Identifier of the model behind the runner, for diagnostics.
    fn model_name(&self) -> &str;
}

/// Agent runner backed by a chat-completion model.
///
/// The instructions become the system prompt and the input a single user
/// turn. The completion text is the final output.
pub struct LlmAgentRunner {
    client: Arc<dyn LlmClient>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl LlmAgentRunner {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_sampling(mut self, temperature: Option<f32>, max_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }
}

#[async_trait]
impl AgentRunner for LlmAgentRunner {
    async fn route(&self, instructions: &str, input: &str) -> Result<String> {
        let request = LlmRequest::single_turn(instructions, input)
            .with_sampling(self.temperature, self.max_tokens);

        let response = self.client.complete(request).await?;

        debug!(
            model = %response.model,
            finish_reason = ?response.finish_reason,
            "Agent run finished"
        );

        Ok(response.content)
    }

    fn model_name(&self) -> &str {
        self.client.model_name()
    }
}

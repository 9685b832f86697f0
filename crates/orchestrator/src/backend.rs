//! How triage requests reach the dispatcher.

use async_trait::async_trait;
use studio_common::{Result, StudioError};
use studio_triage::{AgentRequest, AgentResponse, ErrorBody, TriageDispatcher};
use tracing::debug;

/// Something that can triage a message and return the decision text.
#[async_trait]
pub trait TriageBackend: Send + Sync {
    async fn triage(&self, system_prompt: Option<&str>, message: &str) -> Result<String>;
}

/// In-process: call the dispatcher directly.
#[async_trait]
impl TriageBackend for TriageDispatcher {
    async fn triage(&self, system_prompt: Option<&str>, message: &str) -> Result<String> {
        self.dispatch(system_prompt, message)
            .await
            .map(|outcome| outcome.final_output)
    }
}

/// Over the network: `POST {base_url}/api/agent`.
pub struct HttpTriageClient {
    endpoint: String,
    http_client: reqwest::Client,
}

impl HttpTriageClient {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            endpoint: format!("{}/api/agent", base_url.as_ref().trim_end_matches('/')),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn decode(status: reqwest::StatusCode, body: &str) -> Result<String> {
        if !status.is_success() {
            let reason = serde_json::from_str::<ErrorBody>(body)
                .map(|e| e.error)
                .unwrap_or_else(|_| body.to_string());
            return Err(StudioError::Triage(format!("Triage endpoint returned {status}: {reason}")));
        }

        let envelope: AgentResponse = serde_json::from_str(body)
            .map_err(|e| StudioError::Triage(format!("Malformed triage response: {e}")))?;
        if !envelope.success {
            return Err(StudioError::Triage("Triage endpoint reported failure".into()));
        }
        Ok(envelope.data)
    }
}

#[async_trait]
impl TriageBackend for HttpTriageClient {
    async fn triage(&self, system_prompt: Option<&str>, message: &str) -> Result<String> {
        let body = AgentRequest {
            system_prompt: system_prompt.map(str::to_string),
            message: Some(message.to_string()),
        };

        debug!(endpoint = %self.endpoint, "Posting triage request");

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| StudioError::Triage(format!("Triage request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| StudioError::Triage(format!("Failed to read triage response: {e}")))?;

        Self::decode(status, &text)
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use studio_common::{Result, StudioError};
use tracing::info;

use crate::client::{LlmClient, LlmRequest, LlmResponse};
use crate::openai::OpenAiClient;

const OLLAMA_URL: &str = "http://localhost:11434";

/// Provider settings for the triage agent's model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "openai" or "ollama" (any OpenAI-compatible server)
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_requests: usize,
}

fn default_provider() -> String {
    "openai".into()
}

fn default_model() -> String {
    "gpt-4o-mini".into()
}

fn default_max_concurrent() -> usize {
    4
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key: None,
            api_url: None,
            temperature: None,
            max_tokens: None,
            max_concurrent_requests: default_max_concurrent(),
        }
    }
}

impl LlmConfig {
    /// API key from config, falling back to `OPENAI_API_KEY` for the openai provider.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }

        match self.provider.as_str() {
            "openai" => std::env::var("OPENAI_API_KEY").ok(),
            _ => None,
        }
    }
}

/// Caps the number of in-flight completions against one provider.
pub struct SemaphoredClient {
    inner: Arc<dyn LlmClient>,
    semaphore: Arc<tokio::sync::Semaphore>,
}

impl SemaphoredClient {
    pub fn new(inner: Arc<dyn LlmClient>, max_concurrent: usize) -> Self {
        Self {
            inner,
            semaphore: Arc::new(tokio::sync::Semaphore::new(max_concurrent.max(1))),
        }
    }
}

#[async_trait]
impl LlmClient for SemaphoredClient {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| StudioError::Agent(format!("Semaphore acquire failed: {e}")))?;
        self.inner.complete(request).await
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}

/// Build the provider client described by `config`.
///
/// There is no retry layer: a triage run is a single attempt.
pub fn build_llm_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>> {
    let base_client: Arc<dyn LlmClient> = match config.provider.as_str() {
        "openai" => Arc::new(OpenAiClient::new(
            config.api_url.clone(),
            config.model.clone(),
            config.resolve_api_key(),
        )),
        "ollama" => Arc::new(OpenAiClient::new(
            Some(config.api_url.clone().unwrap_or_else(|| OLLAMA_URL.to_string())),
            config.model.clone(),
            config.resolve_api_key(),
        )),
        other => {
            return Err(StudioError::Config(format!(
                "Unknown LLM provider: {other}"
            )));
        }
    };

    info!(
        provider = %config.provider,
        model = %config.model,
        max_concurrent = config.max_concurrent_requests,
        "Built LLM client"
    );

    Ok(Arc::new(SemaphoredClient::new(
        base_client,
        config.max_concurrent_requests,
    )))
}

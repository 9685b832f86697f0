//! Application state for the API server.

use std::sync::Arc;
use studio_llm::build_llm_client;
use studio_triage::{LlmAgentRunner, StudioConfig, TriageDispatcher};

/// Shared application state for the API server.
pub struct AppState {
    /// Runs triage requests
    pub dispatcher: Arc<TriageDispatcher>,

    /// Maximum accepted request body size
    pub body_limit_bytes: usize,

    /// Server start time (for health checks)
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(dispatcher: Arc<TriageDispatcher>) -> Self {
        Self {
            dispatcher,
            body_limit_bytes: studio_triage::ServerConfig::default().body_limit_bytes,
            start_time: std::time::Instant::now(),
        }
    }

    /// Build the LLM-backed dispatcher described by `config`.
    pub fn from_config(config: &StudioConfig) -> studio_common::Result<Self> {
        let client = build_llm_client(&config.llm)?;
        let runner = LlmAgentRunner::new(client)
            .with_sampling(config.llm.temperature, config.llm.max_tokens);

        let mut dispatcher = TriageDispatcher::new(Arc::new(runner));
        if let Some(ref instructions) = config.triage.default_instructions {
            dispatcher = dispatcher.with_default_instructions(instructions.clone());
        }

        Ok(Self::new(Arc::new(dispatcher)).with_body_limit(config.server.body_limit_bytes))
    }

    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.body_limit_bytes = bytes;
        self
    }

    /// Get the uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

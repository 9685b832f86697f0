//! LLM provider clients for the style triage agent.
//!
//! The triage dispatcher only ever needs "instructions + one user input in,
//! final text out", so the client surface is a single `complete` call.

pub mod client;
pub mod config;
pub mod openai;

pub use client::{ChatMessage, LlmClient, LlmRequest, LlmResponse, Role, TokenUsage};
pub use config::{LlmConfig, SemaphoredClient, build_llm_client};
pub use openai::OpenAiClient;

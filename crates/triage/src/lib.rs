//! Style triage for the generation studio.
//!
//! The dispatcher accepts a free-text request plus optional instructions,
//! runs one instruction-following agent against it, and hands back the
//! agent's final text untouched. Routing is entirely the agent's decision;
//! this crate only marshals the request and enforces that a message exists.
//!
//! # Architecture
//!
//! ```text
//! { systemPrompt?, message }
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │  TriageDispatcher   │  validate, pick instructions
//! └──────────┬──────────┘
//!            │ route(instructions, input)
//!            ▼
//! ┌─────────────────────┐
//! │    AgentRunner      │  LlmAgentRunner in production,
//! └──────────┬──────────┘  stubs in tests
//!            ▼
//!   final output text ──► Hype / Ad / Launch / Talking Head
//! ```

pub mod config;
pub mod dispatcher;
pub mod runner;
pub mod wire;

pub use config::{MockConfig, ServerConfig, StudioConfig, TriageConfig};
pub use dispatcher::{MESSAGE_REQUIRED, TriageDispatcher, TriageOutcome};
pub use runner::{AgentRunner, LlmAgentRunner};
pub use wire::{AgentDescriptor, AgentRequest, AgentResponse, ErrorBody};
pub use studio_common::DEFAULT_TRIAGE_INSTRUCTIONS;

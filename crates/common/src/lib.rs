//! Common types shared across the generation studio crates.
//!
//! This crate holds the data model that both the triage server and the
//! generation orchestrator speak: generation requests and their outputs,
//! the agent execution record, the style agents triage can recommend, and
//! the model catalog offered to clients.

pub mod catalog;
pub mod error;
pub mod execution;
pub mod generation;
pub mod style;

pub use catalog::{ModelOption, TypeCatalog, catalog, default_system_prompt, models_for};
pub use error::{Result, StudioError};
pub use execution::{AgentExecution, ExecutionStatus};
pub use generation::{
    GenerationOutput, GenerationPhase, GenerationRequest, GenerationType, RequestId, VideoAsset,
    VoiceAsset,
};
pub use style::{DEFAULT_TRIAGE_INSTRUCTIONS, StyleAgent};

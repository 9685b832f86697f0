//! Error types for the generation studio.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Triage error: {0}")]
    Triage(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StudioError>;

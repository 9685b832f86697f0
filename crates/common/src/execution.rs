//! Agent execution records for multi-agent handoff chains.
//!
//! Nothing in the studio drives these yet; the type exists so a future
//! handoff engine and the display surface agree on the record shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Result, StudioError};

/// Status of one step in a handoff chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Pending,
    Running,
    Deciding,
    Completed,
}

impl ExecutionStatus {
    /// Whether `next` follows `self` in `pending -> running -> (deciding) -> completed`.
    pub fn can_transition_to(self, next: ExecutionStatus) -> bool {
        use ExecutionStatus::*;
        matches!(
            (self, next),
            (Pending, Running) | (Running, Deciding) | (Running, Completed) | (Deciding, Completed)
        )
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Deciding => "deciding",
            Self::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// One agent step in a handoff chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentExecution {
    pub id: String,

    /// e.g. "Script", "Image"
    pub agent_type: String,

    /// Tool (model) the agent runs with
    pub tool: String,

    pub status: ExecutionStatus,

    pub timestamp: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,

    /// Agent that decided this step should run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<String>,
}

impl AgentExecution {
    pub fn pending(
        id: impl Into<String>,
        agent_type: impl Into<String>,
        tool: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            agent_type: agent_type.into(),
            tool: tool.into(),
            status: ExecutionStatus::Pending,
            timestamp: Utc::now(),
            reasoning: None,
            decided_by: None,
        }
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>, decided_by: Option<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self.decided_by = decided_by;
        self
    }

    /// Move to `next`, rejecting out-of-order transitions.
    pub fn advance_to(&mut self, next: ExecutionStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(StudioError::InvalidTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        self.timestamp = Utc::now();
        Ok(())
    }
}

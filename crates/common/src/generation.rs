//! Generation request records and their outputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::StudioError;

/// The kind of content a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationType {
    Script,
    Image,
    Video,
    Voice,
    Triage,
}

impl GenerationType {
    pub const ALL: [GenerationType; 5] = [
        GenerationType::Script,
        GenerationType::Image,
        GenerationType::Video,
        GenerationType::Voice,
        GenerationType::Triage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Image => "image",
            Self::Video => "video",
            Self::Voice => "voice",
            Self::Triage => "triage",
        }
    }

    /// Human-readable label shown next to the type selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Script => "Script Generation",
            Self::Image => "Image Generation",
            Self::Video => "Video Generation",
            Self::Voice => "Voice Generation",
            Self::Triage => "Style Triage",
        }
    }
}

impl fmt::Display for GenerationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationType {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "script" => Ok(Self::Script),
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            "voice" => Ok(Self::Voice),
            "triage" => Ok(Self::Triage),
            other => Err(StudioError::Validation(format!(
                "Unknown generation type: {other}"
            ))),
        }
    }
}

/// Session-unique request identifier.
///
/// Built from the creation instant in milliseconds plus a per-session
/// sequence number, so ids stay unique even when two requests are created
/// within the same millisecond.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    pub fn new(created_at: DateTime<Utc>, seq: u64) -> Self {
        Self(format!("{}-{}", created_at.timestamp_millis(), seq))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Descriptor for a generated video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoAsset {
    pub url: String,
    pub duration: String,
    pub resolution: String,
    pub format: String,
}

/// Descriptor for generated speech audio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceAsset {
    pub url: String,
    pub duration: String,
    pub voice: String,
    pub language: String,
    pub speed: String,
}

/// Payload attached to a request when its producer settles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum GenerationOutput {
    /// Markdown script document
    Script(String),
    /// Ordered image references
    Images(Vec<String>),
    Video(VideoAsset),
    Voice(VoiceAsset),
    /// Triage decision text, passed through verbatim
    Triage(String),
    /// The producer failed; the request is settled with this error
    Failed { error: String },
}

impl GenerationOutput {
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Lifecycle phase of a request as observed from the request list.
///
/// Requests are validated before creation, so a record in the list is never
/// observed in a queued state: it starts out `Generating`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationPhase {
    Generating,
    Settled,
    Failed,
}

/// A single generation submitted by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub id: RequestId,

    #[serde(rename = "type")]
    pub kind: GenerationType,

    /// Downstream tool identifier
    pub model: String,

    pub system_prompt: String,

    pub user_prompt: String,

    /// Only meaningful once `is_generating` is false
    pub result: Option<GenerationOutput>,

    pub timestamp: DateTime<Utc>,

    pub is_generating: bool,
}

impl GenerationRequest {
    pub fn new(
        id: RequestId,
        kind: GenerationType,
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            model: model.into(),
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            result: None,
            timestamp,
            is_generating: true,
        }
    }

    /// Copy of this request carrying `output` with generation finished.
    pub fn settled(&self, output: GenerationOutput) -> Self {
        Self {
            result: Some(output),
            is_generating: false,
            ..self.clone()
        }
    }

    pub fn phase(&self) -> GenerationPhase {
        match (&self.result, self.is_generating) {
            (_, true) => GenerationPhase::Generating,
            (Some(GenerationOutput::Failed { .. }), false) => GenerationPhase::Failed,
            (_, false) => GenerationPhase::Settled,
        }
    }
}

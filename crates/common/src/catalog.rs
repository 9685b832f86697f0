//! Models and default system prompts offered per generation type.
//!
//! The catalog is advisory. Requests may name any downstream tool; these
//! are the options a client presents by default.

use serde::Serialize;

use crate::GenerationType;
use crate::style::DEFAULT_TRIAGE_INSTRUCTIONS;

/// A selectable downstream model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn model(value: &'static str, label: &'static str) -> ModelOption {
    ModelOption { value, label }
}

const SCRIPT_MODELS: &[ModelOption] = &[
    model("openai-gpt4", "OpenAI GPT-4"),
    model("openai-gpt3.5", "OpenAI GPT-3.5"),
    model("claude-3-opus", "Claude 3 Opus"),
    model("claude-3-sonnet", "Claude 3 Sonnet"),
    model("claude-3-haiku", "Claude 3 Haiku"),
];

const IMAGE_MODELS: &[ModelOption] = &[
    model("dalle-3", "DALL-E 3"),
    model("dalle-2", "DALL-E 2"),
    model("midjourney", "Midjourney"),
    model("stable-diffusion", "Stable Diffusion"),
    model("firefly", "Adobe Firefly"),
    model("imagen", "Google Imagen"),
];

const VIDEO_MODELS: &[ModelOption] = &[
    model("sora", "OpenAI Sora"),
    model("runway-gen2", "Runway Gen-2"),
    model("runway-gen3", "Runway Gen-3"),
    model("pika-labs", "Pika Labs"),
    model("stable-video", "Stable Video Diffusion"),
    model("google-lumiere", "Google Lumiere"),
    model("meta-emu", "Meta Emu Video"),
];

const VOICE_MODELS: &[ModelOption] = &[
    model("openai-tts", "OpenAI TTS"),
    model("elevenlabs", "ElevenLabs"),
    model("azure-speech", "Azure Speech Services"),
    model("google-tts", "Google Text-to-Speech"),
    model("amazon-polly", "Amazon Polly"),
    model("murf", "Murf AI"),
    model("speechify", "Speechify"),
];

const TRIAGE_MODELS: &[ModelOption] = &[model("style-triage", "Style Triage Agent")];

pub fn models_for(kind: GenerationType) -> &'static [ModelOption] {
    match kind {
        GenerationType::Script => SCRIPT_MODELS,
        GenerationType::Image => IMAGE_MODELS,
        GenerationType::Video => VIDEO_MODELS,
        GenerationType::Voice => VOICE_MODELS,
        GenerationType::Triage => TRIAGE_MODELS,
    }
}

pub fn default_system_prompt(kind: GenerationType) -> &'static str {
    match kind {
        GenerationType::Script => {
            "You are a professional scriptwriter. Create engaging, well-structured scripts with clear scene descriptions, dialogue, and narrative flow."
        }
        GenerationType::Image => {
            "You are a creative visual artist. Generate high-quality, detailed images that match the user's description with artistic flair and technical precision."
        }
        GenerationType::Video => {
            "You are a video production expert. Create compelling video content with smooth transitions, engaging visuals, and professional quality."
        }
        GenerationType::Voice => {
            "You are a voice synthesis specialist. Generate clear, natural-sounding speech with appropriate tone, pace, and emotional expression."
        }
        GenerationType::Triage => DEFAULT_TRIAGE_INSTRUCTIONS,
    }
}

/// Catalog entry for one generation type.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCatalog {
    #[serde(rename = "type")]
    pub kind: GenerationType,
    pub label: &'static str,
    pub models: &'static [ModelOption],
    pub default_system_prompt: &'static str,
}

/// The full catalog, one entry per generation type.
pub fn catalog() -> Vec<TypeCatalog> {
    GenerationType::ALL
        .into_iter()
        .map(|kind| TypeCatalog {
            kind,
            label: kind.label(),
            models: models_for(kind),
            default_system_prompt: default_system_prompt(kind),
        })
        .collect()
}

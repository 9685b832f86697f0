//! Placeholder producers for script, image, video and voice requests.

use rand::Rng;
use std::time::Duration;
use studio_common::{GenerationOutput, VideoAsset, VoiceAsset};
use studio_triage::MockConfig;

const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=400&width=600";
const PLACEHOLDER_VIDEO: &str = "/placeholder.svg?height=300&width=500";
const PLACEHOLDER_AUDIO: &str = "data:audio/wav;base64,mock-audio-data";

/// Bounds of the simulated generation delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockTiming {
    pub min: Duration,
    pub max: Duration,
}

impl MockTiming {
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Fixed delay, for tests.
    pub fn fixed(delay: Duration) -> Self {
        Self::new(delay, delay)
    }

    /// Pick a delay uniformly within the bounds.
    pub fn sample(&self) -> Duration {
        let min = self.min.as_millis() as u64;
        let max = self.max.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }
}

impl Default for MockTiming {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000), Duration::from_millis(5000))
    }
}

impl From<&MockConfig> for MockTiming {
    fn from(config: &MockConfig) -> Self {
        Self::new(
            Duration::from_millis(config.min_delay_ms),
            Duration::from_millis(config.max_delay_ms),
        )
    }
}

/// Markdown script that opens with the user's prompt.
pub fn script(model: &str, prompt: &str) -> GenerationOutput {
    GenerationOutput::Script(format!(
        "# Generated Script

## Opening Scene
{prompt}

FADE IN:

The camera opens with a compelling visual that immediately draws the viewer's attention. This approach establishes the narrative tone and sets expectations for the content that follows.

**NARRATOR (V.O.)**
In a world where stories come to life through the power of artificial intelligence...

## Development
We explore the core themes and messages, building engagement through carefully crafted dialogue and visual storytelling techniques.

**CHARACTER**
This is where our journey truly begins, and possibilities become reality.

## Climax
The pivotal moment that brings all narrative elements together in a powerful and memorable crescendo.

## Resolution
A satisfying conclusion that leaves the audience with a clear understanding and lasting impression.

FADE OUT.

---
*Generated using {model}*
*Estimated runtime: 2-3 minutes*"
    ))
}

pub fn images() -> GenerationOutput {
    GenerationOutput::Images(vec![PLACEHOLDER_IMAGE.to_string(); 4])
}

pub fn video() -> GenerationOutput {
    GenerationOutput::Video(VideoAsset {
        url: PLACEHOLDER_VIDEO.into(),
        duration: "2:34".into(),
        resolution: "1920x1080".into(),
        format: "MP4".into(),
    })
}

pub fn voice() -> GenerationOutput {
    GenerationOutput::Voice(VoiceAsset {
        url: PLACEHOLDER_AUDIO.into(),
        duration: "2:15".into(),
        voice: "Professional Male".into(),
        language: "English (US)".into(),
        speed: "1.0x".into(),
    })
}

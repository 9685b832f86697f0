//! Downstream style agents that triage can recommend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Instructions given to the triage agent when the caller supplies none.
pub const DEFAULT_TRIAGE_INSTRUCTIONS: &str = "You are a style triage agent for a video content studio. \
Read the user's request and decide which ONE of the following style agents should handle it:\n\
- Hype Agent: high-energy, exciting content that builds buzz\n\
- Ad Agent: persuasive promotional content with a clear call to action\n\
- Launch Agent: product or feature announcements and release stories\n\
- Talking Head Agent: direct-to-camera explainers, tutorials and commentary\n\
Reply with the agent name on the first line (for example \"Hype Agent\"), \
followed by one or two sentences explaining why.";

/// A content-tone specialization a triage decision may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleAgent {
    Hype,
    Ad,
    Launch,
    TalkingHead,
}

impl StyleAgent {
    pub const ALL: [StyleAgent; 4] = [
        StyleAgent::Hype,
        StyleAgent::Ad,
        StyleAgent::Launch,
        StyleAgent::TalkingHead,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Hype => "Hype",
            Self::Ad => "Ad",
            Self::Launch => "Launch",
            Self::TalkingHead => "Talking Head",
        }
    }

    /// What the agent specializes in, as described to the triage agent.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Hype => "high-energy, exciting content that builds buzz",
            Self::Ad => "persuasive promotional content with a clear call to action",
            Self::Launch => "product or feature announcements and release stories",
            Self::TalkingHead => "direct-to-camera explainers, tutorials and commentary",
        }
    }

    /// Find the style agent a decision text names, if any.
    ///
    /// Matches "<Name> Agent" at a word start first, so "lead agent" is not
    /// read as the Ad agent; falls back to whole-word name matches. When several
    /// agents are named, the one mentioned earliest wins.
    pub fn detect(text: &str) -> Option<StyleAgent> {
        let lower = text.to_lowercase();

        let by_suffix = Self::ALL
            .iter()
            .filter_map(|agent| {
                let needle = format!("{} agent", agent.display_name().to_lowercase());
                lower
                    .match_indices(&needle)
                    .map(|(pos, _)| pos)
                    .find(|&pos| starts_word(&lower, pos))
                    .map(|pos| (pos, *agent))
            })
            .min_by_key(|(pos, _)| *pos);
        if let Some((_, agent)) = by_suffix {
            return Some(agent);
        }

        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        let mut best: Option<(usize, StyleAgent)> = None;
        for agent in Self::ALL {
            let name = agent.display_name().to_lowercase();
            let parts: Vec<&str> = name.split(' ').collect();
            let found = words
                .windows(parts.len())
                .position(|window| window == parts.as_slice());
            if let Some(pos) = found {
                if best.is_none_or(|(b, _)| pos < b) {
                    best = Some((pos, agent));
                }
            }
        }
        best.map(|(_, agent)| agent)
    }
}

/// True when `pos` is at the start of `text` or follows a non-alphanumeric character.
fn starts_word(text: &str, pos: usize) -> bool {
    text[..pos]
        .chars()
        .next_back()
        .is_none_or(|c| !c.is_alphanumeric())
}

impl fmt::Display for StyleAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Position of an agent within the fixed three-step pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Topic,
    Research,
    Scriptwriter,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Topic, Stage::Research, Stage::Scriptwriter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Topic => "topic",
            Stage::Research => "research",
            Stage::Scriptwriter => "scriptwriter",
        }
    }

    /// Human-facing agent name, as reported by the HTTP surface.
    pub fn agent_name(&self) -> &'static str {
        match self {
            Stage::Topic => "Topic Generator",
            Stage::Research => "Researcher",
            Stage::Scriptwriter => "Scriptwriter",
        }
    }

    /// Prefix used when wrapping unclassified transport failures.
    pub fn failure_action(&self) -> &'static str {
        match self {
            Stage::Topic => "Failed to generate topic",
            Stage::Research => "Failed to research topic",
            Stage::Scriptwriter => "Failed to generate blog content",
        }
    }

    /// Environment variable holding this stage's model identifier.
    pub fn model_env(&self) -> &'static str {
        match self {
            Stage::Topic => "TOPIC_GENERATOR_MODEL",
            Stage::Research => "RESEARCHER_MODEL",
            Stage::Scriptwriter => "SCRIPTWRITER_MODEL",
        }
    }

    /// Environment variable overriding this stage's timeout, in whole seconds.
    pub fn timeout_env(&self) -> &'static str {
        match self {
            Stage::Topic => "TOPIC_GENERATOR_TIMEOUT_SECS",
            Stage::Research => "RESEARCHER_TIMEOUT_SECS",
            Stage::Scriptwriter => "SCRIPTWRITER_TIMEOUT_SECS",
        }
    }

    pub fn default_profile(&self) -> StageProfile {
        match self {
            Stage::Topic => StageProfile {
                timeout: Duration::from_secs(30),
                temperature: 0.7,
                max_tokens: 30,
            },
            Stage::Research => StageProfile {
                timeout: Duration::from_secs(30),
                temperature: 0.3,
                max_tokens: 600,
            },
            Stage::Scriptwriter => StageProfile {
                timeout: Duration::from_secs(120),
                temperature: 0.5,
                max_tokens: 2500,
            },
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generation budget for a single stage request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageProfile {
    /// Deadline after which the in-flight request is dropped.
    pub timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl StageProfile {
    pub fn timeout_secs(&self) -> u64 {
        self.timeout.as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_budgets_per_stage() {
        assert_eq!(Stage::Topic.default_profile().timeout_secs(), 30);
        assert_eq!(Stage::Research.default_profile().timeout_secs(), 30);
        assert_eq!(Stage::Scriptwriter.default_profile().timeout_secs(), 120);
        assert_eq!(Stage::Research.default_profile().max_tokens, 600);
        assert_eq!(Stage::Scriptwriter.default_profile().max_tokens, 2500);
    }

    #[test]
    fn stage_serializes_lowercase() {
        let value = serde_json::to_value(Stage::Scriptwriter).unwrap();
        assert_eq!(value, serde_json::json!("scriptwriter"));
    }
}

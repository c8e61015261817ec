use std::{env, fmt, time::Duration};

use crate::security::non_blank;
use crate::{AgentError, BlogwrightError, SecretValue, Stage, StageProfile};

pub const ENDPOINT_ENV: &str = "OPEN_ROUTER_URL";
pub const API_KEY_ENV: &str = "OPEN_ROUTER_API_KEY";

/// A required setting that an agent checks before issuing a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    Endpoint,
    ApiKey,
    Model(Stage),
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Setting::Endpoint => write!(f, "Completion endpoint URL ({ENDPOINT_ENV})"),
            Setting::ApiKey => write!(f, "Completion API key ({API_KEY_ENV})"),
            Setting::Model(stage) => {
                write!(f, "{} model ({})", stage.agent_name(), stage.model_env())
            }
        }
    }
}

/// Per-stage generation budgets.
#[derive(Debug, Clone, PartialEq)]
pub struct StageProfiles {
    topic: StageProfile,
    research: StageProfile,
    scriptwriter: StageProfile,
}

impl StageProfiles {
    pub fn get(&self, stage: Stage) -> StageProfile {
        match stage {
            Stage::Topic => self.topic,
            Stage::Research => self.research,
            Stage::Scriptwriter => self.scriptwriter,
        }
    }

    pub fn set(&mut self, stage: Stage, profile: StageProfile) {
        match stage {
            Stage::Topic => self.topic = profile,
            Stage::Research => self.research = profile,
            Stage::Scriptwriter => self.scriptwriter = profile,
        }
    }
}

impl Default for StageProfiles {
    fn default() -> Self {
        Self {
            topic: Stage::Topic.default_profile(),
            research: Stage::Research.default_profile(),
            scriptwriter: Stage::Scriptwriter.default_profile(),
        }
    }
}

/// Process-wide agent configuration. Missing values are reported lazily by the
/// agent that needs them, never at load time.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub endpoint: Option<String>,
    pub api_key: Option<SecretValue>,
    pub topic_model: Option<String>,
    pub research_model: Option<String>,
    pub scriptwriter_model: Option<String>,
    pub profiles: StageProfiles,
}

/// Everything a single stage request needs, borrowed from [`Settings`].
#[derive(Debug, Clone, Copy)]
pub struct StageRequestConfig<'a> {
    pub endpoint: &'a str,
    pub api_key: &'a SecretValue,
    pub model: &'a str,
    pub profile: StageProfile,
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, BlogwrightError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup.
    ///
    /// Blank values count as missing. Timeout overrides must be positive whole
    /// seconds; anything else is rejected here rather than at request time.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BlogwrightError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut profiles = StageProfiles::default();
        for stage in Stage::ALL {
            if let Some(raw) = non_blank(lookup(stage.timeout_env())) {
                let secs = raw
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| {
                        BlogwrightError::InvalidConfiguration(format!(
                            "{} must be a positive number of seconds, got {raw:?}",
                            stage.timeout_env()
                        ))
                    })?;
                let mut profile = profiles.get(stage);
                profile.timeout = Duration::from_secs(secs);
                profiles.set(stage, profile);
            }
        }

        Ok(Self {
            endpoint: non_blank(lookup(ENDPOINT_ENV)),
            api_key: non_blank(lookup(API_KEY_ENV)).map(SecretValue::new),
            topic_model: non_blank(lookup(Stage::Topic.model_env())),
            research_model: non_blank(lookup(Stage::Research.model_env())),
            scriptwriter_model: non_blank(lookup(Stage::Scriptwriter.model_env())),
            profiles,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretValue::new(api_key));
        self
    }

    pub fn with_model(mut self, stage: Stage, model: impl Into<String>) -> Self {
        let model = Some(model.into());
        match stage {
            Stage::Topic => self.topic_model = model,
            Stage::Research => self.research_model = model,
            Stage::Scriptwriter => self.scriptwriter_model = model,
        }
        self
    }

    pub fn with_profile(mut self, stage: Stage, profile: StageProfile) -> Self {
        self.profiles.set(stage, profile);
        self
    }

    pub fn model(&self, stage: Stage) -> Option<&str> {
        match stage {
            Stage::Topic => self.topic_model.as_deref(),
            Stage::Research => self.research_model.as_deref(),
            Stage::Scriptwriter => self.scriptwriter_model.as_deref(),
        }
    }

    pub fn profile(&self, stage: Stage) -> StageProfile {
        self.profiles.get(stage)
    }

    /// Check the settings a stage needs, in the order endpoint, model, credential.
    pub fn resolve(&self, stage: Stage) -> Result<StageRequestConfig<'_>, AgentError> {
        let missing = |setting| AgentError::MissingSetting { stage, setting };

        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or_else(|| missing(Setting::Endpoint))?;
        let model = self
            .model(stage)
            .ok_or_else(|| missing(Setting::Model(stage)))?;
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| missing(Setting::ApiKey))?;

        Ok(StageRequestConfig {
            endpoint,
            api_key,
            model,
            profile: self.profile(stage),
        })
    }
}

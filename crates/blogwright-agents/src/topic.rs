//! Topic agent: invents a short technical blog topic.

use crate::agent_context::{Agent, AgentContext};
use crate::prompts;
use blogwright_core::{AgentError, Stage};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, instrument};

/// Short topic phrase. Word count is requested from the model but not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topic(String);

impl Topic {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Topic {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Topic {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Topic agent that needs no input
pub struct TopicAgent {
    context: AgentContext,
}

impl TopicAgent {
    pub fn new(context: AgentContext) -> Self {
        Self { context }
    }

    /// Ask the model for a fresh topic and return its trimmed completion verbatim.
    #[instrument(name = "agent.topic", skip(self))]
    pub async fn generate_topic(&self) -> Result<Topic, AgentError> {
        let text = self.context.complete(Stage::Topic, prompts::topic()).await?;
        let topic = Topic::new(text.trim());

        info!(topic = %topic, "topic agent produced topic");
        Ok(topic)
    }
}

#[async_trait::async_trait]
impl Agent for TopicAgent {
    type Input = ();
    type Output = Topic;

    fn stage(&self) -> Stage {
        Stage::Topic
    }

    async fn execute(&self, _input: ()) -> Result<Topic, AgentError> {
        self.generate_topic().await
    }
}

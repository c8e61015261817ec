//! Researcher agent: turns a topic into a structured research bundle.
//!
//! Model output is untrusted text that claims to be JSON. It goes through a
//! strict parse that fails closed; only after a successful parse are missing
//! fields defaulted and the source list filtered down to valid URLs.

use crate::agent_context::{Agent, AgentContext};
use crate::prompts;
use crate::topic::Topic;
use blogwright_core::{AgentError, Stage};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument};

/// Summary used when the model omits one.
pub const SUMMARY_PLACEHOLDER: &str = "No summary generated.";

/// Research bundle handed to the scriptwriter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchOutput {
    pub blog_title: String,
    pub summary: Vec<String>,
    pub keywords: Vec<String>,
    /// Absolute URLs only.
    pub sources: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResearch {
    blog_title: Option<String>,
    summary: Option<Vec<String>>,
    keywords: Option<Vec<String>>,
    /// Entries of any JSON type; non-strings are dropped with the invalid URLs.
    sources: Option<Vec<Value>>,
}

/// Parse completion text into a [`ResearchOutput`], defaulting absent fields.
pub fn parse_research(topic: &Topic, text: &str) -> Result<ResearchOutput, AgentError> {
    let raw: RawResearch =
        serde_json::from_str(text).map_err(|err| AgentError::MalformedJson {
            stage: Stage::Research,
            message: err.to_string(),
        })?;

    let proposed = raw.sources.unwrap_or_default();
    let proposed_count = proposed.len();
    let sources = retain_valid_urls(proposed);
    if sources.len() < proposed_count {
        debug!(
            dropped = proposed_count - sources.len(),
            "discarded sources that are not valid URLs"
        );
    }

    Ok(ResearchOutput {
        blog_title: raw
            .blog_title
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| topic.as_str().to_string()),
        summary: raw
            .summary
            .unwrap_or_else(|| vec![SUMMARY_PLACEHOLDER.to_string()]),
        keywords: raw.keywords.unwrap_or_default(),
        sources,
    })
}

/// Keep string entries that parse as absolute URLs, preserving order.
pub fn retain_valid_urls(sources: Vec<Value>) -> Vec<String> {
    sources
        .into_iter()
        .filter_map(|source| match source {
            Value::String(url) if Url::parse(&url).is_ok() => Some(url),
            _ => None,
        })
        .collect()
}

/// Researcher agent that performs one structured research completion
pub struct ResearchAgent {
    context: AgentContext,
}

impl ResearchAgent {
    pub fn new(context: AgentContext) -> Self {
        Self { context }
    }

    #[instrument(name = "agent.research", skip(self, topic), fields(topic = %topic))]
    pub async fn research(&self, topic: &Topic) -> Result<ResearchOutput, AgentError> {
        if topic.is_blank() {
            return Err(AgentError::InvalidInput {
                stage: Stage::Research,
                reason: "topic must not be empty".to_string(),
            });
        }

        let text = self
            .context
            .complete(Stage::Research, prompts::research(topic))
            .await?;
        let output = parse_research(topic, &text)?;

        info!(
            title = %output.blog_title,
            summary_sentences = output.summary.len(),
            keywords = output.keywords.len(),
            sources = output.sources.len(),
            "research agent produced bundle"
        );
        Ok(output)
    }
}

#[async_trait::async_trait]
impl Agent for ResearchAgent {
    type Input = Topic;
    type Output = ResearchOutput;

    fn stage(&self) -> Stage {
        Stage::Research
    }

    async fn execute(&self, topic: Topic) -> Result<ResearchOutput, AgentError> {
        self.research(&topic).await
    }
}

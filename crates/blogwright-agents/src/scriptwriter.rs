//! Scriptwriter agent: drafts the Markdown post from a research bundle.

use crate::agent_context::{Agent, AgentContext};
use crate::prompts;
use crate::researcher::ResearchOutput;
use blogwright_core::{AgentError, Stage};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Completions shorter than this (in characters, after trimming) are treated
/// as truncated or empty generations.
pub const MIN_CONTENT_CHARS: usize = 100;

/// Drafted post plus metadata derived from its text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptwriterOutput {
    pub title: String,
    pub content: String,
    /// H2 heading texts in document order; `[""]` when there are none.
    pub sections: Vec<String>,
    pub word_count: usize,
}

/// Collect `## ` heading texts line by line.
///
/// A heading must start in the first column; indented lines are body text.
pub fn extract_sections(content: &str) -> Vec<String> {
    let sections: Vec<String> = content
        .lines()
        .filter_map(|line| line.strip_prefix("## "))
        .map(|heading| heading.trim().to_string())
        .collect();

    if sections.is_empty() {
        vec![String::new()]
    } else {
        sections
    }
}

pub fn count_words(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Validate completion text and derive the descriptive metadata.
pub fn assemble_post(
    research: &ResearchOutput,
    text: &str,
) -> Result<ScriptwriterOutput, AgentError> {
    let content = text.trim();
    let length = content.chars().count();
    if length < MIN_CONTENT_CHARS {
        return Err(AgentError::ContentTooShort {
            stage: Stage::Scriptwriter,
            length,
        });
    }

    Ok(ScriptwriterOutput {
        title: research.blog_title.clone(),
        content: content.to_string(),
        sections: extract_sections(content),
        word_count: count_words(content),
    })
}

/// Scriptwriter agent producing the long-form post
pub struct ScriptwriterAgent {
    context: AgentContext,
}

impl ScriptwriterAgent {
    pub fn new(context: AgentContext) -> Self {
        Self { context }
    }

    #[instrument(name = "agent.scriptwriter", skip(self, research), fields(title = %research.blog_title))]
    pub async fn write_script(
        &self,
        research: &ResearchOutput,
    ) -> Result<ScriptwriterOutput, AgentError> {
        let text = self
            .context
            .complete(Stage::Scriptwriter, prompts::scriptwriter(research))
            .await?;
        let post = assemble_post(research, &text)?;

        info!(
            sections = post.sections.len(),
            word_count = post.word_count,
            "scriptwriter agent produced post"
        );
        Ok(post)
    }
}

#[async_trait::async_trait]
impl Agent for ScriptwriterAgent {
    type Input = ResearchOutput;
    type Output = ScriptwriterOutput;

    fn stage(&self) -> Stage {
        Stage::Scriptwriter
    }

    async fn execute(&self, research: ResearchOutput) -> Result<ScriptwriterOutput, AgentError> {
        self.write_script(&research).await
    }
}

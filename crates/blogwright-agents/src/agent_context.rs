//! Shared agent execution context and the common agent contract.

use blogwright_core::{
    AgentError, BlogwrightError, CompletionTransport, HttpTransport, Settings, Stage, StagePrompt,
    request_completion,
};
use std::fmt;
use std::sync::Arc;

/// Read-only configuration plus the transport every agent sends through.
///
/// Cloning is cheap; concurrent pipeline runs share one context.
#[derive(Clone)]
pub struct AgentContext {
    settings: Arc<Settings>,
    transport: Arc<dyn CompletionTransport>,
}

impl AgentContext {
    pub fn new(settings: Settings, transport: Arc<dyn CompletionTransport>) -> Self {
        Self {
            settings: Arc::new(settings),
            transport,
        }
    }

    /// Build a context from process environment and a `reqwest` transport.
    pub fn from_env() -> Result<Self, BlogwrightError> {
        let settings = Settings::from_env()?;
        let transport = HttpTransport::new()?;
        Ok(Self::new(settings, Arc::new(transport)))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Issue the stage's completion request and return the raw completion text.
    pub async fn complete(&self, stage: Stage, prompt: StagePrompt) -> Result<String, AgentError> {
        request_completion(self.transport.as_ref(), &self.settings, stage, prompt).await
    }
}

impl fmt::Debug for AgentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentContext")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Trait for agent implementations
#[async_trait::async_trait]
pub trait Agent: Send + Sync {
    type Input: Send + 'static;
    type Output: Send + 'static;

    /// Pipeline position of this agent
    fn stage(&self) -> Stage;

    /// Run the agent's single completion request
    async fn execute(&self, input: Self::Input) -> Result<Self::Output, AgentError>;
}

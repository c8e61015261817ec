//! Blogwright agents and the pipeline that chains them.
//!
//! ```text
//! (nothing) ──[Topic]──▶ Topic ──[Research]──▶ ResearchOutput ──[Scriptwriter]──▶ ScriptwriterOutput
//! ```
//!
//! Each agent issues exactly one completion request and can be invoked on its
//! own; [`Pipeline`] runs them in order and stops at the first failure.

pub mod agent_context;
pub mod orchestrator;
pub mod prompts;
pub mod researcher;
pub mod scriptwriter;
pub mod topic;

pub use agent_context::{Agent, AgentContext};
pub use orchestrator::{Pipeline, PipelineReport, PipelineState, StageTiming};
pub use researcher::{ResearchAgent, ResearchOutput, SUMMARY_PLACEHOLDER};
pub use scriptwriter::{MIN_CONTENT_CHARS, ScriptwriterAgent, ScriptwriterOutput};
pub use topic::{Topic, TopicAgent};

//! Blogwright core plumbing shared by the topic, research and scriptwriter agents.
//!
//! This crate owns configuration, the outbound completion contract, the error
//! taxonomy every agent reports through, and telemetry setup. The agents
//! themselves live in `blogwright-agents`.

pub mod config;
mod completion;
mod error;
pub mod metrics;
mod outcome;
pub mod redact;
mod security;
mod stage;
pub mod telemetry;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use completion::{
    ChatMessage, CompletionRequest, CompletionTransport, HttpTransport, RawReply, StagePrompt,
    extract_completion, request_completion,
};
pub use config::{Setting, Settings, StageProfiles};
pub use error::{AgentError, BlogwrightError, ErrorKind, TransportError};
pub use outcome::Outcome;
pub use security::SecretValue;
pub use stage::{Stage, StageProfile};
pub use telemetry::{TelemetryOptions, init_telemetry};

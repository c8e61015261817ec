use thiserror::Error;

use crate::config::Setting;
use crate::stage::Stage;

/// Core error type for Blogwright configuration and process setup.
#[derive(Debug, Error)]
pub enum BlogwrightError {
    #[error("configuration error: {0}")]
    InvalidConfiguration(String),
    #[error("http client error: {0}")]
    HttpClient(String),
}

/// Failure raised by a [`CompletionTransport`](crate::CompletionTransport) before a
/// response status is available.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("request timed out")]
    TimedOut,
    #[error("{0}")]
    Network(String),
}

/// Coarse classification of an [`AgentError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Http,
    Envelope,
    Content,
    Timeout,
    Transport,
    InvalidInput,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Http => "http",
            ErrorKind::Envelope => "envelope",
            ErrorKind::Content => "content",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Transport => "transport",
            ErrorKind::InvalidInput => "invalid_input",
        }
    }
}

/// Failure of a single agent call. Every variant records the stage that produced it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgentError {
    #[error("{setting} is not defined in environment variables")]
    MissingSetting { stage: Stage, setting: Setting },

    #[error("Completion API error: {}", status_line(.status, .reason))]
    HttpStatus {
        stage: Stage,
        status: u16,
        reason: String,
    },

    #[error("Invalid response structure from API")]
    InvalidEnvelope { stage: Stage },

    #[error("Failed to parse AI response as JSON: {message}")]
    MalformedJson { stage: Stage, message: String },

    #[error("Invalid or too short response from API")]
    ContentTooShort { stage: Stage, length: usize },

    #[error("Request timed out after {seconds} seconds")]
    Timeout { stage: Stage, seconds: u64 },

    #[error("{}: {}", .stage.failure_action(), .message)]
    Transport { stage: Stage, message: String },

    #[error("Invalid input: {reason}")]
    InvalidInput { stage: Stage, reason: String },
}

impl AgentError {
    pub fn stage(&self) -> Stage {
        match self {
            AgentError::MissingSetting { stage, .. }
            | AgentError::HttpStatus { stage, .. }
            | AgentError::InvalidEnvelope { stage }
            | AgentError::MalformedJson { stage, .. }
            | AgentError::ContentTooShort { stage, .. }
            | AgentError::Timeout { stage, .. }
            | AgentError::Transport { stage, .. }
            | AgentError::InvalidInput { stage, .. } => *stage,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AgentError::MissingSetting { .. } => ErrorKind::Configuration,
            AgentError::HttpStatus { .. } => ErrorKind::Http,
            AgentError::InvalidEnvelope { .. } => ErrorKind::Envelope,
            AgentError::MalformedJson { .. } | AgentError::ContentTooShort { .. } => {
                ErrorKind::Content
            }
            AgentError::Timeout { .. } => ErrorKind::Timeout,
            AgentError::Transport { .. } => ErrorKind::Transport,
            AgentError::InvalidInput { .. } => ErrorKind::InvalidInput,
        }
    }
}

/// `"503 Service Unavailable"`, or just `"599"` when there is no reason phrase.
fn status_line(status: &u16, reason: &str) -> String {
    match reason.trim() {
        "" => status.to_string(),
        reason => format!("{status} {reason}"),
    }
}

use axum::{Json, http::StatusCode, response::IntoResponse};
use blogwright_core::{AgentError, Stage};
use serde::Serialize;
use std::fmt;

pub const PIPELINE_AGENT: &str = "Pipeline";

/// Failure reply shaped as `{"agent": ..., "error": ...}`, plus `stage` when a
/// pipeline run failed part-way.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    agent: &'static str,
    stage: Option<Stage>,
    message: String,
}

impl AppError {
    pub fn new(status: StatusCode, agent: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            agent,
            stage: None,
            message: message.into(),
        }
    }

    pub fn bad_request(agent: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, agent, message)
    }

    /// A single agent call failed.
    pub fn agent(error: AgentError) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error.stage().agent_name(),
            error.to_string(),
        )
    }

    /// A pipeline run stopped at `error.stage()`.
    pub fn pipeline(error: AgentError) -> Self {
        Self {
            stage: Some(error.stage()),
            ..Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                PIPELINE_AGENT,
                error.to_string(),
            )
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    agent: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    stage: Option<Stage>,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let payload = ErrorResponse {
            agent: self.agent,
            stage: self.stage,
            error: self.message,
        };
        (self.status, Json(payload)).into_response()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.agent, self.message)
    }
}

impl std::error::Error for AppError {}

pub type ApiResult<T> = Result<T, AppError>;

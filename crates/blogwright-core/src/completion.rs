//! Outbound chat-completion contract shared by every agent.
//!
//! All three stages issue the same request shape:
//!
//! ```text
//! POST <endpoint>
//! Authorization: Bearer <credential>
//! Content-Type: application/json
//!
//! { "model": ..., "messages": [system, user], "temperature": ..., "max_tokens": ... }
//! ```
//!
//! and consume only `choices[0].message.content` from the response envelope.
//! [`request_completion`] owns the parts of that exchange that are identical
//! across stages: configuration checks, the stage deadline, status handling and
//! envelope extraction.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::config::StageRequestConfig;
use crate::{
    AgentError, BlogwrightError, SecretValue, Settings, Stage, StageProfile, TransportError,
    metrics, redact,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// JSON body posted to the completion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, prompt: StagePrompt, profile: StageProfile) -> Self {
        Self {
            model: model.into(),
            messages: vec![
                ChatMessage::system(prompt.system),
                ChatMessage::user(prompt.user),
            ],
            temperature: profile.temperature,
            max_tokens: profile.max_tokens,
        }
    }
}

/// The fixed instruction pair a stage sends.
#[derive(Debug, Clone)]
pub struct StagePrompt {
    pub system: String,
    pub user: String,
}

/// Status line and body of a completion response, before interpretation.
#[derive(Debug, Clone)]
pub struct RawReply {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl RawReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a completion request and returns the raw reply.
///
/// Implementations report only transport-level failures; status codes and body
/// contents are interpreted by [`request_completion`].
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn send(
        &self,
        endpoint: &str,
        api_key: &SecretValue,
        request: &CompletionRequest,
    ) -> Result<RawReply, TransportError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, BlogwrightError> {
        let client = Client::builder()
            .user_agent(concat!("blogwright/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| BlogwrightError::HttpClient(err.to_string()))?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::TimedOut
    } else {
        TransportError::Network(err.to_string())
    }
}

#[async_trait]
impl CompletionTransport for HttpTransport {
    async fn send(
        &self,
        endpoint: &str,
        api_key: &SecretValue,
        request: &CompletionRequest,
    ) -> Result<RawReply, TransportError> {
        let response = self
            .client
            .post(endpoint)
            .bearer_auth(api_key.expose())
            .json(request)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let body = response.text().await.map_err(classify)?;

        Ok(RawReply {
            status: status.as_u16(),
            reason,
            body,
        })
    }
}

/// Pull `choices[0].message.content` out of a response body.
///
/// Returns `None` for non-JSON bodies, missing fields, non-string content and
/// empty strings alike.
pub fn extract_completion(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let content = value
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()?;
    if content.is_empty() {
        None
    } else {
        Some(content.to_string())
    }
}

/// Issue one completion request for `stage` and return the raw completion text.
///
/// Configuration is checked before any I/O. The request future is dropped when
/// the stage deadline expires, which aborts the underlying HTTP exchange.
#[instrument(name = "completion.request", skip_all, fields(stage = %stage))]
pub async fn request_completion(
    transport: &dyn CompletionTransport,
    settings: &Settings,
    stage: Stage,
    prompt: StagePrompt,
) -> Result<String, AgentError> {
    let config = settings.resolve(stage)?;
    let request = CompletionRequest::new(config.model, prompt, config.profile);

    let started = Instant::now();
    let result = dispatch(transport, &config, stage, &request).await;
    let duration_ms = started.elapsed().as_millis() as u64;

    let status = match &result {
        Ok(_) => "success",
        Err(err) => err.kind().as_str(),
    };
    metrics::record_stage_call(stage, status, duration_ms);

    match &result {
        Ok(text) => debug!(chars = text.len(), duration_ms, "completion received"),
        Err(err) => warn!(error = %err, duration_ms, "completion request failed"),
    }

    result
}

async fn dispatch(
    transport: &dyn CompletionTransport,
    config: &StageRequestConfig<'_>,
    stage: Stage,
    request: &CompletionRequest,
) -> Result<String, AgentError> {
    let seconds = config.profile.timeout_secs();
    let pending = transport.send(config.endpoint, config.api_key, request);

    let reply = match timeout(config.profile.timeout, pending).await {
        Err(_) | Ok(Err(TransportError::TimedOut)) => {
            return Err(AgentError::Timeout { stage, seconds });
        }
        Ok(Err(TransportError::Network(message))) => {
            return Err(AgentError::Transport {
                stage,
                message: redact::sanitize_text(&message),
            });
        }
        Ok(Ok(reply)) => reply,
    };

    if !reply.is_success() {
        return Err(AgentError::HttpStatus {
            stage,
            status: reply.status,
            reason: reply.reason,
        });
    }

    extract_completion(&reply.body).ok_or(AgentError::InvalidEnvelope { stage })
}

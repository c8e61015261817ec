//! In-process [`CompletionTransport`] double for tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::{CompletionRequest, CompletionTransport, RawReply, SecretValue, TransportError};

enum Scripted {
    Reply(RawReply),
    Error(TransportError),
    Hang,
}

/// A request captured by [`ScriptedTransport`].
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub endpoint: String,
    pub api_key: String,
    pub request: CompletionRequest,
}

/// Replays queued replies in order and records every request it receives.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Scripted>>,
    sent: Mutex<Vec<SentRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 reply whose envelope carries `content`.
    pub fn push_completion(&self, content: &str) {
        let body = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        });
        self.push_body(200, &body.to_string());
    }

    pub fn push_status(&self, status: u16, reason: &str) {
        self.push(Scripted::Reply(RawReply {
            status,
            reason: reason.to_string(),
            body: String::new(),
        }));
    }

    pub fn push_body(&self, status: u16, body: &str) {
        self.push(Scripted::Reply(RawReply {
            status,
            reason: "OK".to_string(),
            body: body.to_string(),
        }));
    }

    pub fn push_error(&self, error: TransportError) {
        self.push(Scripted::Error(error));
    }

    /// Queue a request that never resolves.
    pub fn push_hang(&self) {
        self.push(Scripted::Hang);
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().expect("sent lock poisoned").len()
    }

    pub fn requests(&self) -> Vec<SentRequest> {
        self.sent.lock().expect("sent lock poisoned").clone()
    }

    fn push(&self, reply: Scripted) {
        self.replies
            .lock()
            .expect("reply lock poisoned")
            .push_back(reply);
    }
}

#[async_trait]
impl CompletionTransport for ScriptedTransport {
    async fn send(
        &self,
        endpoint: &str,
        api_key: &SecretValue,
        request: &CompletionRequest,
    ) -> Result<RawReply, TransportError> {
        self.sent
            .lock()
            .expect("sent lock poisoned")
            .push(SentRequest {
                endpoint: endpoint.to_string(),
                api_key: api_key.expose().to_string(),
                request: request.clone(),
            });

        let next = self.replies.lock().expect("reply lock poisoned").pop_front();
        match next {
            Some(Scripted::Reply(reply)) => Ok(reply),
            Some(Scripted::Error(error)) => Err(error),
            Some(Scripted::Hang) => {
                std::future::pending::<()>().await;
                unreachable!("pending future resolved")
            }
            None => Err(TransportError::Network(
                "no scripted reply queued".to_string(),
            )),
        }
    }
}

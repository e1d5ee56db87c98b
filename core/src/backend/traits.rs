//! Chat Transport Traits
//!
//! The request/response shapes of the chat endpoint and the [`ChatTransport`]
//! trait every transport implements.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Request body sent to the chat endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message, already trimmed
    pub message: String,
}

impl ChatRequest {
    /// Create a request for `message`
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body returned by the chat endpoint
///
/// JSON `null` and a missing key both decode to `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Application-level error message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Assistant reply text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    /// Reasoning trace behind the reply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
}

/// A response classified into what the coordinator renders
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatOutcome {
    /// The endpoint reported an application error
    Failed(String),
    /// The endpoint produced a reply
    Replied {
        /// Reply text
        reply: String,
        /// Non-empty reasoning trace, if any
        thinking: Option<String>,
    },
}

impl ChatResponse {
    /// Build a plain reply
    pub fn reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            ..Default::default()
        }
    }

    /// Build an application error
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Attach a reasoning trace
    #[must_use]
    pub fn with_thinking(mut self, thinking: impl Into<String>) -> Self {
        self.thinking = Some(thinking.into());
        self
    }

    /// Classify the response
    ///
    /// A non-empty `error` wins over everything else. Without one the body is
    /// a reply; a missing or null `reply` is an empty one (the server sends
    /// that when the model produced no closing think tag).
    #[must_use]
    pub fn classify(self) -> ChatOutcome {
        if let Some(error) = self.error.filter(|e| !e.is_empty()) {
            return ChatOutcome::Failed(error);
        }
        ChatOutcome::Replied {
            reply: self.reply.unwrap_or_default(),
            thinking: self.thinking.filter(|t| !t.is_empty()),
        }
    }
}

/// Transport fault: no usable response was obtained
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection, timeout or protocol failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The body was not a chat response
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Chat transport trait
///
/// Implement this to connect the coordinator to a chat service.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Transport name for logs (e.g. "http")
    fn name(&self) -> &str;

    /// Send one request and wait for its response
    ///
    /// No cancellation and no retries: the call settles exactly once.
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError>;
}

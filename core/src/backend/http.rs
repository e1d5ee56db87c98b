//! HTTP Transport
//!
//! [`ChatTransport`] over a JSON `POST` to the chat endpoint.
//!
//! The endpoint reports application errors as `{"error": ...}` with a 400 or
//! 500 status, so the status code alone does not make a fault: any body that
//! decodes as a [`ChatResponse`] is handed to the coordinator.

use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::traits::{ChatRequest, ChatResponse, ChatTransport, TransportError};

/// HTTP chat transport
#[derive(Clone, Debug)]
pub struct HttpTransport {
    /// Full URL of the chat endpoint
    endpoint: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport for `endpoint`
    ///
    /// Without a `timeout` a request may wait forever.
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            endpoint: endpoint.into(),
            http_client: builder.build()?,
        })
    }

    /// Endpoint URL
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        let start = Instant::now();

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Chat endpoint responded"
        );

        serde_json::from_slice::<ChatResponse>(&body).map_err(|e| {
            TransportError::Malformed(format!("status {status}: {e}"))
        })
    }
}

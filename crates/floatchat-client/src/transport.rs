use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, warn};

use crate::error::TransportError;
use crate::wire::{ChatPayload, ChatRequest, ErrorBody};

/// Issues chat queries against a backend.
///
/// The orchestrator only sees this trait; one implementation speaks HTTP and
/// tests substitute their own.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Sends one query and returns the raw payload.
    ///
    /// Exactly one request per call; no retry, no coalescing.
    async fn send(&self, query: &str) -> Result<ChatPayload, TransportError>;

    /// Probes backend reachability.
    async fn health(&self) -> Result<(), TransportError>;
}

/// HTTP implementation of [`ChatTransport`] against the backend `/chat`
/// endpoint.
///
/// Holds no conversation state; it is a pure request/response mapper.
/// Cloning shares the underlying connection pool.
#[derive(Clone)]
pub struct HttpChatClient {
    client: Client,
    base_url: String,
}

impl HttpChatClient {
    /// Creates a client for the given base URL (scheme, host, port).
    pub fn new(base_url: String) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("floatchat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Initialization(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ChatTransport for HttpChatClient {
    async fn send(&self, query: &str) -> Result<ChatPayload, TransportError> {
        let url = format!("{}/chat", self.base_url);
        let request = ChatRequest {
            query: query.to_string(),
        };

        debug!(url = %url, query_len = query.len(), "Sending chat request");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Chat request did not reach the backend");
                TransportError::Unreachable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = ErrorBody::explanation(&body)
                .unwrap_or_else(|| format!("the backend returned HTTP {}", status.as_u16()));
            error!(status = status.as_u16(), detail = %detail, "Backend rejected chat request");
            return Err(TransportError::Backend {
                status: status.as_u16(),
                detail,
            });
        }

        let payload: ChatPayload = response.json().await.map_err(|e| {
            error!(error = %e, "Chat response body was not a payload object");
            TransportError::MalformedResponse(e.to_string())
        })?;

        debug!(
            has_insights = payload.insights.is_some(),
            has_chart = payload.plotly_json.is_some(),
            "Chat response received"
        );
        Ok(payload)
    }

    async fn health(&self) -> Result<(), TransportError> {
        let url = format!("{}/health", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Backend {
                status: status.as_u16(),
                detail: format!("health check returned HTTP {}", status.as_u16()),
            });
        }
        Ok(())
    }
}

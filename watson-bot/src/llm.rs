//! LLM client seam: handlers depend on [`LlmClient`], not on a concrete API
//! client, so tests can inject canned responses and event streams.

use async_trait::async_trait;
use futures::stream::BoxStream;
use xai_client::{ChatRequest, ChatResponse, StreamEvent, XaiClient};

/// Inference API surface the handlers use: one-shot sampling for plain chat
/// and an event stream for live search.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends the request and returns the complete response.
    async fn sample(&self, request: ChatRequest) -> anyhow::Result<ChatResponse>;

    /// Opens a streaming request; the returned stream ends after the terminal
    /// event (which carries citations and usage).
    async fn stream_events(
        &self,
        request: ChatRequest,
    ) -> anyhow::Result<BoxStream<'static, anyhow::Result<StreamEvent>>>;
}

#[async_trait]
impl LlmClient for XaiClient {
    async fn sample(&self, request: ChatRequest) -> anyhow::Result<ChatResponse> {
        XaiClient::sample(self, &request).await
    }

    async fn stream_events(
        &self,
        request: ChatRequest,
    ) -> anyhow::Result<BoxStream<'static, anyhow::Result<StreamEvent>>> {
        XaiClient::stream(self, &request).await
    }
}

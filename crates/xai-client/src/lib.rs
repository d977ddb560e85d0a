//! # xAI API client
//!
//! Thin wrapper over reqwest for the xAI chat completions endpoint: one-shot
//! sampling ([`XaiClient::sample`]) and SSE streaming ([`XaiClient::stream`]).
//! Provides token masking for safe logging and a small request builder.

mod sse;
mod types;

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Context;
use futures::stream::{self, BoxStream};
use futures::StreamExt;

use crate::sse::SseBuffer;
use crate::types::{WireRequest, WireResponse, WireStreamChunk};

pub use crate::types::{
    system, user, ChatMessage, ChatRequest, ChatResponse, StreamEvent, Tool, ToolCall, Usage,
};

/// Public xAI API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.x.ai/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 3600;

/// Masks an API key for safe logging: first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 {
        "***".to_string()
    } else {
        format!("{}***{}", &token[..7], &token[len - 4..])
    }
}

/// xAI chat client. Holds a pooled reqwest client; cheap to clone.
#[derive(Clone)]
pub struct XaiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl XaiClient {
    /// Builds a client for the default API base URL with the default
    /// (generous) timeout.
    pub fn new(api_key: String) -> anyhow::Result<Self> {
        Self::with_options(api_key, DEFAULT_BASE_URL.to_string(), DEFAULT_TIMEOUT_SECS)
    }

    /// Builds a client with a custom base URL and request timeout in seconds.
    /// The timeout bounds the whole request, including stream consumption.
    pub fn with_options(
        api_key: String,
        base_url: String,
        timeout_secs: u64,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Sends a chat request and returns the full assistant reply.
    ///
    /// Logs masked API key, model, and token usage. Errors on non-2xx status
    /// (with response body) or an empty choice list.
    pub async fn sample(&self, request: &ChatRequest) -> anyhow::Result<ChatResponse> {
        tracing::info!(
            model = %request.model,
            message_count = request.messages.len(),
            api_key = %mask_token(&self.api_key),
            "xAI sample request"
        );

        let wire = WireRequest {
            model: &request.model,
            messages: &request.messages,
            tools: &request.tools,
            stream: false,
        };

        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&wire)
            .send()
            .await
            .context("xAI request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("xAI API returned {}: {}", status, body);
        }

        let parsed: WireResponse = response
            .json()
            .await
            .context("failed to decode xAI response")?;
        let usage = parsed.usage.map(|u| u.into_usage());

        if let Some(ref u) = usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "xAI sample usage"
            );
        }

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .context("xAI response has no choices")?;

        Ok(ChatResponse {
            content: choice.message.content.unwrap_or_default(),
            citations: parsed.citations,
            usage,
        })
    }

    /// Opens a streaming chat request and returns the event stream.
    ///
    /// Events arrive in wire order; the terminal event has `done = true` and
    /// carries citations and final usage. Transport and decode failures
    /// surface as stream items and end the stream.
    pub async fn stream(
        &self,
        request: &ChatRequest,
    ) -> anyhow::Result<BoxStream<'static, anyhow::Result<StreamEvent>>> {
        tracing::info!(
            model = %request.model,
            message_count = request.messages.len(),
            tool_count = request.tools.len(),
            api_key = %mask_token(&self.api_key),
            "xAI stream request"
        );

        let wire = WireRequest {
            model: &request.model,
            messages: &request.messages,
            tools: &request.tools,
            stream: true,
        };

        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&wire)
            .send()
            .await
            .context("xAI stream request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("xAI API returned {}: {}", status, body);
        }

        let body = response.bytes_stream().boxed();
        let state = (body, SseBuffer::new(), VecDeque::new(), false);

        let events = stream::try_unfold(
            state,
            |(mut body, mut buf, mut pending, mut finished)| async move {
                loop {
                    if let Some(event) = pending.pop_front() {
                        return Ok(Some((event, (body, buf, pending, finished))));
                    }
                    if finished {
                        return Ok(None);
                    }
                    match body.next().await {
                        Some(Ok(bytes)) => {
                            for payload in buf.push(&bytes) {
                                if payload == "[DONE]" {
                                    finished = true;
                                    break;
                                }
                                pending.push_back(parse_stream_chunk(&payload)?);
                            }
                        }
                        Some(Err(e)) => {
                            return Err(anyhow::anyhow!("xAI stream error: {}", e));
                        }
                        None => return Ok(None),
                    }
                }
            },
        );

        Ok(events.boxed())
    }
}

/// Decodes one SSE data payload into a [`StreamEvent`].
fn parse_stream_chunk(payload: &str) -> anyhow::Result<StreamEvent> {
    let chunk: WireStreamChunk = serde_json::from_str(payload)
        .with_context(|| format!("failed to decode stream chunk: {}", payload))?;

    let mut event = StreamEvent {
        citations: chunk.citations,
        usage: chunk.usage.map(|u| u.into_usage()),
        ..StreamEvent::default()
    };
    event.reasoning_tokens = event.usage.as_ref().and_then(|u| u.reasoning_tokens);

    for choice in chunk.choices {
        if let Some(content) = choice.delta.content {
            event.content.push_str(&content);
        }
        event.tool_calls.extend(
            choice
                .delta
                .tool_calls
                .into_iter()
                .filter_map(|tc| tc.into_tool_call()),
        );
        if choice.finish_reason.is_some() {
            event.done = true;
        }
    }

    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token_short() {
        assert_eq!(mask_token(""), "***");
        assert_eq!(mask_token("short"), "***");
        assert_eq!(mask_token("elevenchars"), "***");
    }

    #[test]
    fn test_mask_token_long() {
        assert_eq!(mask_token("xai-abcdefghijklmnop"), "xai-abc***mnop");
    }

    #[test]
    fn test_parse_content_chunk() {
        let event = parse_stream_chunk(
            r#"{"choices":[{"delta":{"content":"Hello"},"finish_reason":null}]}"#,
        )
        .unwrap();
        assert_eq!(event.content, "Hello");
        assert!(!event.done);
        assert!(event.tool_calls.is_empty());
        assert!(event.citations.is_empty());
    }

    #[test]
    fn test_parse_tool_call_chunk() {
        let event = parse_stream_chunk(
            r#"{"choices":[{"delta":{"tool_calls":[{"function":{"name":"web_search","arguments":"{\"q\":\"rust\"}"}}]},"finish_reason":null}]}"#,
        )
        .unwrap();
        assert_eq!(event.tool_calls.len(), 1);
        assert_eq!(event.tool_calls[0].name, "web_search");
        assert_eq!(event.tool_calls[0].arguments, r#"{"q":"rust"}"#);
    }

    /// **Test: interim usage chunk surfaces reasoning tokens.**
    #[test]
    fn test_parse_reasoning_usage_chunk() {
        let event = parse_stream_chunk(
            r#"{"choices":[{"delta":{},"finish_reason":null}],"usage":{"total_tokens":12,"completion_tokens_details":{"reasoning_tokens":12}}}"#,
        )
        .unwrap();
        assert_eq!(event.reasoning_tokens, Some(12));
        assert!(!event.done);
    }

    #[test]
    fn test_parse_terminal_chunk() {
        let event = parse_stream_chunk(
            r#"{"choices":[{"delta":{},"finish_reason":"stop"}],"usage":{"prompt_tokens":3,"completion_tokens":9,"total_tokens":12},"citations":["https://example.com/a","https://example.com/b"]}"#,
        )
        .unwrap();
        assert!(event.done);
        assert_eq!(event.citations.len(), 2);
        assert_eq!(event.usage.as_ref().unwrap().total_tokens, 12);
    }

    #[test]
    fn test_parse_invalid_chunk_is_error() {
        assert!(parse_stream_chunk("not json").is_err());
    }
}

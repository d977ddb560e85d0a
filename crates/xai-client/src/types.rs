//! Request and response types for the xAI chat completions API.
//!
//! Public types carry only the fields the bot consumes; the raw wire shapes
//! live in private structs and are mapped on deserialization.

use serde::{Deserialize, Serialize};

/// One chat message (role + content).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Builds a system message.
pub fn system(content: impl Into<String>) -> ChatMessage {
    ChatMessage {
        role: "system".to_string(),
        content: content.into(),
    }
}

/// Builds a user message.
pub fn user(content: impl Into<String>) -> ChatMessage {
    ChatMessage {
        role: "user".to_string(),
        content: content.into(),
    }
}

/// Server-side tool specification. xAI executes these tools on its side; the
/// client only declares which ones are enabled for a request.
#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    #[serde(rename = "type")]
    pub kind: String,
}

impl Tool {
    /// Live web search tool.
    pub fn web_search() -> Self {
        Self {
            kind: "web_search".to_string(),
        }
    }

    /// X (Twitter) search tool.
    pub fn x_search() -> Self {
        Self {
            kind: "x_search".to_string(),
        }
    }
}

/// A chat request: model, conversation so far, and enabled server-side tools.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub tools: Vec<Tool>,
}

impl ChatRequest {
    /// Creates a request for the given model with no messages or tools.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            tools: Vec::new(),
        }
    }

    /// Appends a message.
    pub fn message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Enables a server-side tool.
    pub fn tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool);
        self
    }
}

/// Token usage for a completed response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
    /// Reasoning tokens spent before visible output; absent for models that do
    /// not report them.
    pub reasoning_tokens: Option<u64>,
}

/// One server-side tool invocation reported by the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub name: String,
    /// Raw JSON arguments as sent by the API.
    pub arguments: String,
}

/// One incremental unit of a streamed response.
///
/// `citations` and (final) `usage` are only populated on the terminal event,
/// which carries `done = true`. Interim events may still carry usage while the
/// model is reasoning, which is how thinking-token counts arrive.
#[derive(Debug, Clone, Default)]
pub struct StreamEvent {
    /// Content delta for this event; possibly empty.
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
    /// Reasoning tokens reported so far, when the chunk carried usage.
    pub reasoning_tokens: Option<u64>,
    /// Source URLs; non-empty only on the terminal event.
    pub citations: Vec<String>,
    pub usage: Option<Usage>,
    /// True when the chunk carried a finish reason.
    pub done: bool,
}

/// A complete (non-streamed) chat response.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub content: String,
    pub citations: Vec<String>,
    pub usage: Option<Usage>,
}

// --- wire shapes ---

#[derive(Serialize)]
pub(crate) struct WireRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub tools: &'a [Tool],
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub stream: bool,
}

#[derive(Deserialize)]
pub(crate) struct WireUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
    pub reasoning_tokens: Option<u64>,
    pub completion_tokens_details: Option<WireTokenDetails>,
}

#[derive(Deserialize)]
pub(crate) struct WireTokenDetails {
    pub reasoning_tokens: Option<u64>,
}

impl WireUsage {
    pub(crate) fn into_usage(self) -> Usage {
        // Some models report reasoning tokens at the top level, others nested
        // under completion_tokens_details.
        let reasoning_tokens = self
            .reasoning_tokens
            .or_else(|| self.completion_tokens_details.and_then(|d| d.reasoning_tokens));
        Usage {
            prompt_tokens: self.prompt_tokens,
            completion_tokens: self.completion_tokens,
            total_tokens: self.total_tokens,
            reasoning_tokens,
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct WireFunction {
    pub name: Option<String>,
    pub arguments: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct WireToolCall {
    pub function: Option<WireFunction>,
}

impl WireToolCall {
    /// Maps to a public ToolCall; entries without a function name are
    /// continuation fragments and are skipped.
    pub(crate) fn into_tool_call(self) -> Option<ToolCall> {
        let function = self.function?;
        let name = function.name.filter(|n| !n.is_empty())?;
        Some(ToolCall {
            name,
            arguments: function.arguments.unwrap_or_default(),
        })
    }
}

#[derive(Deserialize)]
pub(crate) struct WireDelta {
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Vec<WireToolCall>,
}

#[derive(Deserialize)]
pub(crate) struct WireStreamChoice {
    pub delta: WireDelta,
    pub finish_reason: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct WireStreamChunk {
    #[serde(default)]
    pub choices: Vec<WireStreamChoice>,
    pub usage: Option<WireUsage>,
    #[serde(default)]
    pub citations: Vec<String>,
}

#[derive(Deserialize)]
pub(crate) struct WireResponseMessage {
    pub content: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct WireChoice {
    pub message: WireResponseMessage,
}

#[derive(Deserialize)]
pub(crate) struct WireResponse {
    #[serde(default)]
    pub choices: Vec<WireChoice>,
    pub usage: Option<WireUsage>,
    #[serde(default)]
    pub citations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_without_empty_fields() {
        let request = ChatRequest::new("grok-4").message(user("hi"));
        let wire = WireRequest {
            model: &request.model,
            messages: &request.messages,
            tools: &request.tools,
            stream: false,
        };
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json["model"], "grok-4");
        assert!(json.get("tools").is_none());
        assert!(json.get("stream").is_none());
    }

    #[test]
    fn test_request_serializes_tools_and_stream() {
        let request = ChatRequest::new("grok-4-fast-non-reasoning")
            .tool(Tool::web_search())
            .tool(Tool::x_search())
            .message(user("query"));
        let wire = WireRequest {
            model: &request.model,
            messages: &request.messages,
            tools: &request.tools,
            stream: true,
        };
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json["tools"][0]["type"], "web_search");
        assert_eq!(json["tools"][1]["type"], "x_search");
        assert_eq!(json["stream"], true);
    }

    /// **Test: reasoning tokens are picked up from either wire location.**
    #[test]
    fn test_usage_reasoning_tokens_nested_and_flat() {
        let flat: WireUsage =
            serde_json::from_str(r#"{"total_tokens":10,"reasoning_tokens":4}"#).unwrap();
        assert_eq!(flat.into_usage().reasoning_tokens, Some(4));

        let nested: WireUsage = serde_json::from_str(
            r#"{"total_tokens":10,"completion_tokens_details":{"reasoning_tokens":7}}"#,
        )
        .unwrap();
        assert_eq!(nested.into_usage().reasoning_tokens, Some(7));
    }

    #[test]
    fn test_tool_call_without_name_is_skipped() {
        let fragment: WireToolCall =
            serde_json::from_str(r#"{"function":{"arguments":"...tail"}}"#).unwrap();
        assert!(fragment.into_tool_call().is_none());

        let complete: WireToolCall =
            serde_json::from_str(r#"{"function":{"name":"web_search","arguments":"{}"}}"#).unwrap();
        let call = complete.into_tool_call().unwrap();
        assert_eq!(call.name, "web_search");
        assert_eq!(call.arguments, "{}");
    }
}

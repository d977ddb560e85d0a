//! Shared test doubles: a recording Bot and a scripted LlmClient.
//! No Telegram or xAI network calls anywhere.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use futures::stream::{self, BoxStream, StreamExt};
use watson_bot::{Bot, Chat, LlmClient, Message, Result as BotResult, User};
use xai_client::{ChatRequest, ChatResponse, StreamEvent, ToolCall, Usage};

/// One outbound call captured by [`RecordingBot`], in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Send { text: String },
    Edit { message_id: String, text: String },
    Typing,
}

/// Bot double that records every outbound call and returns sequential ids.
pub struct RecordingBot {
    deliveries: Mutex<Vec<Delivery>>,
    next_message_id: AtomicUsize,
}

impl RecordingBot {
    pub fn new() -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
            next_message_id: AtomicUsize::new(1),
        }
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, _chat: &Chat, text: &str) -> BotResult<()> {
        self.deliveries.lock().unwrap().push(Delivery::Send {
            text: text.to_string(),
        });
        Ok(())
    }

    async fn reply_to(&self, _message: &Message, text: &str) -> BotResult<()> {
        self.deliveries.lock().unwrap().push(Delivery::Send {
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_message_and_return_id(&self, _chat: &Chat, text: &str) -> BotResult<String> {
        self.deliveries.lock().unwrap().push(Delivery::Send {
            text: text.to_string(),
        });
        let id = self.next_message_id.fetch_add(1, Ordering::SeqCst);
        Ok(id.to_string())
    }

    async fn edit_message(&self, _chat: &Chat, message_id: &str, text: &str) -> BotResult<()> {
        self.deliveries.lock().unwrap().push(Delivery::Edit {
            message_id: message_id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_typing(&self, _chat: &Chat) -> BotResult<()> {
        self.deliveries.lock().unwrap().push(Delivery::Typing);
        Ok(())
    }
}

/// LlmClient double: canned sample result and scripted event stream, with
/// call counters for zero-call assertions.
pub struct MockLlm {
    sample_result: Mutex<Option<anyhow::Result<ChatResponse>>>,
    events: Mutex<Option<Vec<anyhow::Result<StreamEvent>>>>,
    pub sample_calls: AtomicUsize,
    pub stream_calls: AtomicUsize,
}

impl MockLlm {
    /// No scripted behavior; any call fails. Use when zero calls are expected.
    pub fn unused() -> Self {
        Self {
            sample_result: Mutex::new(None),
            events: Mutex::new(None),
            sample_calls: AtomicUsize::new(0),
            stream_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_sample(content: &str) -> Self {
        let mock = Self::unused();
        *mock.sample_result.lock().unwrap() = Some(Ok(ChatResponse {
            content: content.to_string(),
            citations: Vec::new(),
            usage: None,
        }));
        mock
    }

    pub fn with_sample_error(message: &str) -> Self {
        let mock = Self::unused();
        *mock.sample_result.lock().unwrap() = Some(Err(anyhow::anyhow!("{}", message)));
        mock
    }

    pub fn with_events(events: Vec<anyhow::Result<StreamEvent>>) -> Self {
        let mock = Self::unused();
        *mock.events.lock().unwrap() = Some(events);
        mock
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn sample(&self, _request: ChatRequest) -> anyhow::Result<ChatResponse> {
        self.sample_calls.fetch_add(1, Ordering::SeqCst);
        self.sample_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(anyhow::anyhow!("no sample scripted")))
    }

    async fn stream_events(
        &self,
        _request: ChatRequest,
    ) -> anyhow::Result<BoxStream<'static, anyhow::Result<StreamEvent>>> {
        self.stream_calls.fetch_add(1, Ordering::SeqCst);
        let events = self
            .events
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| anyhow::anyhow!("no events scripted"))?;
        Ok(stream::iter(events).boxed())
    }
}

pub fn make_message(content: &str) -> Message {
    Message {
        id: "msg_1".to_string(),
        user: User {
            id: 123,
            username: Some("user".to_string()),
            first_name: Some("User".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 456,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        created_at: Utc::now(),
    }
}

// --- event builders ---

pub fn content_event(content: &str) -> StreamEvent {
    StreamEvent {
        content: content.to_string(),
        ..StreamEvent::default()
    }
}

pub fn reasoning_event(tokens: u64) -> StreamEvent {
    StreamEvent {
        reasoning_tokens: Some(tokens),
        ..StreamEvent::default()
    }
}

pub fn tool_event(name: &str, arguments: &str) -> StreamEvent {
    StreamEvent {
        tool_calls: vec![ToolCall {
            name: name.to_string(),
            arguments: arguments.to_string(),
        }],
        ..StreamEvent::default()
    }
}

pub fn terminal_event(citation_count: usize, total_tokens: u64) -> StreamEvent {
    StreamEvent {
        citations: (0..citation_count)
            .map(|i| format!("https://example.com/{}", i))
            .collect(),
        usage: Some(Usage {
            prompt_tokens: 1,
            completion_tokens: total_tokens.saturating_sub(1),
            total_tokens,
            reasoning_tokens: None,
        }),
        done: true,
        ..StreamEvent::default()
    }
}

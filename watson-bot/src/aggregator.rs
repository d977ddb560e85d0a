//! # Stream aggregation
//!
//! Consumes incremental response events from a live-search stream and drives
//! two outputs: de-duplicated status strings to render while the request is in
//! flight, and one final composite message built after the stream ends.
//!
//! The aggregator itself is pure state: it never touches the transport, so the
//! whole state machine is testable without a bot or a network.

use xai_client::{StreamEvent, Usage};

/// Telegram's hard per-message length limit, in characters.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Status shown once when the first visible content arrives.
pub const GENERATING_STATUS: &str = "📝 Generating response...";

/// How many characters of tool arguments are shown in a summary line.
const TOOL_ARGS_PREVIEW_CHARS: usize = 100;

/// How many tool-call summaries make it into the final message. All calls are
/// logged; only the first few are shown to the user.
const FINAL_TOOL_CALLS_SHOWN: usize = 3;

/// Aggregation phase. One-way: the first non-empty content delta moves the
/// stream from Thinking to Generating, and it never goes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The model is reasoning silently; only token counts arrive.
    Thinking,
    /// The model is emitting visible content.
    Generating,
}

/// Per-request aggregation state. Created at the start of one live-search
/// request and discarded when its final message has been sent.
pub struct StreamAggregator {
    phase: Phase,
    text: String,
    tool_calls: Vec<String>,
    last_status: String,
    citations: Vec<String>,
    usage: Option<Usage>,
}

impl StreamAggregator {
    pub fn new() -> Self {
        Self {
            phase: Phase::Thinking,
            text: String::new(),
            tool_calls: Vec::new(),
            last_status: String::new(),
            citations: Vec::new(),
            usage: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Usage from the most recent event that carried one (the terminal event
    /// in a well-formed stream).
    pub fn usage(&self) -> Option<&Usage> {
        self.usage.as_ref()
    }

    /// Tool-call summaries collected so far, in arrival order.
    pub fn tool_calls(&self) -> &[String] {
        &self.tool_calls
    }

    /// Folds one event into the state and returns the status strings to
    /// render for it, in order. A status already shown is not returned again.
    pub fn apply(&mut self, event: &StreamEvent) -> Vec<String> {
        let mut renders = Vec::new();

        for call in &event.tool_calls {
            self.tool_calls.push(format!(
                "🔧 {}: {}...",
                call.name,
                truncate_chars(&call.arguments, TOOL_ARGS_PREVIEW_CHARS)
            ));
        }

        if self.phase == Phase::Thinking {
            // A reported count of zero is treated as absent and does not
            // produce a "0 tokens" render.
            if let Some(tokens) = event.reasoning_tokens.filter(|&t| t > 0) {
                let status = format!("🤔 Thinking... ({} tokens)", tokens);
                if status != self.last_status {
                    self.last_status = status.clone();
                    renders.push(status);
                }
            }
        }

        if !event.content.is_empty() && self.phase == Phase::Thinking {
            self.phase = Phase::Generating;
            self.last_status = GENERATING_STATUS.to_string();
            renders.push(GENERATING_STATUS.to_string());
        }

        if !event.content.is_empty() && self.phase == Phase::Generating {
            self.text.push_str(&event.content);
        }

        if !event.citations.is_empty() {
            self.citations = event.citations.clone();
        }
        if let Some(usage) = &event.usage {
            self.usage = Some(usage.clone());
        }

        renders
    }

    /// Builds the final composite message: tool summaries (first few), then
    /// the accumulated text, then the citation count when sources were used.
    pub fn final_message(&self) -> String {
        let mut out = String::new();

        if !self.tool_calls.is_empty() {
            let shown = self.tool_calls.len().min(FINAL_TOOL_CALLS_SHOWN);
            out.push_str("**Tools Used:**\n");
            out.push_str(&self.tool_calls[..shown].join("\n"));
            out.push_str("\n\n");
        }

        out.push_str(&self.text);

        if !self.citations.is_empty() {
            out.push_str(&format!(
                "\n\n📚 **Citations:** {} sources",
                self.citations.len()
            ));
        }

        out
    }
}

impl Default for StreamAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the first `limit` characters of `s` (not bytes; slicing a
/// multi-byte character would panic).
pub fn truncate_chars(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Splits `text` into consecutive chunks of exactly `limit` characters (the
/// last may be shorter). Text within the limit comes back as a single part.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for ch in text.chars() {
        current.push(ch);
        count += 1;
        if count == limit {
            parts.push(std::mem::take(&mut current));
            count = 0;
        }
    }
    if !current.is_empty() || parts.is_empty() {
        parts.push(current);
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("hello", 100), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("日本語テキスト", 2), "日本");
    }

    #[test]
    fn test_split_message_short_text_single_part() {
        assert_eq!(split_message("hi", 4096), vec!["hi"]);
        assert_eq!(split_message("", 4096), vec![""]);
    }

    #[test]
    fn test_split_message_exact_multiple() {
        let parts = split_message(&"x".repeat(8192), 4096);
        assert_eq!(parts.len(), 2);
        assert!(parts.iter().all(|p| p.chars().count() == 4096));
    }

    #[test]
    fn test_split_message_counts_chars_not_bytes() {
        // 5 three-byte chars, limit 2 -> 2 + 2 + 1
        let parts = split_message("あいうえお", 2);
        assert_eq!(parts, vec!["あい", "うえ", "お"]);
    }
}

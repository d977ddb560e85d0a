//! Incremental server-sent-events parsing for the streaming chat endpoint.
//!
//! The HTTP body arrives as arbitrary byte chunks; a chunk boundary can fall
//! inside a line or inside a multi-byte character, so lines are only decoded
//! once their trailing newline has been seen.

/// Accumulates body bytes and yields complete `data:` payloads.
#[derive(Default)]
pub(crate) struct SseBuffer {
    buf: Vec<u8>,
}

impl SseBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Feeds one body chunk and returns the data payloads completed by it,
    /// in order. Non-data lines (comments, blank keep-alives) are dropped.
    pub(crate) fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(bytes);

        let mut payloads = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\n', '\r']);
            if let Some(data) = line.strip_prefix("data:") {
                payloads.push(data.trim_start().to_string());
            }
        }
        payloads
    }
}

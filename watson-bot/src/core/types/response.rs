//! Handler chain result type.

/// Handler result for the chain. `Reply(text)` carries the text that was sent
/// so the chain can log it and tests can assert on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Not this handler's message; pass to the next one.
    Continue,
    /// Message consumed, nothing sent (or sends already done in-handler).
    Stop,
    /// Message consumed; `text` was sent as the reply.
    Reply(String),
}

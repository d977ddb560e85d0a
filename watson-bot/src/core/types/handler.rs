//! Handler trait and transport conversion traits.

use async_trait::async_trait;

use super::{message::Message, response::HandlerResponse, user::User};

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// One step of the dispatch chain. Handlers send their own replies through the
/// [`crate::core::Bot`] abstraction and report back how the chain should proceed.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Processes the message. Return Stop or Reply to end the chain.
    async fn handle(&self, message: &Message) -> crate::core::error::Result<HandlerResponse>;
}

//! Core model types: identities, messages, handler abstractions.

pub mod chat;
pub mod handler;
pub mod message;
pub mod response;
pub mod user;

pub use chat::Chat;
pub use handler::{Handler, ToCoreMessage, ToCoreUser};
pub use message::Message;
pub use response::HandlerResponse;
pub use user::User;

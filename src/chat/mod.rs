pub mod client;
pub mod engine;
mod error;
pub mod gateway;
pub mod message;
pub mod prompt;
pub mod session;

#[cfg(test)]
mod testing;

pub use engine::Concierge;
pub use error::GatewayError;
pub use message::{Message, MessageRole};
pub use session::SessionEvent;

mod agent;
mod providers;

pub use agent::{CompletionAgent, ModelConnector};
pub use providers::Provider;

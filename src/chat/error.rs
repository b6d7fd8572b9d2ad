use std::time::Duration;

use rig::completion::CompletionError;
use thiserror::Error;

/// Everything that can go wrong while asking the model for a reply.
///
/// These never leave the gateway; they are logged and turned into a fallback message.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("no API key found in environment variable `{0}`")]
    MissingCredential(String),

    #[error("completion request failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("provider answered with non-text content")]
    UnexpectedContent,

    #[error("no response from provider after {0:?}")]
    Timeout(Duration),
}

use async_trait::async_trait;
use rig::{
    completion::CompletionRequest,
    message::{AssistantContent, Message as RigMessage},
};
use serde_json::json;

use crate::{
    chat::{GatewayError, message::Message, prompt::ConciergePrompt},
    config::structure::LLMConfig,
};

use super::providers::DynCompletionModel;

/// Something that can turn a grounded prompt into a model reply.
///
/// `Ok(None)` means the provider answered but without any text.
#[async_trait]
pub trait ModelConnector: Send + Sync {
    async fn complete(
        &self,
        prompt: ConciergePrompt,
        history: Vec<Message>,
    ) -> Result<Option<String>, GatewayError>;
}

/// Talks to the configured hosted model, one request per call.
pub struct CompletionAgent {
    config: LLMConfig,
}

impl CompletionAgent {
    pub fn new(config: LLMConfig) -> Self {
        Self { config }
    }

    /// The key is looked up on every call so a missing or rotated key only affects that turn.
    fn api_key(&self) -> Result<String, GatewayError> {
        std::env::var(&self.config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GatewayError::MissingCredential(self.config.api_key_env.clone()))
    }
}

#[async_trait]
impl ModelConnector for CompletionAgent {
    async fn complete(
        &self,
        prompt: ConciergePrompt,
        history: Vec<Message>,
    ) -> Result<Option<String>, GatewayError> {
        let api_key = self.api_key()?;

        let client = self
            .config
            .provider
            .client(&api_key, self.config.custom_url.as_deref());
        let completion_model = client.completion_model(&self.config.model).await;

        let chat_history: Vec<RigMessage> = match self.config.include_history.unwrap_or(false) {
            true => history.into_iter().map(RigMessage::from).collect(),
            false => vec![],
        };

        log::debug!(
            "requesting completion from {} ({}), {} history messages",
            self.config.provider,
            self.config.model,
            chat_history.len()
        );

        let request = CompletionRequest {
            additional_params: self.config.top_p.map(|top_p| json!({ "top_p": top_p })),
            chat_history,
            documents: vec![],
            max_tokens: self.config.max_tokens,
            preamble: None,
            temperature: self.config.temperature,
            tools: vec![],
            prompt: RigMessage::user(prompt.into_inner()),
        };

        let response = completion_model.completion(request).await?;

        match response.first() {
            AssistantContent::Text(text) if text.text.is_empty() => Ok(None),
            AssistantContent::Text(text) => Ok(Some(text.text)),
            _ => Err(GatewayError::UnexpectedContent),
        }
    }
}

use std::fmt::Display;

use async_trait::async_trait;

use rig::{
    OneOrMany,
    completion::{CompletionError, CompletionRequest},
    message::AssistantContent,
    providers::{anthropic, gemini, openai},
};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub enum ProviderClient {
    Anthropic(anthropic::Client),
    Gemini(gemini::Client),
    OpenAI(openai::Client),
}

#[async_trait]
pub trait DynCompletionModel: Send + Sync {
    async fn completion(
        &self,
        completion: CompletionRequest,
    ) -> Result<OneOrMany<AssistantContent>, CompletionError>;
}

#[async_trait]
impl<T> DynCompletionModel for T
where
    T: rig::completion::CompletionModel + Send + Sync,
{
    async fn completion(
        &self,
        request: CompletionRequest,
    ) -> Result<OneOrMany<AssistantContent>, CompletionError> {
        Ok(rig::completion::CompletionModel::completion(self, request)
            .await?
            .choice)
    }
}

impl ProviderClient {
    /// Returns a completion model wrapper for the given provider and model name.
    pub async fn completion_model(&self, model: &str) -> Box<dyn DynCompletionModel> {
        match self {
            ProviderClient::Anthropic(client) => Box::new(client.completion_model(model)),
            ProviderClient::Gemini(client) => Box::new(client.completion_model(model)),
            ProviderClient::OpenAI(client) => Box::new(client.completion_model(model)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "anthropic")]
    Anthropic,

    #[default]
    #[serde(rename = "gemini")]
    #[serde(alias = "google")]
    Gemini,

    #[serde(rename = "openai")]
    #[serde(alias = "openai-api")]
    #[serde(alias = "openai-compatible")]
    OpenAI,
}

impl Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        serde_plain::to_string(self)
            .map_err(|_| std::fmt::Error)?
            .fmt(f)
    }
}

impl Provider {
    pub fn client(&self, api_key: &str, custom_url: Option<&str>) -> ProviderClient {
        match self {
            Provider::Anthropic => {
                let builder = anthropic::ClientBuilder::new(api_key);
                if let Some(url) = custom_url {
                    ProviderClient::Anthropic(builder.base_url(url).build())
                } else {
                    ProviderClient::Anthropic(builder.build())
                }
            }
            Provider::Gemini => match custom_url {
                None => ProviderClient::Gemini(gemini::Client::new(api_key)),
                Some(url) => ProviderClient::Gemini(gemini::Client::from_url(api_key, url)),
            },
            Provider::OpenAI => match custom_url {
                None => ProviderClient::OpenAI(openai::Client::new(api_key)),
                Some(url) => ProviderClient::OpenAI(openai::Client::from_url(api_key, url)),
            },
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::{business::BusinessContext, chat::client::Provider};

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ConciergeConfigTOML {
    pub config: ConciergeConfigInner,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ConciergeConfigInner {
    #[serde(default)]
    pub llm: LLMConfig,
    #[serde(default)]
    pub business: BusinessContext,
    #[serde(default)]
    pub widget: WidgetConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LLMConfig {
    pub provider: Provider,
    pub model: String,
    /// Name of the environment variable holding the API key, read on every call.
    pub api_key_env: String,
    pub custom_url: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u64>,
    pub top_p: Option<f64>,
    pub include_history: Option<bool>,
    pub timeout_secs: Option<u64>,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Gemini,
            model: "gemini-3-flash-preview".to_string(),
            api_key_env: "API_KEY".to_string(),
            custom_url: None,
            temperature: Some(0.7),
            max_tokens: None,
            top_p: None,
            include_history: None,
            timeout_secs: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WidgetConfig {
    pub title: String,
    pub launcher_label: String,
    pub greeting: String,
    /// Used when the provider answers without any text. `{phone}` is substituted.
    pub empty_reply_fallback: String,
    /// Used when the provider call fails. `{phone}` is substituted.
    pub failure_fallback: String,
    pub start_open: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            title: "Sim2U Concierge".to_string(),
            launcher_label: "Quote Assistant".to_string(),
            greeting: "Welcome to Sim2U! I'm your virtual caddy. How can I help you bring a professional golf experience to your event in the Western Cape today?".to_string(),
            empty_reply_fallback: "I'm having a slight hitch on the green. Could you please try again or call/WhatsApp us at {phone}?".to_string(),
            failure_fallback: "Sorry, I lost my connection to the clubhouse. Please try again later or call/WhatsApp us on {phone}!".to_string(),
            start_open: true,
        }
    }
}

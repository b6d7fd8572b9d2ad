use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rig::completion::CompletionError;
use tokio::sync::Notify;

use crate::business::BusinessContext;

use super::{GatewayError, client::ModelConnector, message::Message, prompt::ConciergePrompt};

pub const PHONE: &str = "021 555 0199";

pub fn business() -> BusinessContext {
    BusinessContext {
        phone: PHONE.to_string(),
        ..Default::default()
    }
}

pub enum Script {
    Reply(String),
    Empty,
    NetworkError,
    Panic,
    /// Waits for the notify before replying.
    Gated(Arc<Notify>, String),
}

/// A connector that answers from a script and records the prompts it was given.
pub struct ScriptedConnector {
    script: Script,
    pub prompts: Mutex<Vec<(String, usize)>>,
}

impl ScriptedConnector {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelConnector for ScriptedConnector {
    async fn complete(
        &self,
        prompt: ConciergePrompt,
        history: Vec<Message>,
    ) -> Result<Option<String>, GatewayError> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.into_inner(), history.len()));

        match &self.script {
            Script::Reply(text) => Ok(Some(text.clone())),
            Script::Empty => Ok(None),
            Script::NetworkError => Err(CompletionError::ProviderError(
                "connection reset by peer".to_string(),
            )
            .into()),
            Script::Panic => panic!("connector blew up"),
            Script::Gated(gate, text) => {
                gate.notified().await;
                Ok(Some(text.clone()))
            }
        }
    }
}

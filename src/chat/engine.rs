use std::sync::Arc;

use tokio::{
    sync::{RwLock, RwLockReadGuard, broadcast::Receiver},
    task::JoinHandle,
};

use crate::config::structure::ConciergeConfigInner;

use super::{
    gateway::AssistantGateway,
    session::{ConversationSession, SessionEvent},
};

/// One mounted chat widget: the session it owns plus the gateway answering it.
pub struct Concierge {
    session: Arc<RwLock<ConversationSession>>,
    gateway: Arc<AssistantGateway>,
}

impl Concierge {
    pub fn mount(gateway: AssistantGateway, greeting: impl Into<String>) -> Self {
        Self {
            session: Arc::new(RwLock::new(ConversationSession::new(greeting))),
            gateway: Arc::new(gateway),
        }
    }

    pub fn from_config(config: &ConciergeConfigInner) -> Self {
        Self::mount(
            AssistantGateway::from_config(config),
            config.widget.greeting.clone(),
        )
    }

    /// Submits user text. Returns the handle of the spawned turn when the text was accepted,
    /// `None` when it was blank or a reply is still pending.
    ///
    /// The spawned task only holds a weak reference, so unmounting never waits on it.
    pub async fn submit(&self, text: &str) -> Option<JoinHandle<()>> {
        let turn = self.session.write().await.submit_user_text(text)?;

        let gateway = self.gateway.clone();
        let session = Arc::downgrade(&self.session);

        Some(tokio::spawn(async move {
            gateway.deliver(turn, session).await;
        }))
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, ConversationSession> {
        self.session.read().await
    }

    pub async fn subscribe(&self) -> Receiver<SessionEvent> {
        self.session.read().await.subscribe()
    }

    pub fn gateway(&self) -> &AssistantGateway {
        &self.gateway
    }

    /// Discards the session. Replies still in flight are dropped when they land.
    pub fn unmount(self) {
        log::debug!("unmounting concierge");
    }
}

use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use tokio::sync::RwLock;

use crate::{
    business::BusinessContext,
    config::structure::{ConciergeConfigInner, WidgetConfig},
};

use super::{
    GatewayError,
    client::{CompletionAgent, ModelConnector},
    prompt::{ConciergePromptBuilder, TemplateVariables},
    session::{ConversationSession, PendingTurn},
};

/// Terminal state of one gateway invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    Delivered(String),
    Failed { fallback: String, reason: String },
}

impl TurnOutcome {
    pub fn apply(self, session: &mut ConversationSession) {
        match self {
            TurnOutcome::Delivered(text) => session.receive_reply(text),
            TurnOutcome::Failed { fallback, reason } => session.receive_failure(fallback, reason),
        }
    }
}

/// Turns an accepted user message into exactly one model request and maps whatever happens
/// back into a transcript entry. Nothing it does can fail from the caller's point of view.
pub struct AssistantGateway {
    connector: Arc<dyn ModelConnector>,
    business: Arc<BusinessContext>,
    empty_reply_fallback: String,
    failure_fallback: String,
    timeout: Option<Duration>,
}

impl AssistantGateway {
    pub fn new(
        connector: Arc<dyn ModelConnector>,
        business: BusinessContext,
        widget: &WidgetConfig,
        timeout: Option<Duration>,
    ) -> Self {
        let empty_reply_fallback = Self::fallback_text(&widget.empty_reply_fallback, &business);
        let failure_fallback = Self::fallback_text(&widget.failure_fallback, &business);

        Self {
            connector,
            business: Arc::new(business),
            empty_reply_fallback,
            failure_fallback,
            timeout,
        }
    }

    /// Fills in the template and makes sure the result names the contact phone.
    fn fallback_text(template: &str, business: &BusinessContext) -> String {
        let text = TemplateVariables::from_business(business).substitute_template(template);

        match text.contains(&business.phone) {
            true => text,
            false => format!("{} Call/WhatsApp us on {}.", text.trim_end(), business.phone),
        }
    }

    pub fn from_config(config: &ConciergeConfigInner) -> Self {
        let connector = Arc::new(CompletionAgent::new(config.llm.clone()));
        let timeout = config.llm.timeout_secs.map(Duration::from_secs);

        Self::new(connector, config.business.clone(), &config.widget, timeout)
    }

    pub fn business(&self) -> &BusinessContext {
        &self.business
    }

    pub async fn resolve(&self, turn: PendingTurn) -> TurnOutcome {
        match self.request(turn).await {
            Ok(Some(text)) => TurnOutcome::Delivered(text),
            Ok(None) => {
                log::warn!("provider returned an empty reply, using scripted fallback");
                TurnOutcome::Delivered(self.empty_reply_fallback.clone())
            }
            Err(why) => {
                log::error!("assistant request failed:\n{why:?}");
                self.failure(why.to_string())
            }
        }
    }

    fn failure(&self, reason: String) -> TurnOutcome {
        TurnOutcome::Failed {
            fallback: self.failure_fallback.clone(),
            reason,
        }
    }

    /// Resolves the turn and hands the outcome to the session, if it is still around.
    ///
    /// The request runs in its own task so a panicking connector still ends the turn.
    pub async fn deliver(
        self: Arc<Self>,
        turn: PendingTurn,
        session: Weak<RwLock<ConversationSession>>,
    ) {
        let request = tokio::spawn({
            let gateway = self.clone();
            async move { gateway.resolve(turn).await }
        });

        let outcome = match request.await {
            Ok(outcome) => outcome,
            Err(why) => {
                log::error!("assistant request task died:\n{why:?}");
                self.failure(format!("request task failed: {why}"))
            }
        };

        match session.upgrade() {
            Some(session) => outcome.apply(&mut *session.write().await),
            None => log::debug!("session was discarded before the reply arrived, dropping it"),
        }
    }

    async fn request(&self, turn: PendingTurn) -> Result<Option<String>, GatewayError> {
        let PendingTurn { text, history } = turn;
        let prompt = ConciergePromptBuilder::new(&self.business).build(&text);

        let call = self.connector.complete(prompt, history);
        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, call)
                .await
                .map_err(|_| GatewayError::Timeout(timeout))?,
            None => call.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{
        message::MessageRole,
        testing::{self, Script, ScriptedConnector},
    };

    fn gateway(connector: Arc<ScriptedConnector>, timeout: Option<Duration>) -> AssistantGateway {
        AssistantGateway::new(
            connector,
            testing::business(),
            &WidgetConfig::default(),
            timeout,
        )
    }

    fn turn(text: &str) -> PendingTurn {
        PendingTurn {
            text: text.to_string(),
            history: vec![],
        }
    }

    #[tokio::test]
    async fn delivers_provider_text_unchanged() {
        let reply = "  The Birdie Package is R3,150 for 4 hours.\n";
        let connector = ScriptedConnector::new(Script::Reply(reply.to_string()));
        let gateway = gateway(connector.clone(), None);

        let outcome = gateway.resolve(turn("What's the price for 4 hours?")).await;

        assert_eq!(outcome, TurnOutcome::Delivered(reply.to_string()));
        assert_eq!(connector.calls(), 1);
    }

    #[tokio::test]
    async fn prompt_carries_business_context_and_user_text() {
        let connector = ScriptedConnector::new(Script::Reply("ok".to_string()));
        let gateway = gateway(connector.clone(), None);

        gateway.resolve(turn("Do you come to Stellenbosch?")).await;

        let prompts = connector.prompts.lock().unwrap();
        let (prompt, _) = &prompts[0];
        assert!(prompt.contains(testing::PHONE));
        assert!(prompt.contains("R3,150"));
        assert!(prompt.ends_with("User: Do you come to Stellenbosch?"));
    }

    #[tokio::test]
    async fn empty_reply_degrades_to_scripted_message() {
        let gateway = gateway(ScriptedConnector::new(Script::Empty), None);

        let outcome = gateway.resolve(turn("hello?")).await;

        match outcome {
            TurnOutcome::Delivered(text) => {
                assert!(text.contains(testing::PHONE));
                assert!(text.starts_with("I'm having a slight hitch on the green."));
            }
            other => panic!("expected a delivered fallback, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn provider_error_becomes_failure_with_phone() {
        let gateway = gateway(ScriptedConnector::new(Script::NetworkError), None);

        let outcome = gateway.resolve(turn("Can I get a discount?")).await;

        match outcome {
            TurnOutcome::Failed { fallback, reason } => {
                assert!(fallback.contains(testing::PHONE));
                assert!(fallback.starts_with("Sorry, I lost my connection to the clubhouse."));
                assert!(reason.contains("connection reset by peer"));
            }
            other => panic!("expected a failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn hung_request_times_out_when_configured() {
        let gate = Arc::new(tokio::sync::Notify::new());
        let connector = ScriptedConnector::new(Script::Gated(gate, "too late".to_string()));
        let gateway = gateway(connector, Some(Duration::from_millis(20)));

        let outcome = gateway.resolve(turn("anyone there?")).await;

        assert!(matches!(outcome, TurnOutcome::Failed { ref reason, .. } if reason.contains("no response")));
    }

    #[tokio::test]
    async fn fallbacks_without_phone_placeholder_still_name_the_phone() {
        let widget = WidgetConfig {
            empty_reply_fallback: "Hmm, no words came out.".to_string(),
            failure_fallback: "Sorry, something broke.".to_string(),
            ..Default::default()
        };
        let gateway = AssistantGateway::new(
            ScriptedConnector::new(Script::NetworkError),
            testing::business(),
            &widget,
            None,
        );

        match gateway.resolve(turn("Can I get a discount?")).await {
            TurnOutcome::Failed { fallback, .. } => assert_eq!(
                fallback,
                format!("Sorry, something broke. Call/WhatsApp us on {}.", testing::PHONE)
            ),
            other => panic!("expected a failure, got {other:?}"),
        }

        let gateway = AssistantGateway::new(
            ScriptedConnector::new(Script::Empty),
            testing::business(),
            &widget,
            None,
        );
        match gateway.resolve(turn("hello?")).await {
            TurnOutcome::Delivered(text) => assert!(text.contains(testing::PHONE)),
            other => panic!("expected a delivered fallback, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn default_fallbacks_are_not_padded() {
        let gateway = gateway(ScriptedConnector::new(Script::NetworkError), None);

        match gateway.resolve(turn("hi")).await {
            TurnOutcome::Failed { fallback, .. } => {
                assert!(!fallback.contains("Call/WhatsApp us on"));
                assert_eq!(fallback.matches(testing::PHONE).count(), 1);
            }
            other => panic!("expected a failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn panicking_connector_ends_the_turn_as_a_failure() {
        let gateway = Arc::new(gateway(ScriptedConnector::new(Script::Panic), None));
        let session = Arc::new(RwLock::new(ConversationSession::new("hi")));
        let pending = session.write().await.submit_user_text("hello").unwrap();

        gateway.deliver(pending, Arc::downgrade(&session)).await;

        let session = session.read().await;
        assert_eq!(session.messages().len(), 3);
        assert!(session.messages()[2].text().contains(testing::PHONE));
        assert!(!session.awaiting_reply());
        assert!(session.last_error().unwrap().contains("request task failed"));
    }

    #[tokio::test]
    async fn deliver_applies_outcome_to_live_session() {
        let gateway = Arc::new(gateway(ScriptedConnector::new(Script::NetworkError), None));
        let session = Arc::new(RwLock::new(ConversationSession::new("hi")));
        let pending = session
            .write()
            .await
            .submit_user_text("Can I get a discount?")
            .unwrap();

        gateway.deliver(pending, Arc::downgrade(&session)).await;

        let session = session.read().await;
        assert_eq!(session.messages().len(), 3);
        assert_eq!(session.messages()[2].role(), MessageRole::Assistant);
        assert!(session.messages()[2].text().contains(testing::PHONE));
        assert!(!session.awaiting_reply());
        assert!(session.last_error().is_some());
    }

    #[tokio::test]
    async fn deliver_ignores_discarded_session() {
        let gateway = Arc::new(gateway(
            ScriptedConnector::new(Script::Reply("late".to_string())),
            None,
        ));
        let session = Arc::new(RwLock::new(ConversationSession::new("hi")));
        let pending = session.write().await.submit_user_text("hello").unwrap();
        let weak = Arc::downgrade(&session);
        drop(session);

        gateway.deliver(pending, weak).await;
    }
}

use tokio::sync::broadcast::{self, Receiver, Sender};

use super::message::Message;

const EVENT_CAPACITY: usize = 100;

/// Change notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    MessageAppended(Message),
    AwaitingReply(bool),
}

/// A user turn that was accepted and now needs exactly one gateway invocation.
#[derive(Debug, Clone)]
pub struct PendingTurn {
    /// The trimmed user text.
    pub text: String,
    /// Transcript before the user message was appended.
    pub history: Vec<Message>,
}

/// Single source of truth for the transcript and the in-flight flag.
///
/// At most one turn is outstanding: `awaiting_reply` is raised when a user message is
/// accepted and lowered only by [`receive_reply`](Self::receive_reply) or
/// [`receive_failure`](Self::receive_failure).
#[derive(Debug)]
pub struct ConversationSession {
    messages: Vec<Message>,
    awaiting_reply: bool,
    last_error: Option<String>,
    events: Sender<SessionEvent>,
}

impl ConversationSession {
    pub fn new(greeting: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        let mut session = Self {
            messages: Vec::new(),
            awaiting_reply: false,
            last_error: None,
            events,
        };
        session.initialize(greeting);

        session
    }

    /// Resets the transcript to a single assistant greeting.
    ///
    /// Refused while a reply is pending, so a late outcome can never land on a fresh turn.
    pub fn initialize(&mut self, greeting: impl Into<String>) -> bool {
        if self.awaiting_reply {
            log::warn!("refusing to reset the session while a reply is pending");
            return false;
        }

        self.messages.clear();
        self.awaiting_reply = false;
        self.last_error = None;

        self.append(Message::assistant(greeting));
        self.notify(SessionEvent::AwaitingReply(false));

        true
    }

    /// Accepts a user message unless it is blank or a reply is still pending.
    ///
    /// Rejections are silent: the transcript and flag are left untouched and `None` is returned.
    pub fn submit_user_text(&mut self, text: &str) -> Option<PendingTurn> {
        let text = text.trim();

        if text.is_empty() {
            log::debug!("ignoring blank submission");
            return None;
        }
        if self.awaiting_reply {
            log::debug!("ignoring submission while a reply is pending");
            return None;
        }

        let history = self.messages.clone();

        self.append(Message::user(text));
        self.set_awaiting(true);

        Some(PendingTurn {
            text: text.to_string(),
            history,
        })
    }

    pub fn receive_reply(&mut self, text: impl Into<String>) {
        if !self.awaiting_reply {
            log::warn!("received a reply with no turn in flight, dropping it");
            return;
        }

        self.last_error = None;
        self.append(Message::assistant(text));
        self.set_awaiting(false);
    }

    /// Appends the fallback apology for a failed turn and reopens the session for input.
    pub fn receive_failure(&mut self, fallback_text: impl Into<String>, reason: impl Into<String>) {
        if !self.awaiting_reply {
            log::warn!("received a failure with no turn in flight, dropping it");
            return;
        }

        self.last_error = Some(reason.into());
        self.append(Message::assistant(fallback_text));
        self.set_awaiting(false);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn subscribe(&self) -> Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn append(&mut self, message: Message) {
        self.messages.push(message.clone());
        self.notify(SessionEvent::MessageAppended(message));
    }

    fn set_awaiting(&mut self, awaiting: bool) {
        self.awaiting_reply = awaiting;
        self.notify(SessionEvent::AwaitingReply(awaiting));
    }

    fn notify(&self, event: SessionEvent) {
        // no subscribers is fine, nobody is rendering
        let _ = self.events.send(event);
    }
}

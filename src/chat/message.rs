use chrono::{DateTime, Utc};
use rig::message::Message as RigMessage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One transcript entry. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    role: MessageRole,
    text: String,
    sent_at: DateTime<Utc>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageRole::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, text)
    }

    fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }
}

impl From<Message> for RigMessage {
    fn from(message: Message) -> Self {
        match message.role {
            MessageRole::User => RigMessage::user(message.text),
            MessageRole::Assistant => RigMessage::assistant(message.text),
        }
    }
}

//! Conversation history.
//!
//! A `Conversation` holds the messages of one chat in the order they were
//! exchanged. Messages are only ever appended; the whole history can be
//! cleared but never edited piecemeal.

use crate::{Message, Role};

#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a question from the user. Empty text is kept as-is.
    pub fn append_user(&mut self, text: impl Into<String>) {
        self.messages.push(Message {
            role: Role::User,
            content: text.into(),
        });
    }

    /// Record a reply from the model.
    pub fn append_assistant(&mut self, text: impl Into<String>) {
        self.messages.push(Message {
            role: Role::Assistant,
            content: text.into(),
        });
    }

    /// All messages in insertion order.
    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    /// Drop every message.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

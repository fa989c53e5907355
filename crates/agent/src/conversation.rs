//! In-memory conversation history for one process run

use marketeer_provider::{Message, Role};

/// Prefix marking synthetic messages that carry action results
pub const ACTION_RESPONSE_PREFIX: &str = "Action_Response: ";

/// Ordered message history, seeded with the system prompt.
///
/// Never holds two assistant messages in a row.
#[derive(Debug, Clone)]
pub struct ConversationState {
    messages: Vec<Message>,
}

impl ConversationState {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        debug_assert!(
            self.last().map(|m| m.role) != Some(Role::Assistant),
            "consecutive assistant messages"
        );
        self.messages.push(Message::assistant(content));
    }

    /// Append a serialized action result as a user-side message
    pub fn push_action_response(&mut self, result: &serde_json::Value) {
        self.messages
            .push(Message::user(format!("{}{}", ACTION_RESPONSE_PREFIX, result)));
    }

    /// Whether two assistant messages ever appear back to back
    pub fn has_consecutive_assistant_messages(&self) -> bool {
        self.messages
            .windows(2)
            .any(|pair| pair[0].role == Role::Assistant && pair[1].role == Role::Assistant)
    }
}

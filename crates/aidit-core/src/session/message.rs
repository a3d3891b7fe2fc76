//! Conversation message types.
//!
//! A conversation is strictly two-party: the user and the assistant.
//! System instructions are never stored as messages; they come from the
//! session's mode at prompt-composition time.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the AI assistant (including inline error text).
    Assistant,
}

impl MessageRole {
    /// Returns the transcript tag used when composing prompts (`USER`, `ASSISTANT`).
    pub fn tag(&self) -> String {
        self.to_string().to_uppercase()
    }
}

/// A single message in a conversation history.
///
/// Content is stored verbatim. There is no length limit and empty content is allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message.
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

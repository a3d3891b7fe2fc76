//! Session domain model.

use super::message::ChatMessage;
use super::mode::ChatMode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to sessions created without one, and the fallback for blank renames.
pub const DEFAULT_TITLE: &str = "New Chat";

/// One independent, persisted conversation thread.
///
/// All four fields are required when restoring from storage; any extra
/// fields found on a persisted record are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUID v4), never reused
    pub id: String,
    /// Human-readable session title, never empty
    pub title: String,
    /// Operating mode for this session
    pub mode: ChatMode,
    /// Conversation history in insertion order
    pub messages: Vec<ChatMessage>,
}

impl Session {
    /// Creates a fresh session with a new identifier, `PRO` mode and no messages.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            mode: ChatMode::default(),
            messages: Vec::new(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

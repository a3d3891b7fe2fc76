//! Chat use case implementation.
//!
//! `ChatUseCase` runs one exchange: record the user's message, compose the
//! prompt for the active session, call the agent, and record the reply (or
//! the failure) back into the session the message was sent from.

use aidit_core::{AgentInvoker, AiditError, MessageRole, Result, SessionStore};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Prefix written in front of an agent failure in the conversation.
pub const ERROR_PREFIX: &str = "ERROR: ";

/// Result of a single exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOutcome {
    /// Session the exchange belongs to.
    pub session_id: String,
    /// Text appended as the assistant message.
    pub reply: String,
    /// True when `reply` is an inline error rather than an agent answer.
    pub failed: bool,
}

/// Use case for sending chat messages to the agent.
///
/// # Thread Safety
///
/// The store lock is held only while reading or mutating state, never across
/// the agent call, so the store stays usable while a request is in flight.
pub struct ChatUseCase {
    store: Arc<Mutex<SessionStore>>,
    agent: Arc<dyn AgentInvoker>,
    history_limit: usize,
}

impl ChatUseCase {
    /// Creates a new `ChatUseCase`.
    ///
    /// # Arguments
    ///
    /// * `store` - Shared session store
    /// * `agent` - Remote agent to send prompts to
    /// * `history_limit` - Number of trailing messages included in each prompt
    pub fn new(
        store: Arc<Mutex<SessionStore>>,
        agent: Arc<dyn AgentInvoker>,
        history_limit: usize,
    ) -> Self {
        Self {
            store,
            agent,
            history_limit,
        }
    }

    pub fn store(&self) -> Arc<Mutex<SessionStore>> {
        self.store.clone()
    }

    /// Sends `input` from the active session and records the outcome.
    ///
    /// Agent failures do not surface as errors; they are appended to the
    /// session as `"ERROR: <message>"` and reported with `failed = true`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `input` is blank. The store is not touched.
    pub async fn send(&self, input: &str) -> Result<SendOutcome> {
        let text = input.trim();
        if text.is_empty() {
            return Err(AiditError::InvalidInput("message is empty".to_string()));
        }

        let (session_id, prompt) = {
            let mut store = self.store.lock().await;
            store.append_message(MessageRole::User, text);
            let session_id = store.active_session().id.clone();
            let prompt = store.prompt_for_active(self.history_limit);
            (session_id, prompt)
        };

        tracing::debug!("[ChatUseCase] Invoking agent for session {}", session_id);
        let (reply, failed) = match self.agent.invoke(&prompt).await {
            Ok(reply) => (reply, false),
            Err(e) => {
                tracing::warn!("[ChatUseCase] Agent call failed for {}: {}", session_id, e);
                (format!("{ERROR_PREFIX}{e}"), true)
            }
        };

        self.store
            .lock()
            .await
            .append_message_to(&session_id, MessageRole::Assistant, reply.clone());

        Ok(SendOutcome {
            session_id,
            reply,
            failed,
        })
    }
}

use super::message::{ChatMessage, MessageRole};
use super::mode::ChatMode;
use super::model::{DEFAULT_TITLE, Session};
use super::repository::StateRepository;
use super::snapshot::StoreSnapshot;
use crate::prompt::compose_for_session;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::watch;

/// Owns every chat session, the active-session pointer and all mutations.
///
/// `SessionStore` is responsible for:
/// - Creating, renaming, deleting and switching sessions
/// - Appending messages and changing modes on the active session
/// - Persisting a full snapshot after every state change (best-effort)
/// - Restoring from storage at startup, dropping corrupt entries
/// - Self-healing: the store is never observably empty and the active
///   pointer never dangles
///
/// The store is constructed explicitly by the application root and shared
/// by reference (typically `Arc<tokio::sync::Mutex<SessionStore>>`).
/// Observers call [`SessionStore::subscribe`] to be woken after each change.
pub struct SessionStore {
    /// Session id -> session. Ordered so "first remaining" is deterministic.
    sessions: BTreeMap<String, Session>,
    /// Currently active session
    active_session_id: Option<String>,
    /// Durable slot for the serialized snapshot
    repository: Arc<dyn StateRepository>,
    /// Revision counter, bumped after every state-changing mutation
    revision: watch::Sender<u64>,
}

impl SessionStore {
    /// Opens the store from the given repository.
    ///
    /// Unreadable or malformed persisted data yields an empty store, which
    /// then self-heals into exactly one fresh default session.
    pub fn open(repository: Arc<dyn StateRepository>) -> Self {
        let snapshot = match repository.load() {
            Ok(Some(raw)) => StoreSnapshot::from_json(&raw),
            Ok(None) => StoreSnapshot::default(),
            Err(e) => {
                tracing::warn!("[SessionStore] Failed to read persisted state: {}", e);
                StoreSnapshot::default()
            }
        };

        let (revision, _) = watch::channel(0);
        let mut store = Self {
            sessions: snapshot.chats,
            active_session_id: snapshot.active_chat_id,
            repository,
            revision,
        };

        tracing::info!(
            "[SessionStore] Restored {} session(s), active: {:?}",
            store.sessions.len(),
            store.active_session_id
        );

        if store.resolved_active_id().is_none() {
            store.heal();
        }
        store.persist();
        store
    }

    // ============================================================================
    // Read access
    // ============================================================================

    /// Returns the active session, creating a default one first if needed.
    pub fn active_session(&mut self) -> &Session {
        let id = self.ensure_active();
        self.session_entry(id)
    }

    /// Returns the active session id, if it resolves to an existing session.
    pub fn active_session_id(&self) -> Option<&str> {
        self.resolved_active_id()
    }

    /// Looks up a session by id.
    pub fn session(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    /// All sessions, ordered by id.
    pub fn sessions(&self) -> impl Iterator<Item = &Session> {
        self.sessions.values()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// A copy of the full state, as it would be persisted.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            chats: self.sessions.clone(),
            active_chat_id: self.active_session_id.clone(),
        }
    }

    /// Subscribes to change notifications.
    ///
    /// The received value is a revision counter; every state-changing
    /// mutation increments it by one.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Composes the outbound prompt for the active session.
    ///
    /// Uses the active session's mode template and its last `limit` messages.
    pub fn prompt_for_active(&mut self, limit: usize) -> String {
        compose_for_session(self.active_session(), limit)
    }

    // ============================================================================
    // Mutations
    // ============================================================================

    /// Creates a session in `PRO` mode with no messages and makes it active.
    ///
    /// A missing or blank title becomes `"New Chat"`.
    pub fn create_session(&mut self, title: Option<&str>) -> String {
        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE);
        let session = Session::new(title);
        let id = session.id.clone();

        tracing::debug!("[SessionStore] Creating session {} ('{}')", id, title);
        self.sessions.insert(id.clone(), session);
        self.active_session_id = Some(id.clone());
        self.commit();
        id
    }

    /// Renames a session. Unknown ids are ignored.
    ///
    /// The title is trimmed; a blank result becomes `"New Chat"`.
    pub fn rename_session(&mut self, id: &str, new_title: &str) {
        let Some(session) = self.sessions.get_mut(id) else {
            tracing::debug!("[SessionStore] rename_session: unknown id {}", id);
            return;
        };

        let trimmed = new_title.trim();
        session.title = if trimmed.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            trimmed.to_string()
        };
        tracing::debug!("[SessionStore] Renamed session {} to '{}'", id, session.title);
        self.commit();
    }

    /// Deletes a session. Unknown ids are ignored.
    ///
    /// Deleting the active session promotes the first remaining session
    /// (by id). Deleting the last session synthesizes a fresh default one.
    pub fn delete_session(&mut self, id: &str) {
        if self.sessions.remove(id).is_none() {
            tracing::debug!("[SessionStore] delete_session: unknown id {}", id);
            return;
        }
        tracing::debug!("[SessionStore] Deleted session {}", id);

        if self.sessions.is_empty() {
            self.heal();
        } else if self.resolved_active_id().is_none() {
            self.active_session_id = self.sessions.keys().next().cloned();
        }
        self.commit();
    }

    /// Sets the active session's mode.
    ///
    /// No-op when there is no active session or the mode is unchanged.
    pub fn set_mode(&mut self, mode: ChatMode) {
        let Some(session) = self.active_session_mut() else {
            return;
        };
        if session.mode == mode {
            return;
        }
        session.mode = mode;
        tracing::debug!("[SessionStore] Mode of {} set to {}", session.id, mode);
        self.commit();
    }

    /// Advances the active session's mode through `PRO -> LAB -> LITE -> PRO`.
    pub fn cycle_mode(&mut self) {
        let Some(session) = self.active_session_mut() else {
            return;
        };
        session.mode = session.mode.next();
        tracing::debug!("[SessionStore] Mode of {} cycled to {}", session.id, session.mode);
        self.commit();
    }

    /// Appends a message to the active session, self-healing first if needed.
    ///
    /// Content is not validated; empty strings are accepted.
    pub fn append_message(&mut self, role: MessageRole, content: impl Into<String>) {
        let id = self.ensure_active();
        self.push_message(id, ChatMessage::new(role, content));
    }

    /// Appends a message to a specific session.
    ///
    /// Falls back to the active session when `id` no longer exists, so a
    /// reply to a deleted session still lands somewhere visible.
    pub fn append_message_to(&mut self, id: &str, role: MessageRole, content: impl Into<String>) {
        if self.sessions.contains_key(id) {
            self.push_message(id.to_string(), ChatMessage::new(role, content));
        } else {
            tracing::debug!(
                "[SessionStore] append_message_to: {} is gone, using active session",
                id
            );
            self.append_message(role, content);
        }
    }

    /// Makes `id` the active session. Unknown ids are ignored.
    pub fn set_active_session(&mut self, id: &str) {
        if !self.sessions.contains_key(id) {
            tracing::debug!("[SessionStore] set_active_session: unknown id {}", id);
            return;
        }
        if self.active_session_id.as_deref() == Some(id) {
            return;
        }
        self.active_session_id = Some(id.to_string());
        self.commit();
    }

    // ============================================================================
    // Internals
    // ============================================================================

    fn resolved_active_id(&self) -> Option<&str> {
        self.active_session_id
            .as_deref()
            .filter(|id| self.sessions.contains_key(*id))
    }

    fn active_session_mut(&mut self) -> Option<&mut Session> {
        let id = self.active_session_id.as_deref()?;
        self.sessions.get_mut(id)
    }

    /// Returns the active id, synthesizing and persisting a session if none resolves.
    fn ensure_active(&mut self) -> String {
        if let Some(id) = self.resolved_active_id() {
            return id.to_string();
        }
        let id = self.heal();
        self.commit();
        id
    }

    /// Inserts a fresh default session and points the active id at it.
    fn heal(&mut self) -> String {
        let session = Session::default();
        let id = session.id.clone();
        tracing::info!("[SessionStore] No active session, created {}", id);
        self.sessions.insert(id.clone(), session);
        self.active_session_id = Some(id.clone());
        id
    }

    fn session_entry(&mut self, id: String) -> &mut Session {
        self.sessions
            .entry(id)
            .or_insert_with_key(|id| Session {
                id: id.clone(),
                ..Session::default()
            })
    }

    fn push_message(&mut self, id: String, message: ChatMessage) {
        let session = self.session_entry(id);
        session.messages.push(message);
        tracing::debug!(
            "[SessionStore] Appended message to {} ({} total)",
            session.id,
            session.messages.len()
        );
        self.commit();
    }

    fn commit(&mut self) {
        self.persist();
        self.revision.send_modify(|revision| *revision += 1);
    }

    fn persist(&self) {
        let payload = match self.snapshot().to_json() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("[SessionStore] Failed to serialize state: {}", e);
                return;
            }
        };
        if let Err(e) = self.repository.save(&payload) {
            tracing::warn!("[SessionStore] Failed to persist state: {}", e);
        }
    }
}

//! Persisted snapshot of the session store.
//!
//! Layout (JSON, one fixed storage key):
//!
//! ```text
//! {
//!   "chats": { "<id>": { "id", "title", "mode", "messages": [...] }, ... },
//!   "activeChatId": "<id>" | null
//! }
//! ```
//!
//! Loading is defensive. Malformed JSON yields an empty snapshot, and each
//! session entry is validated on its own, so one corrupt record is dropped
//! without losing the rest.

use super::message::{ChatMessage, MessageRole};
use super::mode::ChatMode;
use super::model::Session;
use crate::error::Result;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

const REQUIRED_FIELDS: [&str; 4] = ["id", "title", "mode", "messages"];

/// The full mapping of sessions plus the active identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub chats: BTreeMap<String, Session>,
    pub active_chat_id: Option<String>,
}

impl StoreSnapshot {
    /// Serializes the snapshot into the persisted JSON layout.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restores a snapshot from a raw persisted payload.
    ///
    /// Never fails. Entries that are not structurally valid sessions are
    /// dropped. An active id that does not resolve falls back to the first
    /// restored id, or to `None` when nothing was restored.
    pub fn from_json(raw: &str) -> Self {
        let parsed: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("[StoreSnapshot] Ignoring unreadable persisted state: {}", e);
                return Self::default();
            }
        };

        let mut chats = BTreeMap::new();
        if let Some(entries) = parsed.get("chats").and_then(Value::as_object) {
            for (key, entry) in entries {
                match restore_session(key, entry) {
                    Some(session) => {
                        chats.insert(key.clone(), session);
                    }
                    None => {
                        tracing::warn!("[StoreSnapshot] Dropping malformed session entry '{}'", key);
                    }
                }
            }
        }

        let active_chat_id = parsed
            .get("activeChatId")
            .and_then(Value::as_str)
            .filter(|id| chats.contains_key(*id))
            .map(str::to_string)
            .or_else(|| chats.keys().next().cloned());

        Self {
            chats,
            active_chat_id,
        }
    }
}

/// Shape check: an object carrying all four session fields with a `messages` array.
pub fn is_session_shaped(entry: &Value) -> bool {
    let Some(object) = entry.as_object() else {
        return false;
    };
    REQUIRED_FIELDS.iter().all(|field| object.contains_key(*field))
        && object.get("messages").is_some_and(Value::is_array)
}

fn restore_session(key: &str, entry: &Value) -> Option<Session> {
    if !is_session_shaped(entry) {
        return None;
    }
    let title = entry.get("title")?.as_str()?.to_string();

    // An unrecognized mode falls back to PRO.
    let mode = match entry.get("mode").and_then(Value::as_str).map(ChatMode::from_str) {
        Some(Ok(mode)) => mode,
        _ => {
            tracing::debug!("[StoreSnapshot] Session '{}' has an unknown mode, using PRO", key);
            ChatMode::default()
        }
    };

    let messages = entry
        .get("messages")
        .and_then(Value::as_array)?
        .iter()
        .filter_map(|message| {
            let restored = restore_message(message);
            if restored.is_none() {
                tracing::warn!("[StoreSnapshot] Dropping malformed message in session '{}'", key);
            }
            restored
        })
        .collect();

    // The map key addresses the session; it wins over a stale inner id.
    if entry.get("id").and_then(Value::as_str) != Some(key) {
        tracing::debug!("[StoreSnapshot] Session stored under key '{}' has another id, using key", key);
    }

    Some(Session {
        id: key.to_string(),
        title,
        mode,
        messages,
    })
}

fn restore_message(entry: &Value) -> Option<ChatMessage> {
    let role = MessageRole::from_str(entry.get("role")?.as_str()?).ok()?;
    let content = entry.get("content")?.as_str()?;
    Some(ChatMessage::new(role, content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{ChatMessage, ChatMode};
    use serde_json::json;

    fn sample() -> StoreSnapshot {
        let mut a = Session::new("First");
        a.messages.push(ChatMessage::user("hello"));
        a.messages.push(ChatMessage::assistant("hi there"));
        let mut b = Session::new("Second");
        b.mode = ChatMode::Lite;
        let active = b.id.clone();
        let mut chats = BTreeMap::new();
        chats.insert(a.id.clone(), a);
        chats.insert(b.id.clone(), b);
        StoreSnapshot {
            chats,
            active_chat_id: Some(active),
        }
    }

    #[test]
    fn test_round_trip_is_identical() {
        let snapshot = sample();
        let restored = StoreSnapshot::from_json(&snapshot.to_json().unwrap());
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_layout_uses_persisted_key_names() {
        let value: Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert!(value.get("chats").unwrap().is_object());
        assert!(value.get("activeChatId").unwrap().is_string());
    }

    #[test]
    fn test_corrupted_messages_entry_is_dropped() {
        let snapshot = sample();
        let mut value: Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        let active = snapshot.active_chat_id.clone().unwrap();
        value["chats"][&active]["messages"] = json!("not a list");

        let restored = StoreSnapshot::from_json(&value.to_string());

        assert_eq!(restored.chats.len(), 1);
        assert!(!restored.chats.contains_key(&active));
        // The active pointer falls back to the surviving session.
        let survivor = restored.chats.keys().next().cloned();
        assert_eq!(restored.active_chat_id, survivor);
    }

    #[test]
    fn test_missing_required_field_is_dropped() {
        let raw = json!({
            "chats": {
                "a": { "id": "a", "title": "ok", "mode": "PRO", "messages": [] },
                "b": { "id": "b", "mode": "PRO", "messages": [] }
            },
            "activeChatId": "b"
        });
        let restored = StoreSnapshot::from_json(&raw.to_string());
        assert_eq!(restored.chats.keys().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(restored.active_chat_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_malformed_json_yields_empty_snapshot() {
        let restored = StoreSnapshot::from_json("{ this is not json");
        assert_eq!(restored, StoreSnapshot::default());
    }

    #[test]
    fn test_wrong_top_level_shape_yields_empty_snapshot() {
        assert_eq!(StoreSnapshot::from_json("[1,2,3]"), StoreSnapshot::default());
        assert_eq!(
            StoreSnapshot::from_json(r#"{"chats": 42, "activeChatId": "x"}"#),
            StoreSnapshot::default()
        );
    }

    #[test]
    fn test_null_active_id_falls_back_to_first_session() {
        let raw = json!({
            "chats": {
                "b": { "id": "b", "title": "B", "mode": "LAB", "messages": [] },
                "a": { "id": "a", "title": "A", "mode": "PRO", "messages": [] }
            },
            "activeChatId": null
        });
        let restored = StoreSnapshot::from_json(&raw.to_string());
        assert_eq!(restored.active_chat_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_key_wins_over_inner_id() {
        let raw = json!({
            "chats": { "k": { "id": "other", "title": "T", "mode": "PRO", "messages": [] } },
            "activeChatId": "k"
        });
        let restored = StoreSnapshot::from_json(&raw.to_string());
        assert_eq!(restored.chats["k"].id, "k");
    }

    #[test]
    fn test_unknown_mode_falls_back_to_pro() {
        let raw = json!({
            "chats": {
                "a": { "id": "a", "title": "lower", "mode": "lab", "messages": [] },
                "b": { "id": "b", "title": "odd", "mode": "TURBO",
                       "messages": [{"role": "user", "content": "kept"}] }
            },
            "activeChatId": "b"
        });
        let restored = StoreSnapshot::from_json(&raw.to_string());

        assert_eq!(restored.chats.len(), 2);
        assert_eq!(restored.chats["a"].mode, ChatMode::Lab);
        assert_eq!(restored.chats["b"].mode, ChatMode::Pro);
        assert_eq!(restored.chats["b"].messages, vec![ChatMessage::user("kept")]);
        assert_eq!(restored.active_chat_id.as_deref(), Some("b"));
    }

    #[test]
    fn test_bad_message_is_dropped_but_session_kept() {
        let raw = json!({
            "chats": {
                "a": { "id": "a", "title": "T", "mode": "PRO", "messages": [
                    {"role": "user", "content": "first"},
                    {"role": "system", "content": "not a chat role"},
                    {"role": "ASSISTANT", "content": "second"},
                    {"role": "user"}
                ] }
            },
            "activeChatId": "a"
        });
        let restored = StoreSnapshot::from_json(&raw.to_string());

        assert_eq!(
            restored.chats["a"].messages,
            vec![ChatMessage::user("first"), ChatMessage::assistant("second")]
        );
    }

    #[test]
    fn test_shape_check() {
        assert!(is_session_shaped(
            &json!({"id": "a", "title": "t", "mode": "PRO", "messages": []})
        ));
        assert!(!is_session_shaped(
            &json!({"id": "a", "title": "t", "mode": "PRO", "messages": {}})
        ));
        assert!(!is_session_shaped(&json!("a string")));
        assert!(!is_session_shaped(&Value::Null));
    }
}

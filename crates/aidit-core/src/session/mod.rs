//! Session domain module.
//!
//! This module contains the chat session model, the per-session mode, the
//! persisted snapshot format and the [`SessionStore`] that owns them.
//!
//! # Module Structure
//!
//! - `model`: Core session domain model (`Session`)
//! - `message`: Conversation message types (`MessageRole`, `ChatMessage`)
//! - `mode`: Operating mode (`ChatMode`)
//! - `snapshot`: Persisted layout and defensive restore (`StoreSnapshot`)
//! - `repository`: Durable slot trait (`StateRepository`)
//! - `store`: Session lifecycle and self-healing (`SessionStore`)

mod message;
mod mode;
mod model;
mod repository;
mod snapshot;
mod store;

// Re-export public API
pub use message::{ChatMessage, MessageRole};
pub use mode::ChatMode;
pub use model::{DEFAULT_TITLE, Session};
pub use repository::{STORAGE_KEY, StateRepository};
pub use snapshot::{StoreSnapshot, is_session_shaped};
pub use store::SessionStore;

#[cfg(test)]
mod store_test;

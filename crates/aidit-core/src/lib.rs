//! Core domain for the Aidit chat client.
//!
//! - [`session`]: sessions, modes, and the self-healing [`SessionStore`]
//! - [`prompt`]: base templates and transcript composition
//! - [`agent`]: the [`AgentInvoker`] seam for the remote model
//! - [`config`]: agent endpoint configuration

pub mod agent;
pub mod config;
pub mod error;
pub mod prompt;
pub mod session;

// Re-export common types
pub use agent::AgentInvoker;
pub use config::{AgentConfig, ConfigRoot};
pub use error::{AiditError, Result};
pub use session::{ChatMessage, ChatMode, MessageRole, Session, SessionStore, StateRepository};

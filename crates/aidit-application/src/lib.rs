//! Application layer for aidit.
//!
//! Coordinates the session store with the remote agent.

pub mod chat_usecase;

pub use chat_usecase::{ChatUseCase, SendOutcome};

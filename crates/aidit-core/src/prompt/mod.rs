//! Prompt composition.
//!
//! A prompt is the mode's base template followed by a short transcript of
//! the most recent turns, separated by blank lines.

mod composer;
pub mod templates;

pub use composer::{DEFAULT_HISTORY_LIMIT, build_prompt, compose_for_session};

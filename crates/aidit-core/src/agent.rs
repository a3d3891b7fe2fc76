//! Agent invoker trait.
//!
//! The remote language-model call sits behind this seam so the send flow
//! can be exercised without a network.

use crate::error::Result;
use async_trait::async_trait;

/// Sends a composed prompt to the remote agent and returns its reply text.
///
/// Implementations perform a single request with no retries. Every failure
/// (transport, timeout, non-2xx, malformed body) comes back as an `Err`
/// whose display text is suitable for showing inline after `ERROR: `.
#[async_trait]
pub trait AgentInvoker: Send + Sync {
    async fn invoke(&self, prompt: &str) -> Result<String>;
}

//! State repository trait.
//!
//! Defines the durable key-value slot the session store persists into.

use crate::error::Result;

/// Fixed storage key under which the whole store snapshot lives.
pub const STORAGE_KEY: &str = "aidit-chat-state";

/// An abstract slot holding the serialized store snapshot.
///
/// The store owns (de)serialization; implementations only move opaque
/// payloads in and out of durable storage (a file, memory, ...).
///
/// Writes are synchronous and best-effort from the store's point of view:
/// a failed `save` is logged and the in-memory state stays authoritative.
pub trait StateRepository: Send + Sync {
    /// Reads the raw payload for [`STORAGE_KEY`].
    ///
    /// # Returns
    ///
    /// - `Ok(Some(payload))`: A payload was stored
    /// - `Ok(None)`: Nothing has been stored yet
    /// - `Err(_)`: The slot could not be read
    fn load(&self) -> Result<Option<String>>;

    /// Replaces the stored payload for [`STORAGE_KEY`].
    fn save(&self, payload: &str) -> Result<()>;
}

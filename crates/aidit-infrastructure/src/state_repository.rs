//! State repository implementations.
//!
//! `JsonFileStateRepository` is the durable slot used by the application;
//! `InMemoryStateRepository` backs tests and ephemeral runs.

use crate::storage::AtomicFile;
use aidit_core::session::StateRepository;
use aidit_core::{AiditError, Result};
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Stores the session store snapshot in a single JSON file.
pub struct JsonFileStateRepository {
    file: AtomicFile,
}

impl JsonFileStateRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::new(path),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }
}

impl StateRepository for JsonFileStateRepository {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.file.load()?)
    }

    fn save(&self, payload: &str) -> Result<()> {
        self.file.save(payload)?;
        tracing::trace!(
            "[JsonFileStateRepository] Wrote {} bytes to {}",
            payload.len(),
            self.file.path().display()
        );
        Ok(())
    }
}

/// Keeps the snapshot in memory.
///
/// Writes can be made to fail on demand to simulate a full or read-only
/// storage backend.
#[derive(Default)]
pub struct InMemoryStateRepository {
    payload: Mutex<Option<String>>,
    fail_writes: AtomicBool,
}

impl InMemoryStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with an existing raw payload (possibly corrupt).
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Mutex::new(Some(payload.into())),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// The last successfully written payload.
    pub fn payload(&self) -> Option<String> {
        self.payload
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Makes subsequent writes fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl StateRepository for InMemoryStateRepository {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.payload())
    }

    fn save(&self, payload: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AiditError::io("storage quota exceeded"));
        }
        *self
            .payload
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(payload.to_string());
        Ok(())
    }
}

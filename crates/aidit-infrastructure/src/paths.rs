//! Unified path management for aidit configuration and state files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/aidit/             # Base directory (or $AIDIT_HOME)
//! ├── config.toml              # Agent endpoint configuration
//! ├── aidit-chat-state.json    # Persisted session store snapshot
//! └── logs/                    # Application logs
//!     └── aidit.log.YYYY-MM-DD
//! ```

use aidit_core::session::STORAGE_KEY;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the base directory.
pub const HOME_ENV: &str = "AIDIT_HOME";

const APP_DIR: &str = "aidit";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Neither `$AIDIT_HOME` nor a platform config directory is available.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot determine config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolved locations of every file aidit reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiditPaths {
    base: PathBuf,
}

impl AiditPaths {
    /// Resolves the base directory: `$AIDIT_HOME` if set, else `<config_dir>/aidit`.
    pub fn resolve() -> Result<Self, PathError> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_base(PathBuf::from(home)));
        }
        dirs::config_dir()
            .map(|dir| Self::with_base(dir.join(APP_DIR)))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Uses an explicit base directory (tests, portable installs).
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn config_dir(&self) -> &Path {
        &self.base
    }

    /// Path to `config.toml`.
    pub fn config_file(&self) -> PathBuf {
        self.base.join("config.toml")
    }

    /// Path to the persisted session store snapshot, named after [`STORAGE_KEY`].
    pub fn state_file(&self) -> PathBuf {
        self.base.join(format!("{STORAGE_KEY}.json"))
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.base.join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_base() {
        let paths = AiditPaths::with_base("/tmp/aidit-test");
        assert!(paths.config_file().ends_with("config.toml"));
        assert!(paths.state_file().ends_with("aidit-chat-state.json"));
        assert!(paths.logs_dir().ends_with("logs"));
        assert!(paths.state_file().starts_with(paths.config_dir()));
        assert!(paths.logs_dir().starts_with(paths.config_dir()));
    }

    #[test]
    fn test_resolve_ends_with_app_dir_or_override() {
        // Environments without a home directory cannot resolve at all.
        let Ok(paths) = AiditPaths::resolve() else {
            return;
        };
        match std::env::var_os(HOME_ENV) {
            Some(home) if !home.is_empty() => assert_eq!(paths.config_dir(), Path::new(&home)),
            _ => assert!(paths.config_dir().ends_with(APP_DIR)),
        }
    }
}

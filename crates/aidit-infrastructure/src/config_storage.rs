//! Agent configuration storage.
//!
//! Loads `config.toml` and layers environment overrides on top:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `AIDIT_AGENT_API_URL` | `api_url` |
//! | `AIDIT_AGENT_ENDPOINT`, `DO_AGENT_ENDPOINT` | `endpoint` |
//! | `AIDIT_AGENT_KEY`, `DO_AGENT_KEY` | `api_key` |
//! | `AIDIT_AGENT_TIMEOUT_SECS` | `timeout_secs` |

use crate::storage::AtomicFile;
use aidit_core::{AgentConfig, AiditError, ConfigRoot, Result};
use std::path::{Path, PathBuf};

/// Storage for `config.toml`.
///
/// Responsibilities:
/// - Load and parse `config.toml` (a missing file means defaults)
/// - Apply environment overrides
/// - Create a template file on first run
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file without applying environment overrides.
    ///
    /// # Errors
    ///
    /// Returns a serialization error when the file exists but is not valid TOML.
    pub fn load_file(&self) -> Result<ConfigRoot> {
        match AtomicFile::new(self.path.clone()).load()? {
            Some(content) => Ok(toml::from_str(&content)?),
            None => Ok(ConfigRoot::default()),
        }
    }

    /// Loads the agent configuration with process environment overrides applied.
    pub fn load(&self) -> Result<AgentConfig> {
        let mut config = self.load_file()?.agent;
        apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Writes a default configuration file if none exists yet.
    ///
    /// On Unix the file is restricted to the owner since it may hold an API key.
    pub fn ensure_exists(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }

        let template = toml::to_string_pretty(&ConfigRoot::default())?;
        AtomicFile::new(self.path.clone()).save(&template)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::info!("[ConfigStorage] Created {}", self.path.display());
        Ok(())
    }
}

/// Applies environment overrides using `lookup` to read variables.
///
/// Blank values are ignored.
pub fn apply_env_overrides<F>(config: &mut AgentConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let first = |keys: &[&str]| {
        keys.iter()
            .filter_map(|key| lookup(key))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
    };

    if let Some(url) = first(&["AIDIT_AGENT_API_URL"]) {
        config.api_url = Some(url);
    }
    if let Some(endpoint) = first(&["AIDIT_AGENT_ENDPOINT", "DO_AGENT_ENDPOINT"]) {
        config.endpoint = Some(endpoint);
    }
    if let Some(key) = first(&["AIDIT_AGENT_KEY", "DO_AGENT_KEY"]) {
        config.api_key = Some(key);
    }
    if let Some(timeout) = first(&["AIDIT_AGENT_TIMEOUT_SECS"]) {
        config.timeout_secs = timeout.parse().map_err(|_| {
            AiditError::config(format!(
                "AIDIT_AGENT_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                timeout
            ))
        })?;
    }
    Ok(())
}

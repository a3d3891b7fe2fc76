//! Agent endpoint configuration.

use crate::error::{AiditError, Result};
use crate::prompt::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};

/// Default agent request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Path appended to `endpoint` when no explicit `api_url` is configured.
pub const CHAT_COMPLETIONS_PATH: &str = "/api/v1/chat/completions";

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRoot {
    #[serde(default)]
    pub agent: AgentConfig,
}

/// Where and how to reach the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Base URL of the agent deployment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Full request URL; takes precedence over `endpoint` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Sent as `Authorization: Bearer <key>` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Number of trailing messages included in each prompt.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_url: None,
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl AgentConfig {
    /// Resolves the URL the prompt is POSTed to.
    ///
    /// # Errors
    ///
    /// Returns a config error when neither `api_url` nor `endpoint` is set.
    pub fn request_url(&self) -> Result<String> {
        if let Some(url) = non_blank(self.api_url.as_deref()) {
            return Ok(url.to_string());
        }
        if let Some(endpoint) = non_blank(self.endpoint.as_deref()) {
            return Ok(format!(
                "{}{}",
                endpoint.trim_end_matches('/'),
                CHAT_COMPLETIONS_PATH
            ));
        }
        Err(AiditError::config(
            "no agent endpoint configured (set [agent].endpoint or AIDIT_AGENT_ENDPOINT)",
        ))
    }

    /// The API key, ignoring blank values.
    pub fn bearer_key(&self) -> Option<&str> {
        non_blank(self.api_key.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

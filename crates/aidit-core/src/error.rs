//! Error types for the Aidit application.

use thiserror::Error;

/// A shared error type for the entire Aidit application.
///
/// Store operations never surface these to callers; they show up at the
/// persistence, configuration and agent boundaries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AiditError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The agent endpoint answered with something other than a reply.
    ///
    /// The display text is exactly what ends up after `ERROR: ` in the
    /// conversation, so it carries no extra prefix.
    #[error("{}", agent_message(.status, .message))]
    Agent {
        status: Option<u16>,
        message: String,
    },

    /// The agent call did not complete in time
    #[error("Agent request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Rejected user input (e.g. a blank prompt)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

fn agent_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Agent error {}: {}", code, message),
        None => message.to_string(),
    }
}

impl AiditError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Agent error for a non-success HTTP status
    pub fn agent_status(status: u16, body: impl Into<String>) -> Self {
        Self::Agent {
            status: Some(status),
            message: body.into(),
        }
    }

    /// Creates an Agent error without an HTTP status
    pub fn agent(message: impl Into<String>) -> Self {
        Self::Agent {
            status: None,
            message: message.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this error came from the agent call (including timeouts)
    pub fn is_agent(&self) -> bool {
        matches!(self, Self::Agent { .. } | Self::Timeout { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for AiditError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for AiditError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for AiditError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for AiditError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, AiditError>`.
pub type Result<T> = std::result::Result<T, AiditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_status_display_matches_inline_error_text() {
        let err = AiditError::agent_status(502, "bad gateway");
        assert_eq!(err.to_string(), "Agent error 502: bad gateway");
        assert!(err.is_agent());
    }

    #[test]
    fn test_agent_without_status_is_verbatim() {
        let err = AiditError::agent("Invalid response: missing choices[0].message.content");
        assert_eq!(
            err.to_string(),
            "Invalid response: missing choices[0].message.content"
        );
    }

    #[test]
    fn test_timeout_display() {
        let err = AiditError::Timeout { seconds: 120 };
        assert_eq!(err.to_string(), "Agent request timed out after 120s");
        assert!(err.is_agent());
    }

    #[test]
    fn test_from_json_error() {
        let err: AiditError = serde_json::from_str::<serde_json::Value>("{ nope")
            .unwrap_err()
            .into();
        assert!(err.is_serialization());
    }
}

//! Chat mode: selects the base instruction template and the UI banner.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::prompt::templates::{LAB_TEMPLATE, LITE_TEMPLATE, PRO_TEMPLATE};

/// Operating mode of a single session.
///
/// Mode is per-session: switching sessions restores that session's own mode.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum ChatMode {
    /// Structured five-section vulnerability report with masked command arguments.
    #[default]
    Pro,
    /// Single, non-chaining, non-persistent proof-of-concept validation.
    Lab,
    /// Relaxed format for casual and general questions.
    Lite,
}

impl ChatMode {
    /// Next mode in the fixed cycle `PRO -> LAB -> LITE -> PRO`.
    pub fn next(self) -> Self {
        match self {
            ChatMode::Pro => ChatMode::Lab,
            ChatMode::Lab => ChatMode::Lite,
            ChatMode::Lite => ChatMode::Pro,
        }
    }

    /// The base instruction template prefixed to every outbound prompt.
    pub fn base_template(self) -> &'static str {
        match self {
            ChatMode::Pro => PRO_TEMPLATE,
            ChatMode::Lab => LAB_TEMPLATE,
            ChatMode::Lite => LITE_TEMPLATE,
        }
    }

    /// Persistent banner shown while the session is in this mode, if any.
    pub fn banner(self) -> Option<&'static str> {
        match self {
            ChatMode::Pro => None,
            ChatMode::Lab => Some("⚠ LAB MODE — gunakan hanya di environment terisolasi"),
            ChatMode::Lite => {
                Some("💡 LITE MODE — mode ringan untuk pertanyaan umum dan diskusi sederhana")
            }
        }
    }
}

//! REPL command parsing.

use aidit_core::ChatMode;
use std::str::FromStr;

/// Slash commands offered for completion and hints.
pub const COMMANDS: [&str; 8] = [
    "/new", "/list", "/switch", "/rename", "/delete", "/mode", "/history", "/help",
];

/// A parsed line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Anything that is not a command is sent to the agent.
    Message(String),
    New(Option<String>),
    List,
    Switch(String),
    Rename { target: String, title: String },
    Delete(String),
    /// `None` cycles to the next mode.
    Mode(Option<ChatMode>),
    History,
    Help,
    Quit,
    /// A known command used incorrectly; carries the usage line.
    Usage(&'static str),
    Unknown(String),
}

impl Command {
    /// Parses one (already non-empty) input line.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line == "quit" || line == "exit" {
            return Command::Quit;
        }
        if !line.starts_with('/') {
            return Command::Message(line.to_string());
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name {
            "/new" => Command::New(non_empty(rest)),
            "/list" => Command::List,
            "/switch" => match non_empty(rest) {
                Some(target) => Command::Switch(target),
                None => Command::Usage("/switch <id|index>"),
            },
            "/rename" => {
                let (target, title) = match rest.split_once(char::is_whitespace) {
                    Some((target, title)) => (target, title.trim()),
                    None => (rest, ""),
                };
                if target.is_empty() {
                    Command::Usage("/rename <id|index> <title>")
                } else {
                    Command::Rename {
                        target: target.to_string(),
                        title: title.to_string(),
                    }
                }
            }
            "/delete" => match non_empty(rest) {
                Some(target) => Command::Delete(target),
                None => Command::Usage("/delete <id|index>"),
            },
            "/mode" => {
                if rest.is_empty() {
                    Command::Mode(None)
                } else {
                    match ChatMode::from_str(rest) {
                        Ok(mode) => Command::Mode(Some(mode)),
                        Err(_) => Command::Usage("/mode [pro|lab|lite]"),
                    }
                }
            }
            "/history" => Command::History,
            "/help" => Command::Help,
            other => Command::Unknown(other.to_string()),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Resolves a session reference typed by the user.
///
/// Accepts a 1-based index into `ids` (as shown by `/list`), an exact id,
/// or an unambiguous id prefix.
pub fn resolve_target(ids: &[String], target: &str) -> Option<String> {
    if let Ok(index) = target.parse::<usize>()
        && (1..=ids.len()).contains(&index)
    {
        return Some(ids[index - 1].clone());
    }
    if let Some(id) = ids.iter().find(|id| id.as_str() == target) {
        return Some(id.clone());
    }

    let mut matches = ids.iter().filter(|id| id.starts_with(target));
    match (matches.next(), matches.next()) {
        (Some(id), None) => Some(id.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_message() {
        assert_eq!(
            Command::parse("  how do I read a pcap?  "),
            Command::Message("how do I read a pcap?".to_string())
        );
    }

    #[test]
    fn test_quit_aliases() {
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse("exit"), Command::Quit);
    }

    #[test]
    fn test_new_with_and_without_title() {
        assert_eq!(Command::parse("/new"), Command::New(None));
        assert_eq!(
            Command::parse("/new  Web audit "),
            Command::New(Some("Web audit".to_string()))
        );
    }

    #[test]
    fn test_rename_keeps_spaces_in_title() {
        assert_eq!(
            Command::parse("/rename 2 Lateral movement notes"),
            Command::Rename {
                target: "2".to_string(),
                title: "Lateral movement notes".to_string(),
            }
        );
        assert_eq!(
            Command::parse("/rename 2"),
            Command::Rename {
                target: "2".to_string(),
                title: String::new(),
            }
        );
        assert!(matches!(Command::parse("/rename"), Command::Usage(_)));
    }

    #[test]
    fn test_mode_argument() {
        assert_eq!(Command::parse("/mode"), Command::Mode(None));
        assert_eq!(Command::parse("/mode lab"), Command::Mode(Some(ChatMode::Lab)));
        assert_eq!(Command::parse("/mode LITE"), Command::Mode(Some(ChatMode::Lite)));
        assert!(matches!(Command::parse("/mode turbo"), Command::Usage(_)));
    }

    #[test]
    fn test_missing_targets_are_usage_errors() {
        assert!(matches!(Command::parse("/switch"), Command::Usage(_)));
        assert!(matches!(Command::parse("/delete"), Command::Usage(_)));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            Command::parse("/frobnicate now"),
            Command::Unknown("/frobnicate".to_string())
        );
    }

    #[test]
    fn test_resolve_target() {
        let ids = vec![
            "1a2b".to_string(),
            "1a9f".to_string(),
            "c3d4".to_string(),
        ];

        assert_eq!(resolve_target(&ids, "1"), Some("1a2b".to_string()));
        assert_eq!(resolve_target(&ids, "3"), Some("c3d4".to_string()));
        assert_eq!(resolve_target(&ids, "c3"), Some("c3d4".to_string()));
        assert_eq!(resolve_target(&ids, "1a9f"), Some("1a9f".to_string()));
        // ambiguous prefix
        assert_eq!(resolve_target(&ids, "1a"), None);
        assert_eq!(resolve_target(&ids, "9"), None);
        assert_eq!(resolve_target(&ids, "zz"), None);
    }
}

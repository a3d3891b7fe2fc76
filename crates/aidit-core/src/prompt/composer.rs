use crate::session::{ChatMessage, Session};

/// Number of trailing messages included in a prompt by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 4;

const SEPARATOR: &str = "\n\n";

/// Builds the final prompt string sent to the agent.
///
/// Takes the last `limit` messages of `history` (all of them if shorter,
/// none if `limit` is zero), keeps their order, and renders each as
/// `"<ROLE>:\n<content>"`. The base template comes first, verbatim, and
/// all parts are joined with a blank line.
pub fn build_prompt(base_template: &str, history: &[ChatMessage], limit: usize) -> String {
    let start = history.len().saturating_sub(limit);
    let mut parts = Vec::with_capacity(history.len() - start + 1);
    parts.push(base_template.to_string());
    for message in &history[start..] {
        parts.push(format!("{}:\n{}", message.role.tag(), message.content));
    }
    parts.join(SEPARATOR)
}

/// Builds the prompt for a session from its own mode template and history.
pub fn compose_for_session(session: &Session, limit: usize) -> String {
    build_prompt(session.mode.base_template(), &session.messages, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ChatMode;

    fn history(n: usize) -> Vec<ChatMessage> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    ChatMessage::user(format!("question {i}"))
                } else {
                    ChatMessage::assistant(format!("answer {i}"))
                }
            })
            .collect()
    }

    #[test]
    fn test_keeps_last_four_of_six_in_order() {
        let prompt = build_prompt("BASE", &history(6), 4);
        assert_eq!(
            prompt,
            "BASE\n\nUSER:\nquestion 2\n\nASSISTANT:\nanswer 3\n\nUSER:\nquestion 4\n\nASSISTANT:\nanswer 5"
        );
        assert!(!prompt.contains("question 0"));
        assert!(!prompt.contains("answer 1"));
    }

    #[test]
    fn test_short_history_is_taken_whole() {
        let prompt = build_prompt("BASE", &history(2), 4);
        assert_eq!(prompt, "BASE\n\nUSER:\nquestion 0\n\nASSISTANT:\nanswer 1");
    }

    #[test]
    fn test_empty_history_is_just_the_template() {
        assert_eq!(build_prompt("BASE", &[], 4), "BASE");
    }

    #[test]
    fn test_zero_limit_includes_no_messages() {
        assert_eq!(build_prompt("BASE", &history(3), 0), "BASE");
    }

    #[test]
    fn test_content_is_verbatim() {
        let messages = vec![ChatMessage::assistant("ERROR: Agent error 500: boom\n  trailing ")];
        let prompt = build_prompt("BASE", &messages, 4);
        assert_eq!(prompt, "BASE\n\nASSISTANT:\nERROR: Agent error 500: boom\n  trailing ");
    }

    #[test]
    fn test_new_session_single_message_with_pro_template() {
        let mut session = Session::default();
        session.messages.push(ChatMessage::user("test"));

        let prompt = compose_for_session(&session, DEFAULT_HISTORY_LIMIT);

        let expected_prefix = format!("{}\n\n", ChatMode::Pro.base_template());
        assert!(prompt.starts_with(&expected_prefix));
        assert_eq!(&prompt[expected_prefix.len()..], "USER:\ntest");
    }
}

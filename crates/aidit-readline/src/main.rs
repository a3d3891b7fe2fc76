use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use colored::Colorize;
use rustyline::Editor;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use tokio::sync::Mutex;

use aidit_application::ChatUseCase;
use aidit_application::chat_usecase::ERROR_PREFIX;
use aidit_core::{AgentInvoker, AiditError, ChatMode, MessageRole, Session, SessionStore};
use aidit_infrastructure::{AiditPaths, ConfigStorage, JsonFileStateRepository};
use aidit_interaction::HttpAgentClient;

mod commands;
mod logging;

use commands::{COMMANDS, Command, resolve_target};

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else if let Some(prefix) = line.strip_prefix("/mode ") {
            let candidates: Vec<Pair> = ["pro", "lab", "lite"]
                .iter()
                .filter(|mode| mode.starts_with(prefix))
                .map(|mode| Pair {
                    display: mode.to_string(),
                    replacement: mode.to_string(),
                })
                .collect();
            Ok(("/mode ".len(), candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Stands in for the HTTP client when no endpoint is configured.
///
/// Every send then records the configuration error in the conversation.
struct UnconfiguredAgent {
    reason: AiditError,
}

#[async_trait]
impl AgentInvoker for UnconfiguredAgent {
    async fn invoke(&self, _prompt: &str) -> aidit_core::Result<String> {
        Err(self.reason.clone())
    }
}

/// The main entry point for the aidit REPL.
///
/// 1. Resolves paths and installs file logging
/// 2. Loads the agent configuration (file + environment)
/// 3. Restores the session store from disk
/// 4. Runs the read-eval-print loop until `quit`, `exit` or Ctrl-D
#[tokio::main]
async fn main() -> Result<()> {
    // ===== Backend Initialization =====
    let paths = AiditPaths::resolve()?;
    let _log_guard = logging::init(&paths.logs_dir());

    let config_storage = ConfigStorage::new(paths.config_file());
    if let Err(e) = config_storage.ensure_exists() {
        tracing::warn!("Could not create {}: {}", config_storage.path().display(), e);
    }
    let config = config_storage.load()?;

    let agent: Arc<dyn AgentInvoker> = match HttpAgentClient::from_config(&config) {
        Ok(client) => {
            tracing::info!("Agent endpoint: {}", client.url());
            Arc::new(client)
        }
        Err(e) => {
            println!("{}", format!("Warning: {}", e).yellow());
            println!(
                "{}",
                format!("Edit {} to configure the agent.", config_storage.path().display())
                    .bright_black()
            );
            Arc::new(UnconfiguredAgent { reason: e })
        }
    };

    let repository = Arc::new(JsonFileStateRepository::new(paths.state_file()));
    let store = Arc::new(Mutex::new(SessionStore::open(repository)));
    let chat = ChatUseCase::new(store.clone(), agent, config.history_limit);

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== AIDIT ===".bright_magenta().bold());
    println!(
        "{}",
        "Type a question, '/help' for commands, or 'quit' to exit.".bright_black()
    );
    println!();
    print_session(store.lock().await.active_session());

    // ===== Main REPL Loop =====
    loop {
        let prompt = {
            let mut store = store.lock().await;
            let session = store.active_session();
            format!("[{}] {} >> ", session.mode, session.title)
        };

        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match Command::parse(trimmed) {
                    Command::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Command::Message(text) => {
                        println!("{}", "Analisis...".bright_black());
                        match chat.send(&text).await {
                            Ok(outcome) if outcome.failed => {
                                println!("{}", outcome.reply.red());
                            }
                            Ok(outcome) => {
                                for line in outcome.reply.lines() {
                                    println!("{}", line.bright_blue());
                                }
                            }
                            Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
                        }
                        println!();
                    }
                    command => run_command(&store, command).await,
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

async fn run_command(store: &Mutex<SessionStore>, command: Command) {
    let mut store = store.lock().await;

    match command {
        Command::New(title) => {
            store.create_session(title.as_deref());
            print_session(store.active_session());
        }
        Command::List => print_list(&store),
        Command::Switch(target) => {
            let Some(id) = find_session(&store, &target) else {
                return;
            };
            store.set_active_session(&id);
            print_session(store.active_session());
        }
        Command::Rename { target, title } => {
            let Some(id) = find_session(&store, &target) else {
                return;
            };
            store.rename_session(&id, &title);
            if let Some(session) = store.session(&id) {
                println!("{}", format!("Renamed to '{}'", session.title).green());
            }
        }
        Command::Delete(target) => {
            let Some(id) = find_session(&store, &target) else {
                return;
            };
            let title = store
                .session(&id)
                .map(|s| s.title.clone())
                .unwrap_or_default();
            store.delete_session(&id);
            println!("{}", format!("Deleted '{}'", title).green());
            print_session(store.active_session());
        }
        Command::Mode(mode) => {
            match mode {
                Some(mode) => store.set_mode(mode),
                None => store.cycle_mode(),
            }
            print_session(store.active_session());
        }
        Command::History => print_history(store.active_session()),
        Command::Help => print_help(),
        Command::Usage(usage) => println!("{}", format!("Usage: {}", usage).yellow()),
        Command::Unknown(name) => {
            println!(
                "{}",
                format!("Unknown command {}. Type '/help' for a list.", name).bright_black()
            );
        }
        Command::Message(_) | Command::Quit => {}
    }
}

fn find_session(store: &SessionStore, target: &str) -> Option<String> {
    let ids: Vec<String> = store.sessions().map(|s| s.id.clone()).collect();
    let found = resolve_target(&ids, target);
    if found.is_none() {
        println!("{}", format!("No session matches '{}'", target).yellow());
    }
    found
}

fn print_session(session: &Session) {
    println!(
        "{} {} {}",
        "●".bright_magenta(),
        session.title.bold(),
        format!("[{}] {} message(s)", session.mode, session.messages.len()).bright_black()
    );
    if let Some(banner) = session.mode.banner() {
        match session.mode {
            ChatMode::Lab => println!("{}", banner.bright_red()),
            _ => println!("{}", banner.bright_cyan()),
        }
    }
    println!();
}

fn print_list(store: &SessionStore) {
    let active = store.active_session_id();
    for (index, session) in store.sessions().enumerate() {
        let marker = if active == Some(session.id.as_str()) { "*" } else { " " };
        println!(
            "{} {:>2}. {} {}",
            marker.bright_green(),
            index + 1,
            session.title,
            format!(
                "[{}] {} message(s) {}",
                session.mode,
                session.messages.len(),
                session.id
            )
            .bright_black()
        );
    }
}

fn print_history(session: &Session) {
    if session.messages.is_empty() {
        println!("{}", "No messages yet.".bright_black());
        return;
    }
    for message in &session.messages {
        match message.role {
            MessageRole::User => {
                println!("{}", format!("{}:", message.role.tag()).green().bold());
                println!("{}", message.content.green());
            }
            MessageRole::Assistant => {
                println!("{}", format!("{}:", message.role.tag()).bright_blue().bold());
                if message.content.starts_with(ERROR_PREFIX) {
                    println!("{}", message.content.red());
                } else {
                    println!("{}", message.content.bright_blue());
                }
            }
        }
        println!();
    }
}

fn print_help() {
    let rows = [
        ("/new [title]", "start a new chat"),
        ("/list", "list chats (* marks the active one)"),
        ("/switch <id|index>", "switch to another chat"),
        ("/rename <id|index> <title>", "rename a chat"),
        ("/delete <id|index>", "delete a chat"),
        ("/mode [pro|lab|lite]", "set the mode, or cycle it with no argument"),
        ("/history", "show the active chat"),
        ("quit, exit", "leave aidit"),
    ];
    for (command, text) in rows {
        println!("  {} {}", format!("{:<28}", command).bright_cyan(), text);
    }
}

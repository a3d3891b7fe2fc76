//! Tracing setup for the REPL.
//!
//! Logs go to a daily file under the logs directory so they never interleave
//! with the conversation on the terminal. If that directory is unusable,
//! warnings and errors go to stderr instead.

use std::env;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "aidit=info";

fn tracing_filter() -> EnvFilter {
    let explicit = env::var("AIDIT_LOG").or_else(|_| env::var("RUST_LOG")).ok();
    match explicit {
        Some(filter) => EnvFilter::new(filter),
        None => EnvFilter::new(DEFAULT_FILTER),
    }
}

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the program.
pub fn init(logs_dir: &Path) -> Option<WorkerGuard> {
    let appender = std::fs::create_dir_all(logs_dir)
        .map_err(|e| e.to_string())
        .and_then(|_| {
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("aidit.log")
                .build(logs_dir)
                .map_err(|e| e.to_string())
        });

    match appender {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(tracing_filter())
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("warn"))
                .with_writer(std::io::stderr)
                .init();
            tracing::warn!("File logging disabled ({}): {}", logs_dir.display(), e);
            None
        }
    }
}

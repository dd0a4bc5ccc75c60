//! Log file setup for the injected module.
//!
//! The host has no console, so diagnostics go to a file next to the DLL.
//! When that file cannot be opened the module still attaches and logs to
//! stderr instead.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

type BoxedSubscriber = Box<dyn Subscriber + Send + Sync>;

/// Filter from `RUST_LOG`, else the configured level.
pub fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn file_subscriber(path: &Path, default_level: &str) -> anyhow::Result<BoxedSubscriber> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    Ok(Box::new(
        tracing_subscriber::fmt()
            .with_env_filter(filter(default_level))
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish(),
    ))
}

fn stderr_subscriber(default_level: &str) -> BoxedSubscriber {
    Box::new(
        tracing_subscriber::fmt()
            .with_env_filter(filter(default_level))
            .with_ansi(false)
            .with_writer(std::io::stderr)
            .finish(),
    )
}

/// Subscriber appending to `path`, or writing to stderr when `path` cannot
/// be opened. The error is returned alongside so it can be logged once the
/// subscriber is live.
pub fn file_or_stderr(
    path: &Path,
    default_level: &str,
) -> (BoxedSubscriber, Option<anyhow::Error>) {
    match file_subscriber(path, default_level) {
        Ok(subscriber) => (subscriber, None),
        Err(e) => (stderr_subscriber(default_level), Some(e)),
    }
}

/// Install the global subscriber for the module.
///
/// Never fails: returns the reason the log file is unavailable, if it is.
pub fn init_logging(path: &Path, default_level: &str) -> Option<anyhow::Error> {
    let (subscriber, file_error) = file_or_stderr(path, default_level);
    // Someone else installed a subscriber first; theirs keeps working.
    let _ = tracing::subscriber::set_global_default(subscriber);
    file_error
}

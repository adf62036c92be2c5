//! Tracing setup.
//!
//! The dashboard owns the terminal, so while it runs log lines go to a file
//! (or nowhere). One-shot commands log to stderr.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Discard,
}

/// Build the filter: `RUST_LOG` first, then `focuswatch=<level>`.
pub fn filter(level: &str) -> Result<EnvFilter> {
    let directive = format!("focuswatch={}", level)
        .parse::<Directive>()
        .with_context(|| format!("Invalid log level: {}", level))?;
    Ok(EnvFilter::from_default_env().add_directive(directive))
}

/// Install the global subscriber. Safe to call once per process.
pub fn init_logging(level: &str, target: LogTarget<'_>) -> Result<()> {
    let filter = filter(level)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match target {
        LogTarget::Stderr => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
        LogTarget::Discard => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::sink))
            .try_init(),
    };

    result.context("Logging already initialized")
}

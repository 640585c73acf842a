//! Tracing initialisation.
//!
//! `RUST_LOG` controls the filter (default `info`). The interactive form owns
//! the terminal, so it only logs when a log file is configured.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::AppError;

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Off,
}

impl LogTarget {
    /// Pick a target for a command: a configured file always wins; otherwise
    /// interactive runs are silent and batch runs log to stderr.
    pub fn resolve(log_file: Option<&Path>, interactive: bool) -> Self {
        match log_file {
            Some(path) => Self::File(path.to_path_buf()),
            None if interactive => Self::Off,
            None => Self::Stderr,
        }
    }
}

/// Install the global subscriber. Only the first call has an effect.
pub fn init_tracing(target: &LogTarget) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match target {
        LogTarget::Off => {}
        LogTarget::Stderr => {
            let installed = tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .try_init();
            report_existing_subscriber(installed);
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    AppError::new(2, format!("Failed to open log file '{}': {e}", path.display()))
                })?;
            let installed = tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init();
            report_existing_subscriber(installed);
        }
    }

    Ok(())
}

/// A second install is not an error: the first subscriber keeps receiving events.
fn report_existing_subscriber(result: Result<(), TryInitError>) {
    if let Err(e) = result {
        tracing::debug!("keeping existing tracing subscriber: {e}");
    }
}

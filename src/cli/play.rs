//! Play command implementation.

use super::{CliError, init_logging, load_config};
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Flags that override the configuration file.
#[derive(Debug, Default)]
pub(crate) struct Overrides {
    /// Bot name.
    pub(crate) name: Option<String>,
    /// Log destination.
    pub(crate) log_file: Option<PathBuf>,
    /// Turn deadline in milliseconds.
    pub(crate) deadline_ms: Option<u64>,
    /// Worker thread count.
    pub(crate) threads: Option<usize>,
    /// Disable parallel decisions.
    pub(crate) sequential: bool,
}

/// Execute the play command.
///
/// Stdout carries nothing but protocol lines, so logs go to a file.
///
/// # Errors
///
/// Returns an error on invalid configuration, protocol violations or i/o
/// failure.
pub(crate) fn execute(
    config_path: Option<&Path>,
    log_level: &str,
    overrides: Overrides,
) -> Result<(), CliError> {
    let log_file = overrides
        .log_file
        .unwrap_or_else(|| PathBuf::from(format!("settler-{}.log", std::process::id())));
    init_logging(log_level, Some(&log_file))?;

    let mut config = load_config(config_path)?;
    if let Some(name) = overrides.name {
        config.name = name;
    }
    if let Some(deadline_ms) = overrides.deadline_ms {
        config.turn_deadline_ms = deadline_ms;
    }
    if overrides.threads.is_some() {
        config.threads = overrides.threads;
    }
    if overrides.sequential {
        config.parallel = false;
    }
    config.validate()?;

    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| CliError::new(format!("Failed to start worker pool: {e}")))?;
    }

    info!(
        name = %config.name,
        deadline_ms = config.turn_deadline_ms,
        parallel = config.parallel,
        threads = ?config.threads,
        "waiting for handshake"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let turns = settler::protocol::play(stdin.lock(), stdout.lock(), config)?;
    info!(turns, "game over");

    Ok(())
}

//! CLI command implementations for Settler.

pub(crate) mod decide;
mod output;
pub(crate) mod play;

use clap::ValueEnum;
use settler::{BotConfig, ConfigError, ProtocolError};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Output format for the `decide` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ProtocolError> for CliError {
    fn from(e: ProtocolError) -> Self {
        Self::new(e.to_string())
    }
}

/// Load the configuration file if one was given, defaults otherwise.
pub(crate) fn load_config(path: Option<&Path>) -> Result<BotConfig, CliError> {
    match path {
        Some(path) => Ok(BotConfig::load(path)?),
        None => Ok(BotConfig::default()),
    }
}

/// Install the global tracing subscriber, writing to `file` or to stderr.
pub(crate) fn init_logging(level: &str, file: Option<&Path>) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| CliError::new(format!("Invalid log level {level:?}: {e}")))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false);

    let installed = match file {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                CliError::new(format!("Failed to create log file {}: {e}", path.display()))
            })?;
            builder.with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| CliError::new(format!("Failed to initialise logging: {e}")))
}

//! Settler CLI - plays a game against the engine or inspects recorded snapshots.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Settler - a Halite II style resource and combat bot
#[derive(Parser, Debug)]
#[command(name = "settler")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file (missing fields keep their defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter such as `info` or `settler=trace` (RUST_LOG wins if set)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Command to run (default: play)
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a game over stdin/stdout (what the engine launches)
    Play {
        /// Bot name sent during the handshake
        #[arg(short, long)]
        name: Option<String>,

        /// Log file (default: settler-<pid>.log; stdout is reserved for the engine)
        #[arg(long)]
        log_file: Option<PathBuf>,

        /// Turn deadline in milliseconds
        #[arg(short, long)]
        deadline_ms: Option<u64>,

        /// Worker threads for per-unit decisions (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Decide units one after another instead of in parallel
        #[arg(long)]
        sequential: bool,
    },

    /// Decide one recorded turn and print the orders
    Decide {
        /// File holding the player id, map size and snapshot lines
        #[arg(required = true)]
        snapshot: PathBuf,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let command = args.command.unwrap_or(Commands::Play {
        name: None,
        log_file: None,
        deadline_ms: None,
        threads: None,
        sequential: false,
    });

    let result = match command {
        Commands::Play {
            name,
            log_file,
            deadline_ms,
            threads,
            sequential,
        } => cli::play::execute(
            args.config.as_deref(),
            &args.log_level,
            cli::play::Overrides {
                name,
                log_file,
                deadline_ms,
                threads,
                sequential,
            },
        ),

        Commands::Decide { snapshot, format } => {
            cli::decide::execute(args.config.as_deref(), &args.log_level, &snapshot, format)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

//! Decide command implementation.

use super::output::{JsonTurn, format_text};
use super::{CliError, OutputFormat, init_logging, load_config};
use settler::Session;
use settler::protocol::{parse_map_size, parse_player_id, parse_snapshot};
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Deadline used when deciding a recorded turn.
const REPLAY_DEADLINE_MS: u64 = 60_000;

/// Execute the decide command.
///
/// The snapshot file holds the three handshake lines: player id, map size and
/// one map snapshot.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not decode.
pub(crate) fn execute(
    config_path: Option<&Path>,
    log_level: &str,
    snapshot: &Path,
    format: OutputFormat,
) -> Result<(), CliError> {
    init_logging(log_level, None)?;
    let mut config = load_config(config_path)?;
    // Recorded turns are not raced against the engine clock.
    config.turn_deadline_ms = config.turn_deadline_ms.max(REPLAY_DEADLINE_MS);

    let text = fs::read_to_string(snapshot)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", snapshot.display())))?;
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let mut next_line = |what: &str| {
        lines.next().ok_or_else(|| {
            CliError::new(format!("{} is missing the {what} line", snapshot.display()))
        })
    };

    let player = parse_player_id(next_line("player id")?)?;
    let map_size = parse_map_size(next_line("map size")?)?;
    let world = parse_snapshot(next_line("snapshot")?, player, map_size)?;

    let mut session = Session::new(player, map_size, config);
    let outcome = session.play_turn(&world, Instant::now());

    match format {
        OutputFormat::Text => {
            print!("{}", format_text(&world, &outcome));
        }
        OutputFormat::Json => {
            let json = JsonTurn::from_outcome(&world, &outcome);
            println!(
                "{}",
                serde_json::to_string_pretty(&json)
                    .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?
            );
        }
    }

    Ok(())
}

//! Handshake and turn loop over any buffered reader/writer pair.

use std::io::{BufRead, Write};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::BotConfig;
use crate::order::Order;
use crate::protocol::ProtocolError;
use crate::protocol::codec::{encode_orders, parse_map_size, parse_player_id, parse_snapshot};
use crate::session::Session;

/// Connection to the engine.
#[derive(Debug)]
pub struct Transport<R, W> {
    /// Engine output (our input).
    reader: R,
    /// Engine input (our output).
    writer: W,
    /// Reused line buffer.
    line: String,
}

impl<R: BufRead, W: Write> Transport<R, W> {
    /// Wrap a reader and a writer.
    #[must_use]
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            line: String::new(),
        }
    }

    /// Read the next line. `Ok(false)` means end of input.
    fn read_line(&mut self) -> Result<bool, ProtocolError> {
        self.line.clear();
        let read = self.reader.read_line(&mut self.line)?;
        Ok(read > 0)
    }

    /// Read a line that must be present during the handshake.
    fn expect_line(&mut self, stage: &'static str) -> Result<(), ProtocolError> {
        if self.read_line()? {
            Ok(())
        } else {
            Err(ProtocolError::Closed(stage))
        }
    }

    /// Perform the handshake and open a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine closes the stream early or sends
    /// malformed handshake lines.
    pub fn handshake(&mut self, config: BotConfig) -> Result<Session, ProtocolError> {
        self.expect_line("player id")?;
        let player = parse_player_id(&self.line)?;

        self.expect_line("map size")?;
        let map_size = parse_map_size(&self.line)?;

        self.expect_line("initial snapshot")?;
        let initial = parse_snapshot(&self.line, player, map_size)?;
        debug!(
            units = initial.units().len(),
            nodes = initial.nodes().len(),
            players = initial.all_players().len(),
            "initial snapshot"
        );

        writeln!(self.writer, "{}", config.name)?;
        self.writer.flush()?;

        Ok(Session::new(player, map_size, config))
    }

    /// Play turns until the engine closes the stream. Returns the turns played.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed snapshots or i/o failure.
    pub fn run(&mut self, session: &mut Session) -> Result<u32, ProtocolError> {
        while self.read_line()? {
            let received = Instant::now();
            if self.line.trim().is_empty() {
                warn!("blank snapshot line ignored");
                continue;
            }

            let world = parse_snapshot(&self.line, session.player(), session.map_size())?;
            let outcome = session.play_turn(&world, received);
            self.send(&outcome.orders)?;
        }

        info!(turns = session.turns(), "engine closed the stream");
        Ok(session.turns())
    }

    /// Write one turn's orders.
    fn send(&mut self, orders: &[Order]) -> Result<(), ProtocolError> {
        writeln!(self.writer, "{}", encode_orders(orders))?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Run a whole game: handshake, then turns until end of input.
///
/// # Errors
///
/// Returns the first protocol or i/o error.
pub fn play<R: BufRead, W: Write>(reader: R, writer: W, config: BotConfig) -> Result<u32, ProtocolError> {
    let mut transport = Transport::new(reader, writer);
    let mut session = transport.handshake(config)?;
    transport.run(&mut session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HANDSHAKE: &str = "0\n100 100\n1 0 1 0 10.0 10.0 255 0 0 0 0 0 0 0\n";

    #[test]
    fn test_handshake_writes_name() {
        let mut output = Vec::new();
        let config = BotConfig {
            name: "probe".to_string(),
            ..BotConfig::default()
        };

        let turns = play(Cursor::new(HANDSHAKE), &mut output, config).unwrap();
        assert_eq!(turns, 0);
        assert_eq!(String::from_utf8(output).unwrap(), "probe\n");
    }

    #[test]
    fn test_turn_without_targets_sends_empty_line() {
        let input = format!("{HANDSHAKE}1 0 1 0 10.0 10.0 255 0 0 0 0 0 0 0\n\n");
        let mut output = Vec::new();

        let turns = play(Cursor::new(input), &mut output, BotConfig::default()).unwrap();
        assert_eq!(turns, 1);
        assert_eq!(String::from_utf8(output).unwrap(), "settler\n\n");
    }

    #[test]
    fn test_early_close() {
        let err = play(Cursor::new("0\n"), Vec::new(), BotConfig::default()).unwrap_err();
        assert!(matches!(err, ProtocolError::Closed("map size")));
    }

    #[test]
    fn test_malformed_turn_is_an_error() {
        let input = format!("{HANDSHAKE}2 0\n");
        let err = play(Cursor::new(input), Vec::new(), BotConfig::default()).unwrap_err();
        assert!(matches!(err, ProtocolError::UnexpectedEnd { .. }));
    }
}

//! Line-based text protocol spoken with the game engine.
//!
//! The engine sends the player id, the map size and an initial snapshot, then
//! waits for the bot's name. After that every turn is one snapshot line in and
//! one order line out. End of input means the game is over.

mod codec;
mod transport;

use std::io;

use thiserror::Error;

pub use codec::{encode_order, encode_orders, parse_map_size, parse_player_id, parse_snapshot};
pub use transport::{Transport, play};

/// Errors raised while talking to the engine.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A line ended before all expected fields were read.
    #[error("unexpected end of input while reading {field}")]
    UnexpectedEnd {
        /// Field being read.
        field: &'static str,
    },
    /// A token could not be parsed as the expected type.
    #[error("invalid {field}: {token:?}")]
    InvalidToken {
        /// Field being read.
        field: &'static str,
        /// Offending token.
        token: String,
    },
    /// A docking status outside the known range.
    #[error("unknown docking status {0}")]
    UnknownStatus(u8),
    /// Tokens left over after a complete snapshot.
    #[error("{0} unexpected trailing tokens after snapshot")]
    TrailingInput(usize),
    /// The engine closed the stream before the game started.
    #[error("engine closed the connection while waiting for {0}")]
    Closed(&'static str),
    /// Reading from or writing to the engine failed.
    #[error("engine i/o failed: {0}")]
    Io(#[from] io::Error),
}

//! Snapshot decoding and order encoding.

use std::str::{FromStr, SplitWhitespace};

use crate::geometry::Position;
use crate::order::{Action, Order};
use crate::protocol::ProtocolError;
use crate::world::{ClaimStatus, PlayerId, ResourceNode, Unit, WorldView};

/// Whitespace tokenizer that names the field it failed on.
struct Tokens<'a> {
    /// Remaining tokens.
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    /// Tokenize a line.
    fn new(line: &'a str) -> Self {
        Self {
            inner: line.split_whitespace(),
        }
    }

    /// Parse the next token as `T`.
    fn next<T: FromStr>(&mut self, field: &'static str) -> Result<T, ProtocolError> {
        let token = self
            .inner
            .next()
            .ok_or(ProtocolError::UnexpectedEnd { field })?;
        token.parse().map_err(|_| ProtocolError::InvalidToken {
            field,
            token: token.to_string(),
        })
    }

    /// Skip a token that carries nothing the bot uses.
    fn skip(&mut self, field: &'static str) -> Result<(), ProtocolError> {
        self.inner
            .next()
            .map(|_| ())
            .ok_or(ProtocolError::UnexpectedEnd { field })
    }

    /// Fail if anything is left.
    fn finish(self) -> Result<(), ProtocolError> {
        match self.inner.count() {
            0 => Ok(()),
            n => Err(ProtocolError::TrailingInput(n)),
        }
    }
}

/// Parse the first handshake line: the acting player's id.
///
/// # Errors
///
/// Returns an error if the line does not hold exactly one id.
pub fn parse_player_id(line: &str) -> Result<PlayerId, ProtocolError> {
    let mut tokens = Tokens::new(line);
    let id = tokens.next("player id")?;
    tokens.finish()?;
    Ok(id)
}

/// Parse the second handshake line: `width height`.
///
/// # Errors
///
/// Returns an error if the line does not hold exactly two dimensions.
pub fn parse_map_size(line: &str) -> Result<(u32, u32), ProtocolError> {
    let mut tokens = Tokens::new(line);
    let width = tokens.next("map width")?;
    let height = tokens.next("map height")?;
    tokens.finish()?;
    Ok((width, height))
}

/// Decode a wire docking status.
///
/// Undocking (3) is still attached to its node, so it counts as claimed.
fn decode_status(raw: u8) -> Result<ClaimStatus, ProtocolError> {
    match raw {
        0 => Ok(ClaimStatus::Unclaimed),
        1 => Ok(ClaimStatus::Claiming),
        2 | 3 => Ok(ClaimStatus::Claimed),
        other => Err(ProtocolError::UnknownStatus(other)),
    }
}

/// Parse one unit record: `id x y health vx vy status node progress cooldown`.
fn parse_unit(tokens: &mut Tokens<'_>, owner: PlayerId) -> Result<Unit, ProtocolError> {
    let id = tokens.next("unit id")?;
    let x = tokens.next("unit x")?;
    let y = tokens.next("unit y")?;
    let health = tokens.next("unit health")?;
    tokens.skip("unit velocity x")?;
    tokens.skip("unit velocity y")?;
    let status = decode_status(tokens.next("unit docking status")?)?;
    let node = tokens.next("unit docked node")?;
    tokens.skip("unit docking progress")?;
    tokens.skip("unit weapon cooldown")?;

    let mut unit = Unit::new(id, owner, Position::new(x, y)).claiming(status, node);
    unit.health = health;
    Ok(unit)
}

/// Parse one node record:
/// `id x y health radius capacity production remaining owned owner count ids...`.
fn parse_node(tokens: &mut Tokens<'_>) -> Result<ResourceNode, ProtocolError> {
    let id = tokens.next("node id")?;
    let x = tokens.next("node x")?;
    let y = tokens.next("node y")?;
    let health = tokens.next("node health")?;
    let radius = tokens.next("node radius")?;
    let capacity = tokens.next("node capacity")?;
    tokens.skip("node production")?;
    tokens.skip("node remaining production")?;
    let owned: u8 = tokens.next("node owned flag")?;
    let owner: PlayerId = tokens.next("node owner")?;
    let count: usize = tokens.next("node occupant count")?;
    let occupants = (0..count)
        .map(|_| tokens.next("node occupant id"))
        .collect::<Result<Vec<_>, _>>()?;

    let mut node = ResourceNode::new(id, Position::new(x, y), radius, capacity);
    node.health = health;
    node.occupants = occupants;
    if owned != 0 {
        node.owner = Some(owner);
    }
    Ok(node)
}

/// Decode a full snapshot line into a [`WorldView`] for player `me`.
///
/// # Errors
///
/// Returns an error naming the first field that is missing or malformed.
pub fn parse_snapshot(line: &str, me: PlayerId, map_size: (u32, u32)) -> Result<WorldView, ProtocolError> {
    let mut tokens = Tokens::new(line);

    let player_count: usize = tokens.next("player count")?;
    let mut players = Vec::new();
    let mut units = Vec::new();
    for _ in 0..player_count {
        let player = tokens.next("player id")?;
        let unit_count: usize = tokens.next("unit count")?;
        players.push(player);
        for _ in 0..unit_count {
            units.push(parse_unit(&mut tokens, player)?);
        }
    }

    let node_count: usize = tokens.next("node count")?;
    let nodes = (0..node_count)
        .map(|_| parse_node(&mut tokens))
        .collect::<Result<Vec<_>, _>>()?;

    tokens.finish()?;
    Ok(WorldView::new(me, map_size, players, units, nodes))
}

/// Encode one order as the engine expects it.
#[must_use]
pub fn encode_order(order: &Order) -> String {
    match order.action {
        Action::Claim { node } => format!("d {} {node}", order.unit),
        Action::Move { thrust, .. } => {
            format!("t {} {} {}", order.unit, thrust.magnitude, thrust.angle)
        }
    }
}

/// Encode a turn's orders as one space-separated line (without the newline).
#[must_use]
pub fn encode_orders(orders: &[Order]) -> String {
    orders.iter().map(encode_order).collect::<Vec<_>>().join(" ")
}

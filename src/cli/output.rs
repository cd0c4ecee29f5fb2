//! Output formatting for the `decide` command.

use serde::Serialize;
use settler::protocol::encode_orders;
use settler::{Action, Order, Role, TurnOutcome, WorldView, classify};

/// JSON-serializable turn decision.
#[derive(Debug, Serialize)]
pub(super) struct JsonTurn<'a> {
    /// Acting player.
    pub(super) player: u32,
    /// The exact line that would be sent to the engine.
    pub(super) command_line: String,
    /// Orders sorted by unit id.
    pub(super) orders: &'a [Order],
    /// Owned units in the snapshot.
    pub(super) owned: usize,
    /// Units skipped because they are attached to a node.
    pub(super) busy: usize,
    /// Units without an order.
    pub(super) idle: usize,
    /// Units not started before the deadline.
    pub(super) timed_out: usize,
}

impl<'a> JsonTurn<'a> {
    /// Create from a turn outcome.
    pub(super) fn from_outcome(world: &WorldView, outcome: &'a TurnOutcome) -> Self {
        Self {
            player: world.me(),
            command_line: encode_orders(&outcome.orders),
            orders: &outcome.orders,
            owned: outcome.stats.owned,
            busy: outcome.stats.busy,
            idle: outcome.stats.idle,
            timed_out: outcome.stats.timed_out,
        }
    }
}

/// Format a turn outcome as human-readable text.
pub(super) fn format_text(world: &WorldView, outcome: &TurnOutcome) -> String {
    let stats = &outcome.stats;
    let mut output = String::new();

    output.push_str(&format!("Turn for player {}\n", world.me()));
    output.push_str(&format!(
        "  Units: {} owned, {} busy, {} idle, {} timed out\n",
        stats.owned, stats.busy, stats.idle, stats.timed_out
    ));

    if outcome.orders.is_empty() {
        output.push_str("  No orders\n");
    } else {
        output.push_str("  Orders:\n");
        for order in &outcome.orders {
            output.push_str(&format!("    {}\n", describe(world, order)));
        }
    }

    output.push('\n');
    output.push_str(&encode_orders(&outcome.orders));
    output.push('\n');
    output
}

/// One line describing an order.
fn describe(world: &WorldView, order: &Order) -> String {
    let role = match world.unit(order.unit).map(classify) {
        Some(Role::Economic) => "economic",
        Some(Role::Military) => "military",
        None => "unknown",
    };

    match order.action {
        Action::Claim { node } => format!("unit {} ({role}): claim node {node}", order.unit),
        Action::Move {
            destination,
            thrust,
            ..
        } => format!(
            "unit {} ({role}): thrust {} at {} deg towards ({:.2}, {:.2})",
            order.unit, thrust.magnitude, thrust.angle, destination.x, destination.y
        ),
    }
}

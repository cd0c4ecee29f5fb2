//! Orders and the builder that derives them from a selection.

use serde::Serialize;

use crate::config::{BotConfig, MoveProfile};
use crate::geometry::{Position, UNIT_RADIUS, closest_point_to};
use crate::navigation::{MotionPlanner, Thrust};
use crate::target::Selection;
use crate::world::{NodeId, Unit, UnitId, WorldView};

/// What a unit does this turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Action {
    /// Attach to a resource node.
    Claim {
        /// The node to attach to.
        node: NodeId,
    },
    /// Move towards a destination.
    Move {
        /// Point the unit is heading for.
        destination: Position,
        /// Profile the move was planned with.
        profile: MoveProfile,
        /// Planned thrust for this turn.
        thrust: Thrust,
    },
}

/// A single order for one owned unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Order {
    /// Issuing unit.
    pub unit: UnitId,
    /// What it does.
    pub action: Action,
}

impl Order {
    /// Whether this is a claim order.
    #[must_use]
    pub const fn is_claim(&self) -> bool {
        matches!(self.action, Action::Claim { .. })
    }
}

/// Move profiles per situation.
#[derive(Debug, Clone, Copy)]
struct Profiles {
    /// Approaching a resource node.
    economic: MoveProfile,
    /// Attacking an engaged enemy.
    engaged: MoveProfile,
    /// Closing on a moving enemy.
    closing: MoveProfile,
}

/// Turns a (unit, selection) pair into at most one order.
#[derive(Debug, Clone, Copy)]
pub struct OrderBuilder<P> {
    /// Range checks and path planning.
    planner: P,
    /// Profile per situation.
    profiles: Profiles,
}

impl<P: MotionPlanner> OrderBuilder<P> {
    /// Create a builder using `planner` and the move profiles in `config`.
    #[must_use]
    pub fn new(planner: P, config: &BotConfig) -> Self {
        Self {
            planner,
            profiles: Profiles {
                economic: config.economic,
                engaged: config.engaged,
                closing: config.closing,
            },
        }
    }

    /// Build the order for `unit`, or `None` when the planner finds no feasible move.
    #[must_use]
    pub fn build(&self, world: &WorldView, unit: &Unit, selection: &Selection<'_>) -> Option<Order> {
        let (destination, profile) = match *selection {
            Selection::Economic(node) => {
                if self.planner.can_claim(unit, node) {
                    return Some(Order {
                        unit: unit.id,
                        action: Action::Claim { node: node.id },
                    });
                }
                let profile = self.profiles.economic;
                let destination =
                    closest_point_to(unit.position, node.position, node.radius, profile.standoff);
                (destination, profile)
            }
            Selection::Military { target, engaged } => {
                let profile = if engaged {
                    self.profiles.engaged
                } else {
                    self.profiles.closing
                };
                let destination =
                    closest_point_to(unit.position, target.position, UNIT_RADIUS, profile.standoff);
                (destination, profile)
            }
        };

        let thrust = self.planner.navigate(world, unit, destination, &profile)?;
        Some(Order {
            unit: unit.id,
            action: Action::Move {
                destination,
                profile,
                thrust,
            },
        })
    }
}

//! Motion planning: turning a destination into a thrust.
//!
//! The planner walks the straight line to the destination and, while an
//! obstacle sits on it, rotates the heading by a fixed angular step and tries
//! again. Resource nodes are always obstacles; other units only when the move
//! profile asks for unit avoidance.

use serde::Serialize;

use crate::config::{MoveProfile, NavigationConfig};
use crate::geometry::{Position, segment_intersects_circle};
use crate::world::{ResourceNode, Unit, WorldView};

/// Clearance added to the mover's radius when testing for obstacles.
const OBSTACLE_MARGIN: f64 = 0.1;

/// One turn of movement as the engine understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Thrust {
    /// Whole units of distance travelled this turn.
    pub magnitude: u32,
    /// Heading in whole degrees, `0..360`.
    pub angle: u32,
}

/// Capability checks and path planning used when building orders.
pub trait MotionPlanner {
    /// Whether `unit` is close enough to `node` to claim it this turn.
    fn can_claim(&self, unit: &Unit, node: &ResourceNode) -> bool;

    /// Plan a thrust from `unit` towards `destination`.
    ///
    /// Returns `None` when no heading is clear or the unit is already there.
    fn navigate(
        &self,
        world: &WorldView,
        unit: &Unit,
        destination: Position,
        profile: &MoveProfile,
    ) -> Option<Thrust>;
}

/// Straight-line planner with angular obstacle correction.
#[derive(Debug, Clone, Copy, Default)]
pub struct Navigator {
    /// Planner settings.
    config: NavigationConfig,
}

impl Navigator {
    /// Create a navigator with the given settings.
    #[must_use]
    pub const fn new(config: NavigationConfig) -> Self {
        Self { config }
    }

    /// Whether anything blocks the straight segment from `unit` to `end`.
    fn blocked(&self, world: &WorldView, unit: &Unit, end: Position, avoid_units: bool) -> bool {
        let fudge = self.config.unit_radius + OBSTACLE_MARGIN;
        let start = unit.position;

        let node_hit = world
            .nodes()
            .iter()
            .any(|node| segment_intersects_circle(start, end, node.position, node.radius, fudge));
        if node_hit {
            return true;
        }

        avoid_units
            && world.units().iter().any(|other| {
                other.id != unit.id
                    && segment_intersects_circle(
                        start,
                        end,
                        other.position,
                        self.config.unit_radius,
                        fudge,
                    )
            })
    }
}

impl MotionPlanner for Navigator {
    fn can_claim(&self, unit: &Unit, node: &ResourceNode) -> bool {
        unit.position.distance_to(node.position)
            <= node.radius + self.config.claim_radius + self.config.unit_radius
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn navigate(
        &self,
        world: &WorldView,
        unit: &Unit,
        destination: Position,
        profile: &MoveProfile,
    ) -> Option<Thrust> {
        let distance = unit.position.distance_to(destination);
        let mut angle = unit.position.angle_to(destination);
        let mut probe = destination;
        let mut corrections = 0;

        while self.blocked(world, unit, probe, profile.avoid_units) {
            if corrections >= self.config.max_corrections {
                return None;
            }
            corrections += 1;
            angle += self.config.angular_step;
            probe = unit.position.offset(angle, distance);
        }

        // Truncate like the engine does; a zero thrust is no move at all.
        let magnitude = profile.speed.min(distance).floor() as u32;
        if magnitude == 0 {
            return None;
        }

        Some(Thrust {
            magnitude,
            angle: (angle.round() as u32) % 360,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ME: u32 = 1;

    fn world(units: Vec<Unit>, nodes: Vec<ResourceNode>) -> WorldView {
        WorldView::new(ME, (100, 100), vec![ME, 2], units, nodes)
    }

    fn fast(avoid_units: bool) -> MoveProfile {
        MoveProfile::new(7.0, 0.0, avoid_units)
    }

    #[test]
    fn test_can_claim_boundary() {
        let nav = Navigator::default();
        let node = ResourceNode::new(0, Position::new(10.0, 0.0), 3.0, 2);

        // 3.0 radius + 4.0 claim + 0.5 unit = 7.5
        assert!(nav.can_claim(&Unit::new(1, ME, Position::new(2.5, 0.0)), &node));
        assert!(!nav.can_claim(&Unit::new(1, ME, Position::new(2.4, 0.0)), &node));
    }

    #[test]
    fn test_clear_path_goes_straight() {
        let unit = Unit::new(1, ME, Position::new(0.0, 0.0));
        let world = world(vec![unit], vec![]);
        let nav = Navigator::default();

        let thrust = nav.navigate(&world, &unit, Position::new(0.0, 20.0), &fast(false));
        assert_eq!(thrust, Some(Thrust { magnitude: 7, angle: 90 }));
    }

    #[test]
    fn test_short_hop_is_truncated() {
        let unit = Unit::new(1, ME, Position::new(0.0, 0.0));
        let world = world(vec![unit], vec![]);
        let nav = Navigator::default();

        let thrust = nav.navigate(&world, &unit, Position::new(3.9, 0.0), &fast(false));
        assert_eq!(thrust, Some(Thrust { magnitude: 3, angle: 0 }));
    }

    #[test]
    fn test_already_there_is_infeasible() {
        let unit = Unit::new(1, ME, Position::new(5.0, 5.0));
        let world = world(vec![unit], vec![]);
        let nav = Navigator::default();

        assert!(nav.navigate(&world, &unit, Position::new(5.4, 5.0), &fast(false)).is_none());
    }

    #[test]
    fn test_node_forces_deflection() {
        let unit = Unit::new(1, ME, Position::new(0.0, 0.0));
        let node = ResourceNode::new(0, Position::new(10.0, 0.0), 2.0, 2);
        let world = world(vec![unit], vec![node]);
        let nav = Navigator::default();

        let thrust = nav
            .navigate(&world, &unit, Position::new(20.0, 0.0), &fast(false))
            .unwrap();
        assert_eq!(thrust.magnitude, 7);
        assert!(thrust.angle > 0 && thrust.angle < 90, "angle {}", thrust.angle);
    }

    #[test]
    fn test_units_ignored_unless_avoiding() {
        let unit = Unit::new(1, ME, Position::new(0.0, 0.0));
        let blocker = Unit::new(2, ME, Position::new(5.0, 0.0));
        let world = world(vec![unit, blocker], vec![]);
        let nav = Navigator::default();
        let destination = Position::new(20.0, 0.0);

        let ignoring = nav.navigate(&world, &unit, destination, &fast(false)).unwrap();
        assert_eq!(ignoring.angle, 0);

        let avoiding = nav.navigate(&world, &unit, destination, &fast(true)).unwrap();
        assert_ne!(avoiding.angle, 0);
    }

    #[test]
    fn test_gives_up_after_max_corrections() {
        let unit = Unit::new(1, ME, Position::new(0.0, 0.0));
        let node = ResourceNode::new(0, Position::new(10.0, 0.0), 5.0, 2);
        let world = world(vec![unit], vec![node]);
        let nav = Navigator::new(NavigationConfig {
            max_corrections: 3,
            ..NavigationConfig::default()
        });

        assert!(nav.navigate(&world, &unit, Position::new(20.0, 0.0), &fast(false)).is_none());
    }
}

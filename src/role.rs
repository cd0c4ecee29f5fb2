//! Per-turn role assignment.

use serde::Serialize;

use crate::world::Unit;

/// Behaviour a unit follows for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    /// Gather: claim the nearest mineable resource node.
    Economic,
    /// Fight: hunt the nearest enemy, preferring engaged ones.
    Military,
}

/// Assign a role from the unit's identity alone.
///
/// One unit in three (`id % 3 == 2`) is military; the rest gather.
#[must_use]
pub const fn classify(unit: &Unit) -> Role {
    if unit.id % 3 == 2 {
        Role::Military
    } else {
        Role::Economic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Position;

    #[test]
    fn test_one_in_three_is_military() {
        let roles: Vec<_> = (0..6)
            .map(|id| classify(&Unit::new(id, 1, Position::default())))
            .collect();
        assert_eq!(
            roles,
            vec![
                Role::Economic,
                Role::Economic,
                Role::Military,
                Role::Economic,
                Role::Economic,
                Role::Military,
            ]
        );
    }

    #[test]
    fn test_position_and_owner_do_not_matter() {
        let a = Unit::new(8, 1, Position::new(0.0, 0.0));
        let b = Unit::new(8, 3, Position::new(90.0, 12.0));
        assert_eq!(classify(&a), classify(&b));
        assert_eq!(classify(&a), Role::Military);
    }
}

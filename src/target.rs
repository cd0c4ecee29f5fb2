//! Target selection with role escalation.
//!
//! Economic units look for the nearest mineable resource node. When none
//! exists they fight for the turn instead. Military units pick the nearest
//! enemy that is claiming or has claimed a node, and fall back to the nearest
//! enemy of any status. Ranking order comes from [`ProximityIndex`] and is
//! never re-sorted here.

use tracing::trace;

use crate::proximity::ProximityIndex;
use crate::role::Role;
use crate::world::{PlayerId, ResourceNode, Unit};

/// A chosen target together with the role actually used to reach it.
#[derive(Debug, Clone, Copy)]
pub enum Selection<'a> {
    /// Claim (or approach) a resource node.
    Economic(&'a ResourceNode),
    /// Attack an enemy unit.
    Military {
        /// The enemy.
        target: &'a Unit,
        /// Whether the enemy is claiming or has claimed a node.
        engaged: bool,
    },
}

impl Selection<'_> {
    /// The role used for the selection (after any escalation).
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Selection::Economic(_) => Role::Economic,
            Selection::Military { .. } => Role::Military,
        }
    }
}

/// Picks one target per unit for the acting player.
#[derive(Debug, Clone, Copy)]
pub struct TargetSelector<'a> {
    /// Distance ranking over the current snapshot.
    index: ProximityIndex<'a>,
    /// The acting player.
    me: PlayerId,
}

impl<'a> TargetSelector<'a> {
    /// Create a selector acting for `me`.
    #[must_use]
    pub const fn new(index: ProximityIndex<'a>, me: PlayerId) -> Self {
        Self { index, me }
    }

    /// Select a target for `unit` starting from `role`.
    ///
    /// Returns `None` when no candidate qualifies even after escalation.
    #[must_use]
    pub fn select(&self, unit: &Unit, role: Role) -> Option<Selection<'a>> {
        match role {
            Role::Economic => self.economic(unit).or_else(|| {
                trace!(unit = unit.id, "no mineable node, escalating to military");
                self.military(unit)
            }),
            Role::Military => self.military(unit),
        }
    }

    /// Nearest node that is unowned, or ours and not full.
    fn economic(&self, unit: &Unit) -> Option<Selection<'a>> {
        self.index
            .nearby_nodes(unit)
            .into_iter()
            .map(|ranked| ranked.entity)
            .find(|node| node.is_mineable_by(self.me))
            .map(Selection::Economic)
    }

    /// Nearest engaged enemy, else nearest enemy.
    fn military(&self, unit: &Unit) -> Option<Selection<'a>> {
        let enemies: Vec<&'a Unit> = self
            .index
            .nearby_units(unit)
            .into_iter()
            .map(|ranked| ranked.entity)
            .filter(|other| other.owner != self.me)
            .collect();

        let target = enemies
            .iter()
            .find(|enemy| enemy.status.is_engaged())
            .or_else(|| enemies.first())
            .copied()?;

        Some(Selection::Military {
            target,
            engaged: target.status.is_engaged(),
        })
    }
}

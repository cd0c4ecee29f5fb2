//! Units, resource nodes and their identifiers.

use serde::Serialize;

use crate::geometry::Position;

/// Unique identifier for a player.
pub type PlayerId = u32;

/// Identifier of a unit, stable for the whole game.
pub type UnitId = u32;

/// Identifier of a resource node, stable for the whole game.
pub type NodeId = u32;

/// Docking state of a unit, owned and advanced by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ClaimStatus {
    /// Free to move.
    #[default]
    Unclaimed,
    /// Attaching to a node; completes over several turns.
    Claiming,
    /// Attached to a node and producing.
    Claimed,
}

impl ClaimStatus {
    /// Whether the unit is committed to a node (claiming or claimed).
    #[must_use]
    pub const fn is_engaged(self) -> bool {
        !matches!(self, ClaimStatus::Unclaimed)
    }
}

/// A mobile unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    /// Unit identifier.
    pub id: UnitId,
    /// Owning player.
    pub owner: PlayerId,
    /// Center of the unit.
    pub position: Position,
    /// Remaining health.
    pub health: u32,
    /// Docking state.
    pub status: ClaimStatus,
    /// Node the unit is attached to (only while engaged).
    pub claimed_node: Option<NodeId>,
}

impl Unit {
    /// Create a free-moving unit with full health.
    #[must_use]
    pub const fn new(id: UnitId, owner: PlayerId, position: Position) -> Self {
        Self {
            id,
            owner,
            position,
            health: 255,
            status: ClaimStatus::Unclaimed,
            claimed_node: None,
        }
    }

    /// Attach this unit to `node` with the given status.
    #[must_use]
    pub const fn claiming(mut self, status: ClaimStatus, node: NodeId) -> Self {
        self.status = status;
        self.claimed_node = if status.is_engaged() { Some(node) } else { None };
        self
    }
}

/// A capturable, capacity-limited resource node.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceNode {
    /// Node identifier.
    pub id: NodeId,
    /// Center of the node.
    pub position: Position,
    /// Radius of the node.
    pub radius: f64,
    /// Remaining health.
    pub health: u32,
    /// Owning player (None = unowned).
    pub owner: Option<PlayerId>,
    /// Maximum number of attached units.
    pub capacity: u32,
    /// Units currently attached.
    pub occupants: Vec<UnitId>,
}

impl ResourceNode {
    /// Create an unowned, empty node.
    #[must_use]
    pub fn new(id: NodeId, position: Position, radius: f64, capacity: u32) -> Self {
        Self {
            id,
            position,
            radius,
            health: 1000,
            owner: None,
            capacity,
            occupants: Vec::new(),
        }
    }

    /// Set the owner and the attached units.
    #[must_use]
    pub fn owned_by(mut self, owner: PlayerId, occupants: Vec<UnitId>) -> Self {
        self.owner = Some(owner);
        self.occupants = occupants;
        self
    }

    /// Whether any player owns this node.
    #[must_use]
    pub const fn is_owned(&self) -> bool {
        self.owner.is_some()
    }

    /// Number of attached units.
    #[must_use]
    pub fn occupancy(&self) -> usize {
        self.occupants.len()
    }

    /// Whether no more units can attach.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.occupancy() >= self.capacity as usize
    }

    /// Whether `player` can still attach units here: unowned, or its own and not full.
    #[must_use]
    pub fn is_mineable_by(&self, player: PlayerId) -> bool {
        match self.owner {
            None => true,
            Some(owner) => owner == player && !self.is_full(),
        }
    }
}

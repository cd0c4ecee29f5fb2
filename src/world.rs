//! Read-only snapshot of one turn.
//!
//! A [`WorldView`] is rebuilt from every snapshot the engine sends and dropped
//! when the turn's orders have been written. Nothing in the decision pass
//! mutates it, so it is shared freely across worker threads.

mod entity;

pub use entity::{ClaimStatus, NodeId, PlayerId, ResourceNode, Unit, UnitId};

/// Everything visible to the bot for the current turn.
#[derive(Debug, Clone)]
pub struct WorldView {
    /// The acting player.
    me: PlayerId,
    /// Map width.
    width: u32,
    /// Map height.
    height: u32,
    /// Players in the game, ascending.
    players: Vec<PlayerId>,
    /// All units, ascending by id.
    units: Vec<Unit>,
    /// All resource nodes, ascending by id.
    nodes: Vec<ResourceNode>,
}

impl WorldView {
    /// Build a snapshot. Units, nodes and players are stored sorted by id.
    #[must_use]
    pub fn new(
        me: PlayerId,
        (width, height): (u32, u32),
        mut players: Vec<PlayerId>,
        mut units: Vec<Unit>,
        mut nodes: Vec<ResourceNode>,
    ) -> Self {
        players.sort_unstable();
        players.dedup();
        units.sort_by_key(|unit| unit.id);
        nodes.sort_by_key(|node| node.id);

        Self {
            me,
            width,
            height,
            players,
            units,
            nodes,
        }
    }

    /// The acting player.
    #[must_use]
    pub const fn me(&self) -> PlayerId {
        self.me
    }

    /// Map dimensions as `(width, height)`.
    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Every player in the game, including the acting one.
    #[must_use]
    pub fn all_players(&self) -> &[PlayerId] {
        &self.players
    }

    /// Every unit on the map.
    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Every resource node on the map.
    #[must_use]
    pub fn nodes(&self) -> &[ResourceNode] {
        &self.nodes
    }

    /// Units owned by the acting player, ascending by id.
    pub fn owned_units(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.units.iter().filter(move |unit| unit.owner == self.me)
    }

    /// Look up a unit by id.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units
            .binary_search_by_key(&id, |unit| unit.id)
            .ok()
            .map(|idx| &self.units[idx])
    }

    /// Look up a resource node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&ResourceNode> {
        self.nodes
            .binary_search_by_key(&id, |node| node.id)
            .ok()
            .map(|idx| &self.nodes[idx])
    }
}

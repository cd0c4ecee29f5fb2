//! Distance ranking of map entities around a unit.
//!
//! Every ranking is total: ascending center-to-center distance, ties broken by
//! ascending entity id. Nothing is filtered out here, not even the unit doing
//! the asking; callers filter the ranked sequence themselves.

use crate::geometry::Position;
use crate::world::{ResourceNode, Unit, WorldView};

/// Kind of entity to rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Mobile units of any owner.
    Unit,
    /// Resource nodes.
    ResourceNode,
}

/// A borrowed entity of either category.
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    /// A unit.
    Unit(&'a Unit),
    /// A resource node.
    Node(&'a ResourceNode),
}

impl EntityRef<'_> {
    /// Identifier within the entity's own category.
    #[must_use]
    pub const fn id(&self) -> u32 {
        match self {
            EntityRef::Unit(unit) => unit.id,
            EntityRef::Node(node) => node.id,
        }
    }
}

/// An entity together with its distance from the ranking origin.
#[derive(Debug, Clone, Copy)]
pub struct Ranked<T> {
    /// Distance from the origin unit.
    pub distance: f64,
    /// The ranked entity.
    pub entity: T,
}

/// Ranks snapshot entities by distance from a given unit.
#[derive(Debug, Clone, Copy)]
pub struct ProximityIndex<'a> {
    /// Snapshot being ranked.
    world: &'a WorldView,
}

impl<'a> ProximityIndex<'a> {
    /// Create an index over a snapshot.
    #[must_use]
    pub const fn new(world: &'a WorldView) -> Self {
        Self { world }
    }

    /// All entities of `category`, nearest to `from` first.
    #[must_use]
    pub fn nearby(&self, from: &Unit, category: Category) -> Vec<Ranked<EntityRef<'a>>> {
        match category {
            Category::Unit => self
                .nearby_units(from)
                .into_iter()
                .map(|r| Ranked {
                    distance: r.distance,
                    entity: EntityRef::Unit(r.entity),
                })
                .collect(),
            Category::ResourceNode => self
                .nearby_nodes(from)
                .into_iter()
                .map(|r| Ranked {
                    distance: r.distance,
                    entity: EntityRef::Node(r.entity),
                })
                .collect(),
        }
    }

    /// All units, nearest to `from` first.
    #[must_use]
    pub fn nearby_units(&self, from: &Unit) -> Vec<Ranked<&'a Unit>> {
        rank(from, self.world.units(), |unit| (unit.id, unit.position))
    }

    /// All resource nodes, nearest to `from` first.
    #[must_use]
    pub fn nearby_nodes(&self, from: &Unit) -> Vec<Ranked<&'a ResourceNode>> {
        rank(from, self.world.nodes(), |node| (node.id, node.position))
    }
}

/// Rank `entities` around `from` by distance, then id.
fn rank<'a, T>(
    from: &Unit,
    entities: &'a [T],
    key: impl Fn(&T) -> (u32, Position),
) -> Vec<Ranked<&'a T>> {
    let mut ranked: Vec<(u32, Ranked<&'a T>)> = entities
        .iter()
        .map(|entity| {
            let (id, position) = key(entity);
            let ranked = Ranked {
                distance: from.position.distance_to(position),
                entity,
            };
            (id, ranked)
        })
        .collect();

    ranked.sort_by(|(id_a, a), (id_b, b)| {
        a.distance.total_cmp(&b.distance).then(id_a.cmp(id_b))
    });

    ranked.into_iter().map(|(_, r)| r).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_world() -> WorldView {
        let units = vec![
            Unit::new(0, 1, Position::new(0.0, 0.0)),
            Unit::new(4, 2, Position::new(5.0, 0.0)),
            Unit::new(2, 2, Position::new(0.0, 5.0)),
            Unit::new(9, 2, Position::new(1.0, 1.0)),
        ];
        let nodes = vec![
            ResourceNode::new(3, Position::new(20.0, 0.0), 3.0, 2),
            ResourceNode::new(1, Position::new(0.0, -10.0), 3.0, 2),
        ];
        WorldView::new(1, (100, 100), vec![1, 2], units, nodes)
    }

    #[test]
    fn test_units_include_self_first() {
        let world = create_test_world();
        let index = ProximityIndex::new(&world);
        let me = world.units()[0];

        let ids: Vec<_> = index.nearby_units(&me).iter().map(|r| r.entity.id).collect();
        assert_eq!(ids, vec![0, 9, 2, 4]);
    }

    #[test]
    fn test_equal_distance_breaks_on_id() {
        let world = create_test_world();
        let index = ProximityIndex::new(&world);
        let me = world.units()[0];

        // Units 2 and 4 are both 5.0 away.
        let ranked = index.nearby_units(&me);
        assert!((ranked[2].distance - ranked[3].distance).abs() < 1e-12);
        assert!(ranked[2].entity.id < ranked[3].entity.id);
    }

    #[test]
    fn test_nodes_by_distance() {
        let world = create_test_world();
        let index = ProximityIndex::new(&world);
        let me = world.units()[0];

        let ranked = index.nearby(&me, Category::ResourceNode);
        let ids: Vec<_> = ranked.iter().map(|r| r.entity.id()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(ranked.iter().all(|r| matches!(r.entity, EntityRef::Node(_))));
    }

    #[test]
    fn test_category_unit_wraps_units() {
        let world = create_test_world();
        let index = ProximityIndex::new(&world);
        let me = world.units()[0];

        let ranked = index.nearby(&me, Category::Unit);
        assert_eq!(ranked.len(), world.units().len());
        assert!(ranked.iter().all(|r| matches!(r.entity, EntityRef::Unit(_))));
    }
}

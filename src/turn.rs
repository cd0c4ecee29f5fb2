//! One decision pass over every owned unit.
//!
//! Units are decided independently against the same immutable snapshot, so the
//! pass runs on the rayon pool when configured to. Orders are re-sorted by unit
//! id afterwards, making the batch independent of scheduling.
//!
//! The deadline is checked before each unit is started. Units that have not
//! started when it passes are skipped; orders already built are kept.

use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::config::BotConfig;
use crate::navigation::MotionPlanner;
use crate::order::{Order, OrderBuilder};
use crate::proximity::ProximityIndex;
use crate::role::classify;
use crate::target::TargetSelector;
use crate::world::{Unit, WorldView};

/// Counters describing one decision pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnStats {
    /// Owned units in the snapshot.
    pub owned: usize,
    /// Owned units skipped because they are claiming or have claimed a node.
    pub busy: usize,
    /// Units that were decided but produced no order.
    pub idle: usize,
    /// Units never started because the deadline had passed.
    pub timed_out: usize,
}

/// Orders produced by one pass, with its counters.
#[derive(Debug, Clone, Default)]
pub struct TurnOutcome {
    /// Orders sorted by unit id, at most one per unit.
    pub orders: Vec<Order>,
    /// Pass counters.
    pub stats: TurnStats,
}

/// Result of deciding a single unit.
#[derive(Debug, Clone, Copy)]
enum Decision {
    /// The unit acts.
    Act(Order),
    /// No target or no feasible move.
    Idle,
    /// Not started before the deadline.
    TimedOut,
}

/// Runs the per-unit pipeline (classify, select, build) over a snapshot.
#[derive(Debug, Clone)]
pub struct TurnController<P> {
    /// Converts selections into orders.
    builder: OrderBuilder<P>,
    /// Decide units on the rayon pool.
    parallel: bool,
    /// Time budget per turn.
    budget: Duration,
}

impl<P: MotionPlanner + Sync> TurnController<P> {
    /// Create a controller from a planner and configuration.
    #[must_use]
    pub fn new(planner: P, config: &BotConfig) -> Self {
        Self {
            builder: OrderBuilder::new(planner, config),
            parallel: config.parallel,
            budget: config.turn_deadline(),
        }
    }

    /// Decide every owned unit, with the deadline counted from `started`.
    #[must_use]
    pub fn run_turn(&self, world: &WorldView, started: Instant) -> TurnOutcome {
        self.run_turn_until(world, started + self.budget)
    }

    /// Decide every owned unit, skipping those not started by `deadline`.
    #[must_use]
    pub fn run_turn_until(&self, world: &WorldView, deadline: Instant) -> TurnOutcome {
        let owned: Vec<&Unit> = world.owned_units().collect();
        let free: Vec<&Unit> = owned
            .iter()
            .copied()
            .filter(|unit| !unit.status.is_engaged())
            .collect();

        let selector = TargetSelector::new(ProximityIndex::new(world), world.me());
        let decide = |unit: &Unit| {
            if Instant::now() >= deadline {
                return Decision::TimedOut;
            }
            self.decide(world, &selector, unit)
                .map_or(Decision::Idle, Decision::Act)
        };

        let decisions: Vec<Decision> = if self.parallel {
            free.par_iter().map(|&unit| decide(unit)).collect()
        } else {
            free.iter().map(|&unit| decide(unit)).collect()
        };

        let mut stats = TurnStats {
            owned: owned.len(),
            busy: owned.len() - free.len(),
            ..TurnStats::default()
        };
        let mut orders = Vec::with_capacity(decisions.len());
        for decision in decisions {
            match decision {
                Decision::Act(order) => orders.push(order),
                Decision::Idle => stats.idle += 1,
                Decision::TimedOut => stats.timed_out += 1,
            }
        }
        orders.sort_by_key(|order| order.unit);

        debug!(
            orders = orders.len(),
            owned = stats.owned,
            busy = stats.busy,
            idle = stats.idle,
            timed_out = stats.timed_out,
            "turn decided"
        );

        TurnOutcome { orders, stats }
    }

    /// Classify, select and build for one free unit.
    fn decide(&self, world: &WorldView, selector: &TargetSelector<'_>, unit: &Unit) -> Option<Order> {
        let role = classify(unit);
        let Some(selection) = selector.select(unit, role) else {
            trace!(unit = unit.id, ?role, "no target");
            return None;
        };

        let order = self.builder.build(world, unit, &selection);
        trace!(
            unit = unit.id,
            ?role,
            used = ?selection.role(),
            ordered = order.is_some(),
            "unit decided"
        );
        order
    }
}

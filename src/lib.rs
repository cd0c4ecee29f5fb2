// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Settler: a per-turn decision engine for Halite II style bots.
//!
//! Every turn the engine sends a snapshot of the map. Each owned unit that is
//! free to act gets a role, a target and at most one order:
//! - Economic units claim the nearest resource node they can still attach to
//! - Military units attack the nearest enemy, preferring ones attached to a node
//! - Economic units with nothing to claim fight for the turn instead
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Transport (stdin/stdout, codec)   │
//! ├─────────────────────────────────────┤
//! │   Session → TurnController          │
//! ├─────────────────────────────────────┤
//! │   Role → Target → Order             │
//! ├─────────────────────────────────────┤
//! │   ProximityIndex / Navigator        │
//! ├─────────────────────────────────────┤
//! │   WorldView (immutable snapshot)    │
//! └─────────────────────────────────────┘
//! ```

pub mod config;
pub mod geometry;
pub mod navigation;
pub mod order;
pub mod protocol;
pub mod proximity;
pub mod role;
pub mod session;
pub mod target;
pub mod turn;
pub mod world;

pub use config::{BotConfig, ConfigError, MoveProfile, NavigationConfig};
pub use geometry::Position;
pub use navigation::{MotionPlanner, Navigator, Thrust};
pub use order::{Action, Order, OrderBuilder};
pub use protocol::ProtocolError;
pub use role::{Role, classify};
pub use session::{Ruleset, Session};
pub use target::{Selection, TargetSelector};
pub use turn::{TurnController, TurnOutcome, TurnStats};
pub use world::{ClaimStatus, NodeId, PlayerId, ResourceNode, Unit, UnitId, WorldView};

//! Process-lifetime game session.
//!
//! A [`Session`] is built once, right after the engine handshake, and is
//! borrowed by every turn until the engine closes the stream.

use std::time::Instant;

use tracing::{debug, info};

use crate::config::BotConfig;
use crate::navigation::Navigator;
use crate::turn::{TurnController, TurnOutcome};
use crate::world::{PlayerId, WorldView};

/// Rules applied for a given number of competitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ruleset {
    /// Exactly two players.
    Duel,
    /// Three or more players.
    FreeForAll,
}

impl Ruleset {
    /// Pick the ruleset for a game with `players` competitors.
    #[must_use]
    pub const fn for_players(players: usize) -> Self {
        if players == 2 {
            Ruleset::Duel
        } else {
            Ruleset::FreeForAll
        }
    }
}

/// State that lives for the whole game.
#[derive(Debug)]
pub struct Session {
    /// The acting player.
    player: PlayerId,
    /// Map dimensions announced at the handshake.
    map_size: (u32, u32),
    /// Active configuration.
    config: BotConfig,
    /// Per-turn decision pass.
    controller: TurnController<Navigator>,
    /// Turns played so far.
    turns: u32,
}

impl Session {
    /// Create a session for `player` on a map of `map_size`.
    #[must_use]
    pub fn new(player: PlayerId, map_size: (u32, u32), config: BotConfig) -> Self {
        let controller = TurnController::new(Navigator::new(config.navigation), &config);
        info!(
            player,
            width = map_size.0,
            height = map_size.1,
            name = %config.name,
            "session started"
        );

        Self {
            player,
            map_size,
            config,
            controller,
            turns: 0,
        }
    }

    /// The acting player.
    #[must_use]
    pub const fn player(&self) -> PlayerId {
        self.player
    }

    /// Map dimensions as `(width, height)`.
    #[must_use]
    pub const fn map_size(&self) -> (u32, u32) {
        self.map_size
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Number of turns played.
    #[must_use]
    pub const fn turns(&self) -> u32 {
        self.turns
    }

    /// Decide one turn. The deadline is counted from `received`.
    pub fn play_turn(&mut self, world: &WorldView, received: Instant) -> TurnOutcome {
        let ruleset = Ruleset::for_players(world.all_players().len());
        debug!(turn = self.turns, ?ruleset, players = world.all_players().len(), "turn start");

        let outcome = match ruleset {
            Ruleset::Duel => self.duel(world, received),
            Ruleset::FreeForAll => self.free_for_all(world, received),
        };

        if outcome.stats.timed_out > 0 {
            info!(
                turn = self.turns,
                timed_out = outcome.stats.timed_out,
                submitted = outcome.orders.len(),
                "deadline reached, submitting partial turn"
            );
        }
        self.turns += 1;
        outcome
    }

    /// Two-player rules.
    fn duel(&self, world: &WorldView, received: Instant) -> TurnOutcome {
        self.controller.run_turn(world, received)
    }

    /// Multi-player rules. These currently reuse the two-player rules.
    fn free_for_all(&self, world: &WorldView, received: Instant) -> TurnOutcome {
        self.duel(world, received)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        info!(player = self.player, turns = self.turns, "session ended");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Position;
    use crate::world::{ResourceNode, Unit};

    fn create_test_world(players: Vec<PlayerId>) -> WorldView {
        let units = vec![
            Unit::new(0, 1, Position::new(10.0, 10.0)),
            Unit::new(1, 1, Position::new(10.0, 20.0)),
            Unit::new(2, 1, Position::new(20.0, 10.0)),
            Unit::new(3, 2, Position::new(90.0, 90.0)),
        ];
        let nodes = vec![ResourceNode::new(0, Position::new(40.0, 40.0), 5.0, 3)];
        WorldView::new(1, (120, 120), players, units, nodes)
    }

    #[test]
    fn test_ruleset_by_player_count() {
        assert_eq!(Ruleset::for_players(2), Ruleset::Duel);
        assert_eq!(Ruleset::for_players(3), Ruleset::FreeForAll);
        assert_eq!(Ruleset::for_players(4), Ruleset::FreeForAll);
    }

    #[test]
    fn test_free_for_all_matches_duel() {
        let mut session = Session::new(1, (120, 120), BotConfig::default());
        let received = Instant::now();

        let duel = session.play_turn(&create_test_world(vec![1, 2]), received);
        let ffa = session.play_turn(&create_test_world(vec![1, 2, 3, 4]), received);

        assert!(!duel.orders.is_empty());
        assert_eq!(duel.orders, ffa.orders);
        assert_eq!(session.turns(), 2);
    }

    #[test]
    fn test_accessors() {
        let session = Session::new(3, (240, 160), BotConfig::default());
        assert_eq!(session.player(), 3);
        assert_eq!(session.map_size(), (240, 160));
        assert_eq!(session.config().name, "settler");
        assert_eq!(session.turns(), 0);
    }
}

//! Player trait and associated types for game participants.
//!
//! This module provides the core abstraction for entities that can provide
//! moves. Different player types (console human, random mover, negamax agent)
//! implement the `Player` trait and are driven by the
//! [`Orchestrator`](crate::orchestrator::Orchestrator).
//!
//! The trait focuses on **behavior** rather than construction: each
//! implementation provides its own constructor tailored to what it needs
//! (an input stream, an RNG seed, an engine configuration).
//!
//! `get_move()` is synchronous. A human player blocks on console input and
//! the agent blocks for the duration of its search.

use crate::game_repr::{Cell, Position, Side};

/// Result of a completed game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// The player completed a line (or the agent resigned)
    PlayerWins,
    /// The agent completed a line (or the player resigned)
    AgentWins,
    /// Board full with no line
    Draw,
}

impl GameResult {
    /// Create a GameResult from the winning side
    pub fn from_winner(winner: Side) -> Self {
        match winner {
            Side::Player => GameResult::PlayerWins,
            Side::Agent => GameResult::AgentWins,
        }
    }

    /// Result of a finished position, `None` while the game goes on
    pub fn of_position(pos: &Position) -> Option<Self> {
        match pos.winner() {
            Some(side) => Some(Self::from_winner(side)),
            None if pos.is_full() => Some(GameResult::Draw),
            None => None,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self {
            GameResult::PlayerWins => Some(Side::Player),
            GameResult::AgentWins => Some(Side::Agent),
            GameResult::Draw => None,
        }
    }

    /// Line printed at the end of a game
    pub fn message(&self) -> &'static str {
        match self {
            GameResult::PlayerWins => "Player wins",
            GameResult::AgentWins => "Agent wins",
            GameResult::Draw => "Game is drawn",
        }
    }
}

/// Trait for entities that can provide moves.
///
/// Only `get_move()` must be implemented. All other methods have default
/// implementations that can be overridden as needed.
pub trait Player {
    /// Request the next move from this player.
    ///
    /// # Returns
    ///
    /// * `Some(cell)` - The chosen cell. The orchestrator validates it.
    /// * `None` - The player resigns (or its input ran out)
    fn get_move(&mut self, position: &Position, side: Side) -> Option<Cell>;

    /// Notification that the opponent played `cell`
    fn opponent_moved(&mut self, _cell: Cell) {}

    /// Notification that the game has ended
    fn game_ended(&mut self, _result: GameResult) {}

    /// Display name of this player
    fn name(&self) -> &str {
        "Player"
    }

    /// True for players driven by a person; search timing is only reported
    /// for the others.
    fn is_interactive(&self) -> bool {
        false
    }
}

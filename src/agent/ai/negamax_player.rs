//! NegamaxPlayer - the unbeatable tic-tac-toe agent
//!
//! Implements the [`Player`] trait on top of a [`SearchEngine`]. Every
//! request runs a full-depth search from the current position. The engine,
//! and with it the transposition table, lives as long as the player, so
//! positions explored on earlier turns are answered from the table later in
//! the game.
//!
//! # Examples
//!
//! ```
//! use tictactoe_engine::agent::{NegamaxPlayer, Player};
//! use tictactoe_engine::config::EngineConfig;
//! use tictactoe_engine::game_repr::{Position, Side};
//!
//! let mut agent = NegamaxPlayer::new(&EngineConfig::default(), "Agent").unwrap();
//! let pos: Position = "PP. .A. ...".parse().unwrap();
//! assert_eq!(agent.get_move(&pos, Side::Agent), Some(2));
//! ```

use super::negamax::SearchEngine;
use super::search::SearchResult;
use crate::agent::player::{GameResult, Player};
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::game_repr::{Cell, Position, Side};

/// AI Player that uses the Negamax search with alpha-beta pruning
pub struct NegamaxPlayer {
    engine: SearchEngine,

    /// Display name for this AI player
    name: String,

    /// Statistics of the most recent search
    last_search: Option<SearchResult>,
}

impl NegamaxPlayer {
    /// Create a new NegamaxPlayer from an engine configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Table capacity, table on/off and Zobrist seed
    /// * `name` - Display name for this player
    pub fn new(config: &EngineConfig, name: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self::with_engine(SearchEngine::new(config)?, name))
    }

    pub fn with_engine(engine: SearchEngine, name: impl Into<String>) -> Self {
        Self {
            engine,
            name: name.into(),
            last_search: None,
        }
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    pub fn last_search(&self) -> Option<&SearchResult> {
        self.last_search.as_ref()
    }
}

impl Player for NegamaxPlayer {
    /// Blocks for the duration of a full-depth search.
    ///
    /// Returns `None` only when the position is already won or full.
    fn get_move(&mut self, position: &Position, side: Side) -> Option<Cell> {
        let result = self.engine.analyze(position, side);

        log::info!(
            "[{}] searched {} positions in {:?}, best move {:?} (score {})",
            self.name,
            result.nodes_searched,
            result.elapsed,
            result.best_move,
            result.score
        );

        let best_move = result.best_move;
        self.last_search = Some(result);
        best_move
    }

    fn game_ended(&mut self, result: GameResult) {
        if let Some(table) = self.engine.table() {
            log::debug!(
                "[{}] game over ({}), table holds {} entries, hit rate {:.1}%",
                self.name,
                result.message(),
                table.occupied(),
                table.hit_rate() * 100.0
            );
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

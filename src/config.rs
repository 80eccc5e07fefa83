//! Engine and game configuration.
//!
//! The binary builds a [`GameConfig`] from its command line; tests and
//! library users construct these directly.

use crate::agent::ai::transposition_table::{validate_capacity, TranspositionTable};
use crate::error::ConfigError;
use crate::game_repr::Side;

/// Settings for one [`SearchEngine`](crate::agent::ai::SearchEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Transposition table index mask, `2^n - 1`
    pub tt_capacity: usize,
    /// Search without a transposition table when false
    pub use_transposition_table: bool,
    /// Seed for the Zobrist keys. `None` shares the process-wide keys.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tt_capacity: TranspositionTable::DEFAULT_CAPACITY,
            use_transposition_table: true,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn without_table() -> Self {
        Self {
            use_transposition_table: false,
            ..Self::default()
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.use_transposition_table {
            validate_capacity(self.tt_capacity)?;
        }
        Ok(())
    }
}

/// Who sits in the player's seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerConfig {
    /// Moves typed at the console
    Human,
    /// Uniformly random legal moves
    Random { seed: Option<u64> },
    /// A second negamax engine
    Negamax { engine: EngineConfig },
}

/// Complete game configuration.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Side that moves first; it is drawn as X
    pub first: Side,
    /// Configuration for the player's seat
    pub player: PlayerConfig,
    /// Configuration for the agent's engine
    pub agent: EngineConfig,
    /// Print search time after every non-interactive move
    pub show_timing: bool,
}

impl GameConfig {
    /// Human at the console against the agent.
    ///
    /// # Arguments
    /// * `first` - The side that opens the game
    pub fn human_vs_agent(first: Side) -> Self {
        Self {
            first,
            player: PlayerConfig::Human,
            agent: EngineConfig::default(),
            show_timing: true,
        }
    }

    pub fn random_vs_agent(first: Side, seed: Option<u64>) -> Self {
        Self {
            first,
            player: PlayerConfig::Random { seed },
            agent: EngineConfig::default(),
            show_timing: false,
        }
    }

    pub fn agent_vs_agent(first: Side) -> Self {
        Self {
            first,
            player: PlayerConfig::Negamax {
                engine: EngineConfig::default(),
            },
            agent: EngineConfig::default(),
            show_timing: false,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.agent.validate()?;
        if let PlayerConfig::Negamax { engine } = &self.player {
            engine.validate()?;
        }
        Ok(())
    }
}

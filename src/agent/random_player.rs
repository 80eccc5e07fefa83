//! Player that picks a uniformly random open cell.
//!
//! Used as a sparring partner for the agent and in tests.

use crate::agent::player::Player;
use crate::game_repr::{Cell, Position, Side};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;

pub struct RandomPlayer {
    rng: StdRng,
    name: String,
}

impl RandomPlayer {
    /// Seeded players replay the same game for the same opponent moves
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            name: "Random".to_string(),
        }
    }
}

impl Player for RandomPlayer {
    fn get_move(&mut self, position: &Position, _side: Side) -> Option<Cell> {
        if position.is_terminal() {
            return None;
        }
        position.open_cells().choose(&mut self.rng)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

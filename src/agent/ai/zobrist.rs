use crate::game_repr::bitboards::pop_lsb;
use crate::game_repr::{Cell, Position, Side, CELL_COUNT};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Zobrist keys for tic-tac-toe positions
///
/// One random 64-bit number per (side, cell), plus one for the agent being on
/// move. The hash of a position is the XOR of the keys of its occupied cells,
/// so placing or removing a marker is a single XOR and doing it twice restores
/// the previous hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZobristKeys {
    /// [side][cell] - 2 sides * 9 cells
    markers: [[u64; CELL_COUNT]; 2],
    /// Toggle this when it's the agent's turn
    agent_to_move: u64,
}

/// Process-wide keys, drawn from entropy the first time they are needed
static GLOBAL_KEYS: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::from_entropy);

impl ZobristKeys {
    /// Generate keys from a seeded RNG, reproducible across runs
    pub fn from_seed(seed: u64) -> Self {
        Self::generate(&mut StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::generate(&mut StdRng::from_entropy())
    }

    /// Shared key set for engines that were not given a seed
    pub fn global() -> &'static ZobristKeys {
        &GLOBAL_KEYS
    }

    fn generate<R: Rng>(rng: &mut R) -> Self {
        let mut markers = [[0u64; CELL_COUNT]; 2];
        for side in &mut markers {
            for cell in side {
                *cell = rng.gen();
            }
        }
        Self {
            markers,
            agent_to_move: rng.gen(),
        }
    }

    #[inline(always)]
    pub fn key(&self, side: Side, cell: Cell) -> u64 {
        self.markers[side.index()][cell as usize]
    }

    /// Flip the (side, cell) key in `hash`. Self-inverse.
    #[inline(always)]
    pub fn toggle(&self, hash: u64, side: Side, cell: Cell) -> u64 {
        hash ^ self.key(side, cell)
    }

    /// Flip the side-to-move key. Every move hands the turn over, so the
    /// search applies this together with each marker toggle.
    #[inline(always)]
    pub fn toggle_turn(&self, hash: u64) -> u64 {
        hash ^ self.agent_to_move
    }

    /// Search key of `pos` with `to_move` on move.
    ///
    /// Negamax values are from the mover's point of view, so the same board
    /// with the other side on move must hash differently.
    pub fn hash_to_move(&self, pos: &Position, to_move: Side) -> u64 {
        match to_move {
            Side::Player => self.hash_of(pos),
            Side::Agent => self.toggle_turn(self.hash_of(pos)),
        }
    }

    /// Hash of a position's markers computed from scratch.
    ///
    /// The search keeps its hash up to date with [`ZobristKeys::toggle`]; this
    /// is for deriving the root hash and for consistency checks.
    pub fn hash_of(&self, pos: &Position) -> u64 {
        let mut hash = 0u64;
        for side in Side::BOTH {
            let mut bb = pos.mask(side);
            while bb != 0 {
                let cell = pop_lsb(&mut bb);
                hash = self.toggle(hash, side, cell);
            }
        }
        hash
    }
}

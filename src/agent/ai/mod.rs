// AI Agent - Negamax with Alpha-Beta Pruning
//
// This module implements the unbeatable tic-tac-toe agent: an exhaustive
// Negamax search with alpha-beta pruning and a Zobrist-keyed transposition
// table.
//
// Key features:
// - Deterministic (same position and keys always give the same move)
// - Searches every line to the end of the game, no heuristic evaluation
// - Transposition table caches previously searched positions
// - All search state lives in a `SearchEngine` instance, no globals

pub mod transposition_table;
pub mod zobrist;
mod negamax;
mod search;
mod negamax_player;

pub use negamax::{SearchEngine, SearchStats, INFINITY};
pub use negamax_player::NegamaxPlayer;
pub use search::{find_best_move, find_best_move_parallel, MoveScore, SearchResult};
pub use transposition_table::{Bound, TranspositionTable, TranspositionTableEntry};
pub use zobrist::ZobristKeys;

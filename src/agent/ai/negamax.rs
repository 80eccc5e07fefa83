// Negamax Search with Alpha-Beta Pruning
//
// Negamax is a variant of the minimax algorithm that simplifies implementation
// by taking advantage of the zero-sum property of the game: max(a, b) = -min(-a, -b).
// Instead of separate maximizing and minimizing functions, we use one function
// that negates the score at each level.
//
// Tic-tac-toe is small enough to search to the end of the game from any
// position, so there is no depth limit, no heuristic evaluation and no move
// ordering beyond ascending cell index. The transposition table is consulted
// and populated at every node.
//
// The function returns the score from the perspective of the side to move.

use super::transposition_table::{Bound, TranspositionTable};
use super::zobrist::ZobristKeys;
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::game_repr::{Cell, Position, Side};

/// Bound of the search window. Larger than any reachable score (|score| <= 10)
/// and small enough that negating it never overflows.
pub const INFINITY: i32 = 1000;

/// Counters accumulated over the lifetime of an engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited by `negamax`
    pub nodes: u64,
    /// Beta cutoffs taken
    pub cutoffs: u64,
}

/// Owns all mutable search state: the Zobrist keys, the running hash and the
/// transposition table.
///
/// Separate engines share nothing, so several can search at the same time on
/// different threads. The table outlives individual searches, which lets a
/// player reuse it for the whole game.
pub struct SearchEngine {
    keys: ZobristKeys,
    table: Option<TranspositionTable>,
    /// Hash of the position currently on the search stack
    hash: u64,
    stats: SearchStats,
}

impl SearchEngine {
    /// Build an engine from a validated configuration
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let keys = match config.seed {
            Some(seed) => ZobristKeys::from_seed(seed),
            None => ZobristKeys::global().clone(),
        };
        let table = if config.use_transposition_table {
            Some(TranspositionTable::with_capacity(config.tt_capacity)?)
        } else {
            None
        };

        Ok(Self::with_parts(keys, table))
    }

    pub fn with_parts(keys: ZobristKeys, table: Option<TranspositionTable>) -> Self {
        Self {
            keys,
            table,
            hash: 0,
            stats: SearchStats::default(),
        }
    }

    pub fn keys(&self) -> &ZobristKeys {
        &self.keys
    }

    pub fn table(&self) -> Option<&TranspositionTable> {
        self.table.as_ref()
    }

    /// Forget every cached result (statistics included)
    pub fn clear_table(&mut self) {
        if let Some(table) = self.table.as_mut() {
            table.clear();
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Hash of the last searched root. Between searches the running hash is
    /// always back at the root it started from.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub(super) fn table_hits(&self) -> u64 {
        self.table.as_ref().map_or(0, |table| table.hits)
    }

    /// Negamax value of `pos` for `to_move` within `[alpha, beta]`.
    ///
    /// The running hash is derived from scratch for the root; below it the
    /// search only toggles keys.
    pub fn search(&mut self, pos: &Position, to_move: Side, alpha: i32, beta: i32) -> i32 {
        let mut work = *pos;
        let root_hash = self.set_root(&work, to_move);

        let plies = work.plies();
        let value = self.negamax(&mut work, to_move, plies, alpha, beta);

        debug_assert_eq!(self.hash, root_hash, "search left the hash modified");
        debug_assert_eq!(work, *pos, "search left the position modified");
        value
    }

    /// Derive the running hash of a new root from scratch
    pub(super) fn set_root(&mut self, pos: &Position, to_move: Side) -> u64 {
        self.hash = self.keys.hash_to_move(pos, to_move);
        self.hash
    }

    /// Place a marker, hand the turn over and update the running hash
    #[inline(always)]
    pub(super) fn make_move(&mut self, pos: &mut Position, side: Side, cell: Cell) {
        pos.place(side, cell);
        self.hash = self.keys.toggle_turn(self.keys.toggle(self.hash, side, cell));
    }

    /// Exact inverse of [`SearchEngine::make_move`]
    #[inline(always)]
    pub(super) fn unmake_move(&mut self, pos: &mut Position, side: Side, cell: Cell) {
        pos.remove(side, cell);
        self.hash = self.keys.toggle_turn(self.keys.toggle(self.hash, side, cell));
    }

    /// Negamax search with alpha-beta pruning
    ///
    /// # Arguments
    ///
    /// * `pos` - Current position (mutable for make/unmake moves)
    /// * `to_move` - Side to move; its identity selects the Zobrist keys for
    ///   the markers placed at this node
    /// * `depth` - Markers on the board at this node. Wins and losses are
    ///   worth `10 - depth`, so shallower wins score higher.
    /// * `alpha` - Lower bound (best score the side to move can guarantee)
    /// * `beta` - Upper bound (best score the opponent will allow)
    ///
    /// # Returns
    ///
    /// Score from the perspective of `to_move`. Positive is good for
    /// `to_move`, negative is good for the opponent.
    ///
    /// `self.hash` must match `pos` on entry; both are restored before
    /// returning.
    pub(crate) fn negamax(
        &mut self,
        pos: &mut Position,
        to_move: Side,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        debug_assert_eq!(depth, pos.plies());
        self.stats.nodes += 1;
        let alpha_orig = alpha;

        // Transposition table lookup
        if let Some(table) = self.table.as_mut() {
            if let Some(entry) = table.probe(self.hash) {
                // Only use the entry if it was searched to at least the same depth
                if entry.depth >= depth {
                    match entry.bound {
                        Bound::Exact => return entry.value,
                        Bound::LowerBound => alpha = alpha.max(entry.value),
                        Bound::UpperBound => beta = beta.min(entry.value),
                    }
                    if alpha >= beta {
                        return entry.value;
                    }
                }
            }
        }

        // Terminal positions. Only the side that just moved can hold a line.
        let score = pos.evaluate(to_move, depth);
        if score != 0 {
            return score;
        }
        if pos.is_full() {
            return 0;
        }

        let mut value = -INFINITY;
        for cell in pos.open_cells() {
            self.make_move(pos, to_move, cell);
            let child = -self.negamax(pos, to_move.opposite(), depth + 1, -beta, -alpha);
            self.unmake_move(pos, to_move, cell);

            value = value.max(child);
            alpha = alpha.max(value);
            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        // Classify against the window we were called with
        let bound = if value <= alpha_orig {
            Bound::UpperBound
        } else if value >= beta {
            Bound::LowerBound
        } else {
            Bound::Exact
        };
        if let Some(table) = self.table.as_mut() {
            table.store(self.hash, depth, bound, value);
        }

        value
    }
}

impl Default for SearchEngine {
    /// Process-wide keys and a table of the default capacity
    fn default() -> Self {
        Self::with_parts(ZobristKeys::global().clone(), Some(TranspositionTable::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_repr::WIN_SCORE;

    fn seeded_engine() -> SearchEngine {
        SearchEngine::new(&EngineConfig::with_seed(11)).unwrap()
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let mut engine = seeded_engine();
        let score = engine.search(&Position::new(), Side::Agent, -INFINITY, INFINITY);
        assert_eq!(score, 0, "perfect play from the empty board draws");
    }

    #[test]
    fn test_lost_position_scores_by_depth() {
        // Player already holds the bottom row; agent to move has lost at depth 5
        let pos: Position = "PPP AA. ...".parse().unwrap();
        let mut engine = seeded_engine();
        assert_eq!(engine.search(&pos, Side::Agent, -INFINITY, INFINITY), -WIN_SCORE + 5);
    }

    #[test]
    fn test_full_board_scores_zero() {
        let pos: Position = "PAP PAA APP".parse().unwrap();
        let mut engine = seeded_engine();
        assert_eq!(engine.search(&pos, Side::Agent, -INFINITY, INFINITY), 0);
        assert_eq!(engine.stats().nodes, 1);
    }

    #[test]
    fn test_win_in_one_scores_highest() {
        // Agent holds 4 and 8, cell 0 completes the diagonal at depth 5
        let pos: Position = ".P. .A. P.A".parse().unwrap();
        let mut engine = seeded_engine();
        let score = engine.search(&pos, Side::Agent, -INFINITY, INFINITY);
        assert_eq!(score, WIN_SCORE - 5);
    }

    #[test]
    fn test_search_restores_hash_and_position() {
        let pos: Position = "P.. .A. ..P".parse().unwrap();
        let mut engine = seeded_engine();
        engine.search(&pos, Side::Agent, -INFINITY, INFINITY);
        assert_eq!(engine.hash(), engine.keys().hash_to_move(&pos, Side::Agent));
    }

    #[test]
    fn test_transposition_table_usage() {
        let pos = Position::new();
        let mut engine = seeded_engine();

        // First search
        let score1 = engine.search(&pos, Side::Player, -INFINITY, INFINITY);
        let table = engine.table().unwrap();
        assert!(table.occupied() > 0, "TT should have entries after search");
        let hits_before = table.hits;
        let nodes_before = engine.stats().nodes;

        // Second search should use TT
        let score2 = engine.search(&pos, Side::Player, -INFINITY, INFINITY);
        assert!(engine.table().unwrap().hits > hits_before, "Second search should hit TT");
        assert!(engine.stats().nodes - nodes_before < nodes_before);

        // Results should be identical
        assert_eq!(score1, score2, "Scores should match");
    }

    #[test]
    fn test_table_does_not_change_values() {
        let positions = ["... ... ...", "P.. ... ...", ".P. .A. ...", "PA. .P. ..A", "AP. PA. ..."];
        for text in positions {
            let pos: Position = text.parse().unwrap();
            let to_move = if pos.plies() % 2 == 0 { Side::Player } else { Side::Agent };

            let mut with_table = seeded_engine();
            let mut without_table = SearchEngine::new(&EngineConfig::without_table()).unwrap();
            assert_eq!(
                with_table.search(&pos, to_move, -INFINITY, INFINITY),
                without_table.search(&pos, to_move, -INFINITY, INFINITY),
                "value mismatch for {}",
                text
            );
        }
    }

    #[test]
    fn test_narrow_window_bounds_the_value() {
        // True value of the empty board is 0
        let mut engine = SearchEngine::new(&EngineConfig::without_table()).unwrap();
        let fail_high = engine.search(&Position::new(), Side::Agent, -5, -1);
        assert!(fail_high >= -1);
        let fail_low = engine.search(&Position::new(), Side::Agent, 1, 5);
        assert!(fail_low <= 1);
    }

    #[test]
    fn test_alpha_beta_prunes() {
        let mut engine = SearchEngine::new(&EngineConfig::without_table()).unwrap();
        engine.search(&Position::new(), Side::Agent, -INFINITY, INFINITY);
        let stats = engine.stats();
        assert!(stats.cutoffs > 0);
        // Full minimax tree of tic-tac-toe has 549,946 nodes
        assert!(stats.nodes < 549_946);
    }

    #[test]
    fn test_tiny_table_still_correct() {
        // Capacity 1 means two slots: almost every store evicts something
        let config = EngineConfig {
            tt_capacity: 1,
            use_transposition_table: true,
            seed: Some(5),
        };
        let mut engine = SearchEngine::new(&config).unwrap();
        let pos: Position = ".P. ... ...".parse().unwrap();
        let mut reference = SearchEngine::new(&EngineConfig::without_table()).unwrap();
        assert_eq!(
            engine.search(&pos, Side::Agent, -INFINITY, INFINITY),
            reference.search(&pos, Side::Agent, -INFINITY, INFINITY)
        );
        assert!(engine.table().unwrap().collisions > 0);
    }

    #[test]
    fn test_clear_table_forgets_entries() {
        let mut engine = seeded_engine();
        engine.search(&Position::new(), Side::Agent, -INFINITY, INFINITY);
        assert!(engine.table().unwrap().occupied() > 0);

        engine.clear_table();
        let table = engine.table().unwrap();
        assert_eq!(table.occupied(), 0);
        assert_eq!(table.hits, 0);

        // Clearing an engine without a table is a no-op
        let mut plain = SearchEngine::new(&EngineConfig::without_table()).unwrap();
        plain.clear_table();
        assert!(plain.table().is_none());
    }
}

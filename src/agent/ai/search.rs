// Root move selection
//
// Drives one layer of search over every legal reply: make the move, search
// the opponent's reply with a full window, negate, unmake. Each root child is
// searched with the full window, so every reported move score is exact.

use super::negamax::{SearchEngine, SearchStats, INFINITY};
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::game_repr::{Cell, Position, Side};
use rayon::prelude::*;
use smallvec::SmallVec;
use std::time::{Duration, Instant};

/// Exact score of one root move, from the mover's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveScore {
    pub cell: Cell,
    pub score: i32,
}

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// `None` when the position is already won or full
    pub best_move: Option<Cell>,
    pub score: i32,
    /// One entry per legal move, in ascending cell order
    pub move_scores: SmallVec<[MoveScore; 9]>,
    pub nodes_searched: u64,
    pub cutoffs: u64,
    pub tt_hits: u64,
    pub elapsed: Duration,
}

impl SearchResult {
    /// Create a new search result with no move found
    pub fn new() -> Self {
        Self {
            best_move: None,
            score: 0,
            move_scores: SmallVec::new(),
            nodes_searched: 0,
            cutoffs: 0,
            tt_hits: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Result for a position with nothing left to play
    fn terminal(pos: &Position, side: Side) -> Self {
        Self {
            score: pos.evaluate(side, pos.plies()),
            ..Self::new()
        }
    }

    /// Pick the highest score; the lowest cell wins ties
    fn select_best(&mut self) {
        let mut best: Option<MoveScore> = None;
        for &candidate in &self.move_scores {
            if best.map_or(true, |b| candidate.score > b.score) {
                best = Some(candidate);
            }
        }
        if let Some(best) = best {
            self.best_move = Some(best.cell);
            self.score = best.score;
        }
    }
}

impl Default for SearchResult {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine {
    /// Score every legal move for `side` and pick the best one
    ///
    /// # Arguments
    /// * `pos` - Position to search
    /// * `side` - Side to move
    ///
    /// # Returns
    /// SearchResult containing the best move, every root move's score and
    /// search statistics. On a won or full board `best_move` is `None` and
    /// `score` is the static evaluation.
    pub fn analyze(&mut self, pos: &Position, side: Side) -> SearchResult {
        let start_time = Instant::now();

        if pos.is_terminal() {
            log::debug!("{} asked to move in finished position {}", side.name(), pos);
            return SearchResult::terminal(pos, side);
        }

        let stats_before = self.stats();
        let hits_before = self.table_hits();

        let mut result = SearchResult::new();
        let mut work = *pos;
        let root_hash = self.set_root(&work, side);
        let child_plies = work.plies() + 1;

        for cell in pos.open_cells() {
            self.make_move(&mut work, side, cell);
            let score = -self.negamax(&mut work, side.opposite(), child_plies, -INFINITY, INFINITY);
            self.unmake_move(&mut work, side, cell);

            log::trace!("{}: cell {} scores {}", side.name(), cell, score);
            result.move_scores.push(MoveScore { cell, score });
        }

        debug_assert_eq!(self.hash(), root_hash, "root search left the hash modified");
        debug_assert_eq!(work, *pos, "root search left the position modified");

        result.select_best();
        let stats = self.stats();
        result.nodes_searched = stats.nodes - stats_before.nodes;
        result.cutoffs = stats.cutoffs - stats_before.cutoffs;
        result.tt_hits = self.table_hits() - hits_before;
        result.elapsed = start_time.elapsed();

        print_search_info(side, pos, &result);
        result
    }

    /// Best cell for `side`, or `None` if the game is already over
    pub fn find_best_move(&mut self, pos: &Position, side: Side) -> Option<Cell> {
        self.analyze(pos, side).best_move
    }
}

/// Best move for the agent given the two raw side masks.
///
/// Uses a fresh engine with the process-wide keys, so nothing is cached
/// between calls.
///
/// # Panics
///
/// If the masks overlap or use bits outside the board.
pub fn find_best_move(player: u16, agent: u16) -> Option<Cell> {
    let pos = Position::from_masks(player, agent);
    SearchEngine::default().find_best_move(&pos, Side::Agent)
}

/// Root-parallel variant of [`SearchEngine::analyze`].
///
/// Each root move is searched on the rayon pool by its own `SearchEngine`
/// built from `config`, with its own table and running hash. Workers share
/// no alpha-beta window, so each move score is exact and the selected move is
/// the same as the serial search's.
pub fn find_best_move_parallel(
    config: &EngineConfig,
    pos: &Position,
    side: Side,
) -> Result<SearchResult, ConfigError> {
    config.validate()?;
    let start_time = Instant::now();

    if pos.is_terminal() {
        return Ok(SearchResult::terminal(pos, side));
    }

    let cells: SmallVec<[Cell; 9]> = pos.open_cells().collect();
    let searched: Vec<(MoveScore, SearchStats, u64)> = cells[..]
        .par_iter()
        .map(|&cell| -> Result<_, ConfigError> {
            let mut engine = SearchEngine::new(config)?;
            let mut child = *pos;
            child.place(side, cell);
            let score = -engine.search(&child, side.opposite(), -INFINITY, INFINITY);
            Ok((MoveScore { cell, score }, engine.stats(), engine.table_hits()))
        })
        .collect::<Result<_, ConfigError>>()?;

    let mut result = SearchResult::new();
    for (score, stats, hits) in searched {
        result.move_scores.push(score);
        result.nodes_searched += stats.nodes;
        result.cutoffs += stats.cutoffs;
        result.tt_hits += hits;
    }
    result.select_best();
    result.elapsed = start_time.elapsed();

    print_search_info(side, pos, &result);
    Ok(result)
}

fn print_search_info(side: Side, pos: &Position, result: &SearchResult) {
    log::debug!(
        "{} in {}: best {:?} score {} ({} nodes, {} cutoffs, {} tt hits, {:?})",
        side.name(),
        pos,
        result.best_move,
        result.score,
        result.nodes_searched,
        result.cutoffs,
        result.tt_hits,
        result.elapsed
    );
}

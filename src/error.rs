//! Error types for the recoverable failures of the crate.
//!
//! Contract violations inside the search (overlapping side masks, placing on
//! an occupied cell) are programming errors and panic instead.

use crate::game_repr::Cell;
use std::io;
use thiserror::Error;

/// A move that cannot be played on the current board
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("'{0}' is not a cell index")]
    Parse(String),

    #[error("cell {0} is off the board (expected 0-8)")]
    OutOfRange(u32),

    #[error("cell {0} is already taken")]
    Occupied(Cell),

    #[error("the game is already over")]
    GameOver,
}

/// Invalid engine or game configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("transposition table capacity {0} must be one less than a power of two")]
    Capacity(usize),
}

/// Malformed textual board
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePositionError {
    #[error("expected 9 cells, found {0}")]
    Length(usize),

    #[error("unexpected symbol '{0}' (use P, A, '.' or '-')")]
    Symbol(char),

    #[error("both sides hold a winning line")]
    TwoWinners,
}

/// Failure while running a game at the console
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("{name} played an illegal move: {source}")]
    IllegalMove {
        name: String,
        #[source]
        source: MoveError,
    },
}

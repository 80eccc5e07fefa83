use super::bitboards::{self, cell_bit, open_cells, Cell, OpenCells, CELL_COUNT, OUT_OF_BOUNDS};
use super::piece::Side;
use crate::error::{MoveError, ParsePositionError};
use std::fmt;
use std::str::FromStr;

/// Score of a win found at depth 0. Wins and losses are scaled by depth so
/// the search prefers the fastest win and the slowest loss.
pub const WIN_SCORE: i32 = 10;

/// Score a position from the agent's point of view.
///
/// Returns `-10 + depth` if `against` holds a line, `10 - depth` if `agent`
/// does, and 0 otherwise. In a reachable position at most one side can hold a
/// line, so the order of the two checks only matters for hand-built boards.
#[inline]
pub fn evaluate(against: u16, agent: u16, depth: u8) -> i32 {
    if bitboards::winning(against) {
        -WIN_SCORE + depth as i32
    } else if bitboards::winning(agent) {
        WIN_SCORE - depth as i32
    } else {
        0
    }
}

/// A tic-tac-toe board: one occupancy mask per side.
///
/// The masks are private so the bit layout stays an implementation detail of
/// `game_repr`. Invariants: the masks are disjoint and never use bits 9-15.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    masks: [u16; 2],
}

impl Position {
    /// Empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a position from raw side masks.
    ///
    /// # Panics
    ///
    /// If the masks overlap or use bits outside the board. Both are caller
    /// bugs, and searching such a board would silently produce a wrong move.
    pub fn from_masks(player: u16, agent: u16) -> Self {
        assert_eq!(
            player & agent,
            0,
            "player mask {:09b} and agent mask {:09b} overlap",
            player,
            agent
        );
        assert_eq!(
            (player | agent) & OUT_OF_BOUNDS,
            0,
            "side masks use bits outside the 3x3 board"
        );

        Self {
            masks: [player, agent],
        }
    }

    #[inline(always)]
    pub fn mask(&self, side: Side) -> u16 {
        self.masks[side.index()]
    }

    /// Cells occupied by either side
    #[inline(always)]
    pub fn occupied(&self) -> u16 {
        self.masks[0] | self.masks[1]
    }

    /// Number of markers on the board
    #[inline(always)]
    pub fn plies(&self) -> u8 {
        self.occupied().count_ones() as u8
    }

    pub fn side_at(&self, cell: Cell) -> Option<Side> {
        Side::BOTH
            .into_iter()
            .find(|&side| self.mask(side) & cell_bit(cell) != 0)
    }

    pub fn is_open(&self, cell: Cell) -> bool {
        (cell as usize) < CELL_COUNT && self.occupied() & cell_bit(cell) == 0
    }

    #[inline]
    pub fn open_cells(&self) -> OpenCells {
        open_cells(self.masks[0], self.masks[1])
    }

    /// Put a marker on an open cell. Hot path: only checked in debug builds.
    #[inline(always)]
    pub fn place(&mut self, side: Side, cell: Cell) {
        debug_assert!(self.is_open(cell), "cell {} is not open", cell);
        self.masks[side.index()] |= cell_bit(cell);
    }

    /// Take back a marker previously placed with [`Position::place`]
    #[inline(always)]
    pub fn remove(&mut self, side: Side, cell: Cell) {
        debug_assert!(
            self.mask(side) & cell_bit(cell) != 0,
            "{} has no marker on cell {}",
            side.name(),
            cell
        );
        self.masks[side.index()] ^= cell_bit(cell);
    }

    /// Checked version of [`Position::place`] for moves coming from outside
    /// the engine (console input, other players).
    pub fn try_place(&mut self, side: Side, index: u32) -> Result<Cell, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if index as usize >= CELL_COUNT {
            return Err(MoveError::OutOfRange(index));
        }

        let cell = index as Cell;
        if !self.is_open(cell) {
            return Err(MoveError::Occupied(cell));
        }

        self.place(side, cell);
        Ok(cell)
    }

    #[inline]
    pub fn has_won(&self, side: Side) -> bool {
        bitboards::winning(self.mask(side))
    }

    pub fn winner(&self) -> Option<Side> {
        Side::BOTH.into_iter().find(|&side| self.has_won(side))
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        bitboards::is_draw(self.occupied())
    }

    /// Full board and nobody holds a line
    pub fn is_draw(&self) -> bool {
        self.is_full() && self.winner().is_none()
    }

    pub fn is_terminal(&self) -> bool {
        self.is_full() || self.winner().is_some()
    }

    /// Static score from `side`'s point of view (see [`evaluate`])
    #[inline]
    pub fn evaluate(&self, side: Side, depth: u8) -> i32 {
        evaluate(self.mask(side.opposite()), self.mask(side), depth)
    }

    /// Grid view for the console. `x_side` is drawn as X, the other side as
    /// O, open cells show their index.
    pub fn display(&self, x_side: Side) -> BoardDisplay<'_> {
        BoardDisplay {
            position: self,
            x_side,
        }
    }
}

/// Compact format: 9 symbols in cell order 0..8
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in 0..CELL_COUNT as Cell {
            let c = self.side_at(cell).map_or('.', |side| side.to_char());
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl FromStr for Position {
    type Err = ParsePositionError;

    /// Parse 9 symbols in cell order 0..8: `P` player, `A` agent, `.` or `-`
    /// empty. Whitespace is ignored so boards can be laid out in rows.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if symbols.len() != CELL_COUNT {
            return Err(ParsePositionError::Length(symbols.len()));
        }

        let mut pos = Position::new();
        for (cell, &c) in symbols.iter().enumerate() {
            match c {
                '.' | '-' => {}
                _ => {
                    let side = Side::from_char(c).ok_or(ParsePositionError::Symbol(c))?;
                    pos.place(side, cell as Cell);
                }
            }
        }

        if pos.has_won(Side::Player) && pos.has_won(Side::Agent) {
            return Err(ParsePositionError::TwoWinners);
        }

        Ok(pos)
    }
}

/// Console rendering of a [`Position`]: rows top to bottom hold cells
/// 8 7 6 / 5 4 3 / 2 1 0.
pub struct BoardDisplay<'a> {
    position: &'a Position,
    x_side: Side,
}

impl fmt::Display for BoardDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..3u8).rev() {
            for col in (0..3u8).rev() {
                let cell = row * 3 + col;
                match self.position.side_at(cell) {
                    Some(side) if side == self.x_side => write!(f, "X")?,
                    Some(_) => write!(f, "O")?,
                    None => write!(f, "{}", cell)?,
                }
                if col > 0 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

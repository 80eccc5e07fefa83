pub mod tables;
pub use tables::*;

use std::iter::FusedIterator;

/// Index of a board cell, 0..=8
pub type Cell = u8;

/// Number of playable cells
pub const CELL_COUNT: usize = 9;

/// Bit for a single cell
#[inline(always)]
pub const fn cell_bit(cell: Cell) -> u16 {
    1u16 << cell
}

/// True if `mask` fully covers any of the eight winning lines
#[inline]
pub fn winning(mask: u16) -> bool {
    WINNING_PATTERNS
        .iter()
        .any(|&pattern| mask & pattern == pattern)
}

/// True if every valid cell is occupied.
///
/// This does not look for a winner; callers check `winning` first.
#[inline(always)]
pub fn is_draw(combined: u16) -> bool {
    combined & FULL_BOARD == FULL_BOARD
}

/// Open cells of the board described by the two side masks, lowest index first
#[inline]
pub fn open_cells(side_a: u16, side_b: u16) -> OpenCells {
    OpenCells {
        remaining: !(side_a | side_b) & !OUT_OF_BOUNDS,
    }
}

/// Pop the least significant bit and return its index
#[inline(always)]
pub fn pop_lsb(bb: &mut u16) -> Cell {
    let cell = bb.trailing_zeros() as Cell;
    *bb &= *bb - 1; // Clear the LSB
    cell
}

/// Lazy enumeration of open cells in ascending index order.
///
/// The iterator only holds a copy of the open-cell mask, so cloning it
/// restarts the enumeration from the same state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenCells {
    remaining: u16,
}

impl OpenCells {
    /// Remaining cells as a mask
    pub fn mask(&self) -> u16 {
        self.remaining
    }
}

impl Iterator for OpenCells {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Cell> {
        if self.remaining == 0 {
            None
        } else {
            Some(pop_lsb(&mut self.remaining))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for OpenCells {}

impl FusedIterator for OpenCells {}

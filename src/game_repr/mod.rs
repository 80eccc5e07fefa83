mod piece;
mod position;
pub mod bitboards;

pub use piece::*;
pub use position::*;
pub use bitboards::{is_draw, open_cells, winning, Cell, OpenCells, CELL_COUNT};

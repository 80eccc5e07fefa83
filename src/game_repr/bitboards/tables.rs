/// Every valid cell of the 3x3 board (bits 0-8)
pub const FULL_BOARD: u16 = 0b0000_0001_1111_1111;

/// Bits 9-15 of the mask do not correspond to a cell.
/// They are treated as permanently occupied so enumeration never yields them.
pub const OUT_OF_BOUNDS: u16 = 0b1111_1110_0000_0000;

pub const COL_1: u16 = 0b0000_0001_0010_0100;
pub const COL_2: u16 = 0b0000_0000_1001_0010;
pub const COL_3: u16 = 0b0000_0000_0100_1001;

pub const ROW_1: u16 = 0b0000_0001_1100_0000;
pub const ROW_2: u16 = 0b0000_0000_0011_1000;
pub const ROW_3: u16 = 0b0000_0000_0000_0111;

pub const DIAG_UP: u16 = 0b0000_0000_0101_0100;
pub const DIAG_DOWN: u16 = 0b0000_0001_0001_0001;

/// All eight lines that win the game
pub const WINNING_PATTERNS: [u16; 8] = [
    COL_1, COL_2, COL_3,
    ROW_1, ROW_2, ROW_3,
    DIAG_UP, DIAG_DOWN,
];

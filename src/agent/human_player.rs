//! Human player implementation that reads moves from a text console.
//!
//! `HumanPlayer` prompts for a cell index, validates it against the current
//! position and keeps asking until it gets a playable cell. Input that does
//! not parse, is off the board or names an occupied cell is reported back as
//! a retry message. End of input counts as resigning.
//!
//! The player is generic over its input and output so tests can script a
//! session with in-memory buffers:
//!
//! ```
//! use std::io::Cursor;
//! use tictactoe_engine::agent::{HumanPlayer, Player};
//! use tictactoe_engine::game_repr::{Position, Side};
//!
//! let mut out = Vec::new();
//! let mut human = HumanPlayer::new(Cursor::new("9\n4\n"), &mut out, "Alice");
//! assert_eq!(human.get_move(&Position::new(), Side::Player), Some(4));
//! ```

use crate::agent::player::Player;
use crate::error::MoveError;
use crate::game_repr::{Cell, Position, Side};
use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};

/// Human player that types cell indices at the console.
pub struct HumanPlayer<R, W> {
    input: R,
    output: W,
    name: String,
}

impl HumanPlayer<StdinLock<'static>, Stdout> {
    /// Player reading stdin and prompting on stdout
    pub fn stdio(name: impl Into<String>) -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout(), name)
    }
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(input: R, output: W, name: impl Into<String>) -> Self {
        Self {
            input,
            output,
            name: name.into(),
        }
    }

    /// Prompt until a playable cell is entered.
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_move(&mut self, position: &Position, side: Side) -> io::Result<Option<Cell>> {
        loop {
            writeln!(self.output, "Choose an index to play")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            match parse_move(position, side, line.trim()) {
                Ok(cell) => return Ok(Some(cell)),
                Err(err) => writeln!(self.output, "{}, try again", err)?,
            }
        }
    }
}

/// Validate console input against `position`
pub fn parse_move(position: &Position, side: Side, text: &str) -> Result<Cell, MoveError> {
    let index: u32 = text
        .parse()
        .map_err(|_| MoveError::Parse(text.to_string()))?;

    // Validate on a scratch copy, the real board is updated by the orchestrator
    let mut scratch = *position;
    scratch.try_place(side, index)
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn get_move(&mut self, position: &Position, side: Side) -> Option<Cell> {
        match self.read_move(position, side) {
            Ok(cell) => cell,
            Err(err) => {
                log::warn!("{}: console input failed: {}", self.name, err);
                None
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_interactive(&self) -> bool {
        true
    }
}

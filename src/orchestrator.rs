//! Turn loop coordinating two players on one board.
//!
//! The [`Orchestrator`] owns the position and both players. It asks the side
//! to move for a cell, validates and plays it, reports it on the console and
//! stops as soon as a side completes a line or the board is full.
//!
//! ```text
//! [Game starting] -> [Print board] -> [Request move] -> [Validate + play]
//!   -> [Print board] -> [Check end] -> [Switch turn] -> [Request move] ...
//! ```

use crate::agent::player::{GameResult, Player};
use crate::agent::{HumanPlayer, NegamaxPlayer, RandomPlayer};
use crate::config::{GameConfig, PlayerConfig};
use crate::error::{ConfigError, GameError};
use crate::game_repr::{Cell, Position, Side};
use std::io::Write;
use std::time::Instant;

/// Root component managing one game between a player and the agent.
///
/// Console output goes to `output`, so tests can capture a whole game in a
/// `Vec<u8>`.
pub struct Orchestrator<W: Write> {
    /// Indexed by [`Side::index`]
    players: [Box<dyn Player>; 2],

    position: Position,

    /// Side that opened the game; it is drawn as X
    first: Side,

    /// Whose turn it is
    current_turn: Side,

    /// Print search time after every non-interactive move
    show_timing: bool,

    /// Moves played so far, in order
    history: Vec<(Side, Cell)>,

    /// Result of the game if it has ended
    game_result: Option<GameResult>,

    output: W,
}

impl<W: Write> Orchestrator<W> {
    /// Create an orchestrator for a new game on an empty board
    ///
    /// # Arguments
    ///
    /// * `player` - Sits in the [`Side::Player`] seat
    /// * `agent` - Sits in the [`Side::Agent`] seat
    /// * `first` - Side that moves first
    /// * `output` - Console the game is reported on
    pub fn new(player: Box<dyn Player>, agent: Box<dyn Player>, first: Side, output: W) -> Self {
        Self {
            players: [player, agent],
            position: Position::new(),
            first,
            current_turn: first,
            show_timing: false,
            history: Vec::new(),
            game_result: None,
            output,
        }
    }

    /// Build both players from a [`GameConfig`]
    pub fn from_config(config: &GameConfig, output: W) -> Result<Self, ConfigError> {
        config.validate()?;

        let player: Box<dyn Player> = match &config.player {
            PlayerConfig::Human => Box::new(HumanPlayer::stdio("Player")),
            PlayerConfig::Random { seed } => Box::new(RandomPlayer::new(*seed)),
            PlayerConfig::Negamax { engine } => Box::new(NegamaxPlayer::new(engine, "Player")?),
        };
        let agent = Box::new(NegamaxPlayer::new(&config.agent, "Agent")?);

        Ok(Self::new(player, agent, config.first, output).with_timing(config.show_timing))
    }

    pub fn with_timing(mut self, show_timing: bool) -> Self {
        self.show_timing = show_timing;
        self
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn history(&self) -> &[(Side, Cell)] {
        &self.history
    }

    pub fn result(&self) -> Option<GameResult> {
        self.game_result
    }

    /// Clear the board for another game with the same players
    pub fn reset(&mut self) {
        self.position = Position::new();
        self.current_turn = self.first;
        self.history.clear();
        self.game_result = None;
    }

    /// Play until the game ends
    ///
    /// A player returning `None` resigns and the other side wins. A player
    /// returning an unplayable cell aborts the game with
    /// [`GameError::IllegalMove`]; interactive players validate their own
    /// input, so this only happens with a faulty engine.
    pub fn play(&mut self) -> Result<GameResult, GameError> {
        log::info!(
            "Game starting: {} ({}) moves first",
            self.first.name(),
            self.players[self.first.index()].name()
        );
        writeln!(self.output, "Game starting")?;
        self.print_board()?;

        loop {
            if let Some(result) = GameResult::of_position(&self.position) {
                return self.finish(result);
            }

            let side = self.current_turn;
            let player = &mut self.players[side.index()];

            let start = Instant::now();
            let choice = player.get_move(&self.position, side);
            let elapsed = start.elapsed();

            let Some(cell) = choice else {
                log::warn!("{} ({}) resigned", side.name(), player.name());
                writeln!(self.output, "{} resigns", side.name())?;
                return self.finish(GameResult::from_winner(side.opposite()));
            };

            if let Err(source) = self.position.try_place(side, cell as u32) {
                log::warn!("{} ({}) played illegal cell {}", side.name(), player.name(), cell);
                return Err(GameError::IllegalMove {
                    name: player.name().to_string(),
                    source,
                });
            }

            if !player.is_interactive() {
                if self.show_timing {
                    writeln!(self.output, "Search time: {:?}", elapsed)?;
                }
                writeln!(self.output, "{} played at index {}", side.name(), cell)?;
                writeln!(self.output)?;
            }

            self.history.push((side, cell));
            self.players[side.opposite().index()].opponent_moved(cell);
            self.current_turn = side.opposite();
            self.print_board()?;
        }
    }

    fn finish(&mut self, result: GameResult) -> Result<GameResult, GameError> {
        writeln!(self.output, "{}", result.message())?;
        for player in &mut self.players {
            player.game_ended(result);
        }
        log::info!("{} after {} moves", result.message(), self.history.len());
        self.game_result = Some(result);
        Ok(result)
    }

    fn print_board(&mut self) -> std::io::Result<()> {
        write!(self.output, "{}", self.position.display(self.first))
    }
}

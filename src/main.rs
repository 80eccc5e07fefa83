use clap::{Parser, ValueEnum};
use std::error::Error;
use std::io;
use tictactoe_engine::agent::player::GameResult;
use tictactoe_engine::config::{EngineConfig, GameConfig, PlayerConfig};
use tictactoe_engine::game_repr::Side;
use tictactoe_engine::orchestrator::Orchestrator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Opponent {
    /// Moves typed at the console
    Human,
    /// Uniformly random moves
    Random,
    /// A second copy of the engine
    Agent,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Unbeatable tic-tac-toe agent", long_about = None)]
struct Args {
    /// Who plays against the agent
    #[arg(long, value_enum, default_value_t = Opponent::Human)]
    opponent: Opponent,

    /// Let the player's seat open the game
    #[arg(long)]
    human_first: bool,

    /// Transposition table capacity, must be 2^n - 1
    #[arg(long, default_value_t = 2047)]
    tt_capacity: usize,

    /// Search without a transposition table
    #[arg(long)]
    no_tt: bool,

    /// Seed for Zobrist keys and the random opponent
    #[arg(long)]
    seed: Option<u64>,

    /// Print search time after every engine move (always on against a human)
    #[arg(long)]
    timing: bool,

    /// Number of games to play (non-human opponents only)
    #[arg(long, default_value_t = 1)]
    games: u32,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        let first = if self.human_first { Side::Player } else { Side::Agent };
        let engine = EngineConfig {
            tt_capacity: self.tt_capacity,
            use_transposition_table: !self.no_tt,
            seed: self.seed,
        };

        let mut config = match self.opponent {
            Opponent::Human => GameConfig::human_vs_agent(first),
            Opponent::Random => GameConfig::random_vs_agent(first, self.seed),
            Opponent::Agent => GameConfig::agent_vs_agent(first),
        };
        if let PlayerConfig::Negamax { engine: player_engine } = &mut config.player {
            *player_engine = engine.clone();
        }
        config.agent = engine;
        config.show_timing |= self.timing;
        config
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = args.game_config();
    let mut game = Orchestrator::from_config(&config, io::stdout())?;

    let games = if args.opponent == Opponent::Human { 1 } else { args.games.max(1) };
    let mut tally = [0u32; 3];
    for round in 0..games {
        if round > 0 {
            game.reset();
            println!();
        }
        let result = game.play()?;
        tally[match result {
            GameResult::PlayerWins => 0,
            GameResult::AgentWins => 1,
            GameResult::Draw => 2,
        }] += 1;
    }

    if games > 1 {
        println!(
            "Player wins: {}, Agent wins: {}, Draws: {}",
            tally[0], tally[1], tally[2]
        );
    }
    Ok(())
}

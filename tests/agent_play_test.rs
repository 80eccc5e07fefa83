//! Whole-game tests for the negamax agent
//!
//! This test suite checks:
//! - The agent never loses, against every possible opponent line
//! - Two agents always draw
//! - The transposition table never changes a decision
//! - The agent only ever picks open cells
//! - Console games driven by the orchestrator

use std::collections::HashSet;
use tictactoe_engine::agent::ai::{find_best_move, find_best_move_parallel};
use tictactoe_engine::agent::player::{GameResult, Player};
use tictactoe_engine::agent::{HumanPlayer, NegamaxPlayer, RandomPlayer, SearchEngine};
use tictactoe_engine::config::{EngineConfig, GameConfig};
use tictactoe_engine::game_repr::{Position, Side};
use tictactoe_engine::orchestrator::Orchestrator;

/// Walk every line the opponent can choose, letting `engine` answer for the agent.
///
/// Returns the number of finished games visited.
fn play_out_every_line(engine: &mut SearchEngine, pos: Position, to_move: Side) -> usize {
    if let Some(result) = GameResult::of_position(&pos) {
        assert_ne!(result, GameResult::PlayerWins, "agent lost in {}", pos);
        return 1;
    }

    match to_move {
        Side::Agent => {
            let cell = engine
                .find_best_move(&pos, Side::Agent)
                .expect("unfinished position must have a move");
            assert!(pos.is_open(cell), "agent picked taken cell {} in {}", cell, pos);

            let mut next = pos;
            next.place(Side::Agent, cell);
            play_out_every_line(engine, next, Side::Player)
        }
        Side::Player => pos
            .open_cells()
            .map(|cell| {
                let mut next = pos;
                next.place(Side::Player, cell);
                play_out_every_line(engine, next, Side::Agent)
            })
            .sum(),
    }
}

/// Every position reachable with `first` to move on the empty board, paired with its side to move
fn reachable_positions(first: Side) -> Vec<(Position, Side)> {
    let mut seen = HashSet::new();
    let mut stack = vec![(Position::new(), first)];
    let mut out = Vec::new();

    while let Some((pos, side)) = stack.pop() {
        if pos.is_terminal() || !seen.insert(pos) {
            continue;
        }
        out.push((pos, side));
        for cell in pos.open_cells() {
            let mut next = pos;
            next.place(side, cell);
            stack.push((next, side.opposite()));
        }
    }
    out
}

#[test]
fn test_agent_never_loses_moving_first() {
    let mut engine = SearchEngine::new(&EngineConfig::with_seed(1)).unwrap();
    let games = play_out_every_line(&mut engine, Position::new(), Side::Agent);
    assert!(games > 0);
}

#[test]
fn test_agent_never_loses_moving_second() {
    let mut engine = SearchEngine::new(&EngineConfig::with_seed(2)).unwrap();
    let games = play_out_every_line(&mut engine, Position::new(), Side::Player);
    assert!(games > 0);
}

#[test]
fn test_agent_never_loses_without_table() {
    let mut engine = SearchEngine::new(&EngineConfig::without_table()).unwrap();
    play_out_every_line(&mut engine, Position::new(), Side::Player);
}

#[test]
fn test_agent_never_loses_with_tiny_table() {
    let config = EngineConfig {
        tt_capacity: 7,
        ..EngineConfig::with_seed(3)
    };
    let mut engine = SearchEngine::new(&config).unwrap();
    play_out_every_line(&mut engine, Position::new(), Side::Agent);
}

#[test]
fn test_table_never_changes_decisions() {
    // One long-lived engine, so entries from earlier positions are reused
    let mut cached = SearchEngine::new(&EngineConfig::with_seed(11)).unwrap();
    let mut plain = SearchEngine::new(&EngineConfig::without_table()).unwrap();

    for first in Side::BOTH {
        for (pos, side) in reachable_positions(first) {
            let with_table = cached.analyze(&pos, side);
            let without = plain.analyze(&pos, side);

            assert_eq!(with_table.best_move, without.best_move, "move differs in {}", pos);
            assert_eq!(with_table.score, without.score, "score differs in {}", pos);
            assert_eq!(with_table.move_scores, without.move_scores, "{}", pos);
        }
    }
    assert!(cached.table().unwrap().hits > 0);
}

#[test]
fn test_reachable_positions_are_counted_once() {
    // Swapping the sides maps one tree onto the other
    let agent_first = reachable_positions(Side::Agent);
    let player_first = reachable_positions(Side::Player);
    assert_eq!(agent_first.len(), player_first.len());
    assert!(agent_first.iter().all(|(pos, _)| !pos.is_terminal()));
}

#[test]
fn test_mask_entry_point_on_agent_turns() {
    for (pos, side) in reachable_positions(Side::Player) {
        if side != Side::Agent {
            continue;
        }
        let cell = find_best_move(pos.mask(Side::Player), pos.mask(Side::Agent))
            .expect("unfinished position must have a move");
        assert!(pos.is_open(cell));
    }
}

#[test]
fn test_parallel_agrees_on_opening_positions() {
    let config = EngineConfig::with_seed(21);
    let mut serial = SearchEngine::new(&config).unwrap();

    for (pos, side) in reachable_positions(Side::Agent) {
        if pos.plies() > 2 {
            continue;
        }
        let parallel = find_best_move_parallel(&config, &pos, side).unwrap();
        let reference = serial.analyze(&pos, side);
        assert_eq!(parallel.best_move, reference.best_move, "{}", pos);
        assert_eq!(parallel.move_scores, reference.move_scores, "{}", pos);
    }
}

#[test]
fn test_agent_vs_agent_draws() {
    for first in Side::BOTH {
        let config = GameConfig::agent_vs_agent(first);
        let mut game = Orchestrator::from_config(&config, Vec::new()).unwrap();
        assert_eq!(game.play().unwrap(), GameResult::Draw);
        assert!(game.position().is_full());
    }
}

#[test]
fn test_agent_vs_random_never_loses() {
    for seed in 0..40 {
        for first in Side::BOTH {
            let player = Box::new(RandomPlayer::new(Some(seed)));
            let agent = Box::new(NegamaxPlayer::new(&EngineConfig::default(), "Agent").unwrap());
            let mut game = Orchestrator::new(player, agent, first, Vec::new());

            let result = game.play().unwrap();
            assert_ne!(result, GameResult::PlayerWins, "seed {} first {:?}", seed, first);
        }
    }
}

#[test]
fn test_scripted_console_game() {
    // Human opens in the centre, retries on bad input, then works through the list
    let input = std::io::Cursor::new("4\n4\n10\n8\n2\n6\n1\n3\n5\n7\n");
    let mut board = Vec::new();
    {
        let human = Box::new(HumanPlayer::new(input, std::io::sink(), "Tester"));
        let agent = Box::new(NegamaxPlayer::new(&EngineConfig::with_seed(5), "Agent").unwrap());
        let mut game = Orchestrator::new(human, agent, Side::Player, &mut board);
        let result = game.play().unwrap();
        assert_ne!(result, GameResult::PlayerWins);
        assert_eq!(game.history()[0], (Side::Player, 4));
        assert_eq!(game.history()[2], (Side::Player, 8));
    }

    let transcript = String::from_utf8(board).unwrap();
    assert!(transcript.starts_with("Game starting\n"));
    assert!(transcript.contains("Agent played at index"));
    assert!(!transcript.contains("Player played at index"));
}

#[test]
fn test_human_resigning_at_end_of_input() {
    let human = Box::new(HumanPlayer::new(std::io::Cursor::new("4\n"), Vec::new(), "Tester"));
    let agent = Box::new(NegamaxPlayer::new(&EngineConfig::default(), "Agent").unwrap());
    let mut game = Orchestrator::new(human, agent, Side::Player, Vec::new());

    assert_eq!(game.play().unwrap(), GameResult::AgentWins);
    assert_eq!(game.history().len(), 2);
}

#[test]
fn test_agent_name_reported() {
    let agent = NegamaxPlayer::new(&EngineConfig::default(), "Agent").unwrap();
    assert_eq!(agent.name(), "Agent");
}

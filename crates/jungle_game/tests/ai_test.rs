//! AI move selection across difficulty tiers.

use jungle_game::{
    AiEngine, Board, Coord, Difficulty, GameMode, GameSession, Move, Piece, Player, RuleSet,
    Species,
};
use std::time::Duration;
use strum::IntoEnumIterator;

fn at(row: usize, col: usize) -> Coord {
    Coord::new(row, col).expect("coordinate on board")
}

/// Red Dog one step from the Blue den, Blue with a lone Cat far away.
fn den_in_reach() -> GameSession {
    let mut board = Board::empty();
    board.place(at(1, 3), Piece::new(Player::Red, Species::Dog));
    board.place(at(6, 0), Piece::new(Player::Blue, Species::Cat));
    GameSession::from_position(board, Player::Red, RuleSet::default())
}

#[test]
fn test_deterministic_tiers_repeat_their_choice() {
    let session = GameSession::new(GameMode::Pve, Difficulty::Professional);
    let first = AiEngine::seeded(1).select_move(&session, Difficulty::Professional);
    let second = AiEngine::seeded(99).select_move(&session, Difficulty::Professional);
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn test_every_tier_returns_a_legal_move() {
    let session = GameSession::default();
    let legal = session.all_legal_moves();
    let mut engine = AiEngine::seeded(5).with_time_budget(Duration::from_millis(200));
    for difficulty in Difficulty::iter() {
        let mv = engine
            .select_move(&session, difficulty)
            .expect("starting position has moves");
        assert!(legal.contains(&mv), "{difficulty} chose {mv}");
    }
}

#[test]
fn test_search_tiers_take_immediate_den_win() {
    let session = den_in_reach();
    let winning = Move::new(at(1, 3), at(0, 3));
    let mut engine = AiEngine::seeded(3).with_time_budget(Duration::from_millis(500));
    for difficulty in [Difficulty::Professional, Difficulty::Master] {
        assert_eq!(engine.select_move(&session, difficulty), Some(winning));
    }
}

#[test]
fn test_no_move_once_game_is_over() {
    let mut session = den_in_reach();
    session
        .apply_move(at(1, 3), at(0, 3))
        .expect("den entry is legal");
    let mut engine = AiEngine::seeded(4);
    assert_eq!(engine.select_move(&session, Difficulty::Master), None);
}

#[test]
fn test_no_move_when_side_is_stuck() {
    let mut board = Board::empty();
    board.place(at(0, 0), Piece::new(Player::Blue, Species::Cat));
    board.place(at(1, 0), Piece::new(Player::Red, Species::Dog));
    board.place(at(0, 1), Piece::new(Player::Red, Species::Wolf));
    let mut session = GameSession::from_position(board, Player::Blue, RuleSet::default());

    let mut engine = AiEngine::seeded(6);
    assert_eq!(engine.select_move(&session, Difficulty::Easy), None);
    assert_eq!(session.concede_if_immobilized(), Some(Player::Red));
}

#[test]
fn test_seeded_engines_agree_on_random_tiers() {
    let session = GameSession::default();
    let a = AiEngine::seeded(77).select_move(&session, Difficulty::Beginner);
    let b = AiEngine::seeded(77).select_move(&session, Difficulty::Beginner);
    assert_eq!(a, b);
}

#[test]
fn test_engine_never_mutates_session() {
    let session = GameSession::default();
    let before = session.snapshot();
    let _ = AiEngine::seeded(8).select_move(&session, Difficulty::Amateur);
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_professional_takes_trapped_elephant() {
    // Left alone, the Elephant walks into the Red den next turn.
    let mut board = Board::empty();
    board.place(at(7, 2), Piece::new(Player::Red, Species::Cat));
    board.place(at(8, 2), Piece::new(Player::Blue, Species::Elephant));
    board.place(at(0, 6), Piece::new(Player::Blue, Species::Dog));
    let session = GameSession::from_position(board, Player::Red, RuleSet::default());

    let mv = AiEngine::seeded(9).select_move(&session, Difficulty::Professional);
    assert_eq!(mv, Some(Move::new(at(7, 2), at(8, 2))));
}

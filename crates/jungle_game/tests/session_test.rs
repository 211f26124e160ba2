//! Session lifecycle: validation, terminal states, and board invariants.

use jungle_game::invariants::{BoardInvariants, InvariantSet};
use jungle_game::{
    AiEngine, Board, Coord, Difficulty, GameMode, GameSession, Move, Outcome, Piece, Player,
    RuleError, RuleSet, Species,
};

fn at(row: usize, col: usize) -> Coord {
    Coord::new(row, col).expect("coordinate on board")
}

#[test]
fn test_illegal_move_leaves_board_unchanged() {
    let mut session = GameSession::new(GameMode::Pvp, Difficulty::Amateur);
    let before = session.board().clone();

    let attempts = [
        (at(6, 0), at(4, 0)),
        (at(8, 6), at(7, 6)),
        (at(4, 3), at(3, 3)),
        (at(2, 2), at(3, 2)),
        (at(6, 4), at(6, 4)),
    ];
    for (from, to) in attempts {
        let err = session.apply_move(from, to).expect_err("move should be rejected");
        assert_eq!(err, RuleError::IllegalMove(Move::new(from, to)));
        assert_eq!(session.board(), &before);
        assert_eq!(session.current_player(), Player::Red);
    }
    assert!(session.history().is_empty());
}

#[test]
fn test_den_entry_is_terminal() {
    let mut board = Board::empty();
    board.place(at(1, 3), Piece::new(Player::Red, Species::Dog));
    board.place(at(6, 0), Piece::new(Player::Blue, Species::Cat));
    let mut session = GameSession::from_position(board, Player::Red, RuleSet::default());

    session.apply_move(at(1, 3), at(0, 3)).expect("den entry is legal");
    assert_eq!(session.outcome(), Outcome::Won(Player::Red));
    assert!(session.snapshot().game_over);
    assert_eq!(session.snapshot().winner, Some(Player::Red));

    let after = session.board().clone();
    for (from, to) in [(at(6, 0), at(5, 0)), (at(0, 3), at(0, 2))] {
        let err = session.apply_move(from, to).expect_err("game is over");
        assert_eq!(err, RuleError::GameAlreadyOver);
    }
    assert_eq!(session.board(), &after);
}

#[test]
fn test_immobilized_side_loses_on_opponent_move() {
    let mut board = Board::empty();
    board.place(at(0, 0), Piece::new(Player::Blue, Species::Cat));
    board.place(at(1, 0), Piece::new(Player::Red, Species::Dog));
    board.place(at(1, 1), Piece::new(Player::Red, Species::Wolf));
    let mut session = GameSession::from_position(board, Player::Red, RuleSet::default());

    session.apply_move(at(1, 1), at(0, 1)).expect("wolf blocks the corner");
    assert_eq!(session.outcome(), Outcome::Won(Player::Red));
}

#[test]
fn test_capture_removes_piece() {
    let mut board = Board::starting();
    board.remove(at(0, 0));
    let dog = board.remove(at(6, 0)).expect("red dog on its start cell");
    board.place(at(6, 3), dog);
    board.place(at(7, 3), Piece::new(Player::Blue, Species::Elephant));
    let mut session = GameSession::from_position(board, Player::Red, RuleSet::default());

    session.apply_move(at(6, 3), at(7, 3)).expect("trap capture is legal");
    assert_eq!(session.board().piece_count(Player::Blue), 7);
    assert_eq!(
        session.board().piece_at(at(7, 3)),
        Some(Piece::new(Player::Red, Species::Dog))
    );
    assert_eq!(
        session.history()[0].captured,
        Some(Piece::new(Player::Blue, Species::Elephant))
    );
    assert_eq!(session.current_player(), Player::Blue);
}

#[test]
fn test_invariants_hold_through_random_play() {
    let mut session = GameSession::new(GameMode::Aivai, Difficulty::Beginner);
    let mut engine = AiEngine::seeded(2024);

    for _ in 0..80 {
        let Some(mv) = engine.select_move(&session, Difficulty::Beginner) else {
            break;
        };
        session.apply_move(mv.from, mv.to).expect("engine moves are legal");

        assert!(BoardInvariants::check_all(session.board()).is_ok());
        let occupied = session.board().occupied().count();
        assert!(occupied <= 16);
        assert_eq!(
            occupied,
            session.board().piece_count(Player::Red) + session.board().piece_count(Player::Blue)
        );
        if session.outcome().is_over() {
            break;
        }
    }
}

#[test]
fn test_new_game_resets_state() {
    let mut session = GameSession::new(GameMode::Pve, Difficulty::Master);
    session.apply_move(at(6, 0), at(5, 0)).expect("opening move");
    let fresh = GameSession::new(session.mode(), session.difficulty());
    assert_eq!(fresh.board(), &Board::starting());
    assert_eq!(fresh.current_player(), Player::Red);
    assert_eq!(fresh.difficulty(), Difficulty::Master);
}

//! Service operations over named sessions.

use jungle_game::{Difficulty, GameMode, Player, RuleError};
use jungle_server::{DEFAULT_SESSION, GameService, MoveView, ServerConfig, ServiceError};

#[tokio::test]
async fn test_default_session_is_open() {
    let service = GameService::default();
    let snapshot = service.state(DEFAULT_SESSION).await.expect("default session");
    assert_eq!(snapshot.current_player, Player::Red);
    assert!(!snapshot.game_over);
    assert_eq!(snapshot.mode, GameMode::Pvp);
    assert_eq!(snapshot.difficulty, Difficulty::Amateur);
    assert_eq!(service.session_ids().await, vec![DEFAULT_SESSION.to_string()]);
}

#[tokio::test]
async fn test_unknown_session_is_reported() {
    let service = GameService::default();
    let err = service.state("missing").await.expect_err("no such session");
    assert_eq!(err, ServiceError::SessionNotFound("missing".to_string()));
}

#[tokio::test]
async fn test_new_game_opens_named_session() {
    let service = GameService::default();
    let snapshot = service
        .new_game("alpha", Some(GameMode::Pve), Some(Difficulty::Easy))
        .await;
    assert_eq!(snapshot.mode, GameMode::Pve);
    assert_eq!(snapshot.difficulty, Difficulty::Easy);
    assert_eq!(
        service.session_ids().await,
        vec!["alpha".to_string(), DEFAULT_SESSION.to_string()]
    );
}

#[tokio::test]
async fn test_legal_moves_for_source_cell() {
    let service = GameService::default();
    let moves = service
        .legal_moves(DEFAULT_SESSION, 6, 0, Player::Red)
        .await
        .expect("on-board source");
    assert_eq!(
        moves,
        vec![
            MoveView::new(6, 0, 5, 0),
            MoveView::new(6, 0, 7, 0),
            MoveView::new(6, 0, 6, 1),
        ]
    );

    let enemy = service
        .legal_moves(DEFAULT_SESSION, 2, 0, Player::Red)
        .await
        .expect("on-board source");
    assert!(enemy.is_empty());

    let err = service
        .legal_moves(DEFAULT_SESSION, 9, 0, Player::Red)
        .await
        .expect_err("off-board source");
    assert_eq!(
        err,
        ServiceError::Rule(RuleError::OutOfBounds { row: 9, col: 0 })
    );
}

#[tokio::test]
async fn test_pvp_move_flips_turn() {
    let service = GameService::default();
    let snapshot = service
        .apply_move(DEFAULT_SESSION, (6, 0), (5, 0))
        .await
        .expect("legal opening");
    assert_eq!(snapshot.current_player, Player::Blue);
    assert!(snapshot.board[6][0].is_none());
    assert!(snapshot.board[5][0].is_some());
}

#[tokio::test]
async fn test_illegal_move_is_rejected() {
    let service = GameService::default();
    let err = service
        .apply_move(DEFAULT_SESSION, (6, 0), (4, 0))
        .await
        .expect_err("two-step move");
    assert!(matches!(err, ServiceError::Rule(RuleError::IllegalMove(_))));
    let snapshot = service.state(DEFAULT_SESSION).await.expect("default session");
    assert_eq!(snapshot.current_player, Player::Red);
}

#[tokio::test]
async fn test_pve_ai_answers_human_move() {
    let service = GameService::default();
    service
        .new_game("pve", Some(GameMode::Pve), Some(Difficulty::Professional))
        .await;
    let snapshot = service
        .apply_move("pve", (6, 0), (5, 0))
        .await
        .expect("legal opening");
    assert_eq!(snapshot.current_player, Player::Red);
    assert!(!snapshot.game_over);
}

#[tokio::test]
async fn test_pve_without_auto_reply_waits() {
    let service = GameService::new(&ServerConfig::default().with_auto_reply(false));
    service
        .new_game("pve", Some(GameMode::Pve), Some(Difficulty::Professional))
        .await;
    let snapshot = service
        .apply_move("pve", (6, 0), (5, 0))
        .await
        .expect("legal opening");
    assert_eq!(snapshot.current_player, Player::Blue);

    let turn = service.ai_move("pve", None).await.expect("blue has moves");
    assert!(turn.mv.is_some());
    assert_eq!(turn.snapshot.current_player, Player::Red);
}

#[tokio::test]
async fn test_aivai_ai_move_plays_both_sides() {
    let service = GameService::default();
    service
        .new_game("eve", Some(GameMode::Aivai), Some(Difficulty::Beginner))
        .await;
    let turn = service.ai_move("eve", None).await.expect("red has moves");
    let mv = turn.mv.expect("a move was played");
    assert!(mv.from_row >= 6);
    assert_eq!(turn.snapshot.current_player, Player::Red);
}

#[tokio::test]
async fn test_pvp_ai_move_plays_one_side() {
    let service = GameService::default();
    let turn = service
        .ai_move(DEFAULT_SESSION, Some(Difficulty::Professional))
        .await
        .expect("red has moves");
    assert!(turn.mv.is_some());
    assert_eq!(turn.snapshot.current_player, Player::Blue);
    assert_eq!(turn.snapshot.difficulty, Difficulty::Amateur);
}

#[tokio::test]
async fn test_init_resets_session() {
    let service = GameService::default();
    service
        .apply_move(DEFAULT_SESSION, (6, 0), (5, 0))
        .await
        .expect("legal opening");
    let snapshot = service.init_game(DEFAULT_SESSION).await;
    assert_eq!(snapshot.current_player, Player::Red);
    assert!(snapshot.board[6][0].is_some());
}

#[tokio::test]
async fn test_named_sessions_are_capped() {
    let service = GameService::new(&ServerConfig::default().with_max_sessions(2));
    service.new_game("a", None, None).await;
    service.new_game("b", None, None).await;
    service.state("a").await.expect("a is open");
    service.new_game("c", None, None).await;

    assert_eq!(
        service.session_ids().await,
        vec!["a".to_string(), "c".to_string(), DEFAULT_SESSION.to_string()]
    );
    assert_eq!(
        service.state("b").await.expect_err("b was evicted"),
        ServiceError::SessionNotFound("b".to_string())
    );
}

#[tokio::test]
async fn test_reopening_a_session_does_not_evict() {
    let service = GameService::new(&ServerConfig::default().with_max_sessions(1));
    service.new_game("a", None, None).await;
    service.init_game("a").await;
    service.init_game(DEFAULT_SESSION).await;
    assert_eq!(
        service.session_ids().await,
        vec!["a".to_string(), DEFAULT_SESSION.to_string()]
    );
}

#[tokio::test]
async fn test_closed_session_is_gone() {
    let service = GameService::default();
    service.new_game("gone", None, None).await;
    service.close_session("gone").await.expect("open session");
    assert_eq!(
        service.close_session("gone").await.expect_err("already closed"),
        ServiceError::SessionNotFound("gone".to_string())
    );
    assert_eq!(service.session_ids().await, vec![DEFAULT_SESSION.to_string()]);
}

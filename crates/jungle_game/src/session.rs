//! Authoritative game state for one match.

use crate::action::Move;
use crate::ai::Difficulty;
use crate::board::Board;
use crate::error::RuleError;
use crate::invariants::{BoardInvariants, InvariantSet};
use crate::mode::GameMode;
use crate::rules::{self, RuleSet};
use crate::types::{Coord, Outcome, Piece, Player, Species};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// A played move and what it captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayedMove {
    /// Side that moved.
    pub player: Player,
    /// The move.
    pub mv: Move,
    /// Captured enemy piece, if any.
    pub captured: Option<Piece>,
}

/// Board, turn, outcome, and the settings a match was started with.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    current_player: Player,
    outcome: Outcome,
    mode: GameMode,
    difficulty: Difficulty,
    rules: RuleSet,
    history: Vec<PlayedMove>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameMode::default(), Difficulty::default())
    }
}

impl GameSession {
    /// Starts a match from the standard layout with Red to move.
    #[instrument]
    pub fn new(mode: GameMode, difficulty: Difficulty) -> Self {
        info!("Starting new game");
        Self {
            board: Board::starting(),
            current_player: Player::Red,
            outcome: Outcome::InProgress,
            mode,
            difficulty,
            rules: RuleSet::default(),
            history: Vec::new(),
        }
    }

    /// Replaces the rule variant.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Starts from an arbitrary position, for analysis and tests.
    pub fn from_position(board: Board, to_move: Player, rules: RuleSet) -> Self {
        Self {
            board,
            current_player: to_move,
            outcome: Outcome::InProgress,
            mode: GameMode::default(),
            difficulty: Difficulty::default(),
            rules,
            history: Vec::new(),
        }
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Game status.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Seat assignment.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// AI strength chosen for this match.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Rule variant in force.
    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    /// Moves played so far, oldest first.
    pub fn history(&self) -> &[PlayedMove] {
        &self.history
    }

    /// Changes the AI strength for the remaining moves.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Legal destinations of the piece on `from` for `player`.
    pub fn legal_moves(&self, from: Coord, player: Player) -> Vec<Coord> {
        rules::legal_moves(&self.board, from, player, self.rules)
    }

    /// Every legal move of the side to move.
    pub fn all_legal_moves(&self) -> Vec<Move> {
        rules::all_legal_moves(&self.board, self.current_player, self.rules)
    }

    /// Plays `from -> to` for the side to move.
    ///
    /// Nothing changes on error.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn apply_move(&mut self, from: Coord, to: Coord) -> Result<&Self, RuleError> {
        let mv = Move::new(from, to);

        if self.outcome.is_over() {
            warn!(%mv, "Move after game end rejected");
            return Err(RuleError::GameAlreadyOver);
        }

        if !self.legal_moves(from, self.current_player).contains(&to) {
            warn!(%mv, "Illegal move rejected");
            return Err(RuleError::IllegalMove(mv));
        }

        let effect =
            rules::resolve(&mut self.board, mv, self.rules).ok_or(RuleError::IllegalMove(mv))?;
        self.history.push(PlayedMove {
            player: self.current_player,
            mv,
            captured: effect.captured,
        });
        debug!(%mv, captured = ?effect.captured.map(|p| p.species), "Move applied");

        match effect.winner {
            Some(winner) => {
                info!(%winner, plies = self.history.len(), "Game won");
                self.outcome = Outcome::Won(winner);
            }
            None => self.current_player = self.current_player.opponent(),
        }

        debug_assert!(
            BoardInvariants::check_all(&self.board).is_ok(),
            "board invariants violated after {mv}"
        );

        Ok(self)
    }

    /// Declares the opponent the winner when the side to move is stuck.
    ///
    /// Returns the winner if the game ended here.
    #[instrument(skip(self))]
    pub fn concede_if_immobilized(&mut self) -> Option<Player> {
        if self.outcome.is_over()
            || rules::has_legal_move(&self.board, self.current_player, self.rules)
        {
            return None;
        }
        let winner = self.current_player.opponent();
        info!(%winner, "Side to move has no legal moves");
        self.outcome = Outcome::Won(winner);
        Some(winner)
    }

    /// Serializable view of the match.
    pub fn snapshot(&self) -> SessionSnapshot {
        let board = self
            .board
            .rows()
            .into_iter()
            .map(|row| row.into_iter().map(|cell| cell.map(PieceView::from)).collect())
            .collect();
        SessionSnapshot {
            board,
            current_player: self.current_player,
            game_over: self.outcome.is_over(),
            winner: self.outcome.winner(),
            mode: self.mode,
            difficulty: self.difficulty,
        }
    }
}

/// Piece as exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceView {
    /// Owning side.
    pub owner: Player,
    /// Animal.
    pub species: Species,
    /// Rank, 1 (Rat) to 8 (Elephant).
    pub rank: u8,
}

impl From<Piece> for PieceView {
    fn from(piece: Piece) -> Self {
        Self {
            owner: piece.owner,
            species: piece.species,
            rank: piece.rank(),
        }
    }
}

/// Wire view of a session: 9 rows of 7 optional pieces plus status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Row-major cells, row 0 first.
    pub board: Vec<Vec<Option<PieceView>>>,
    /// Side to move.
    pub current_player: Player,
    /// Whether the game is decided.
    pub game_over: bool,
    /// Winner once decided.
    pub winner: Option<Player>,
    /// Seat assignment.
    pub mode: GameMode,
    /// AI strength.
    pub difficulty: Difficulty,
}

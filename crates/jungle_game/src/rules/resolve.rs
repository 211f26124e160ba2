//! Move resolution and terminal detection.

use super::{RuleSet, has_legal_move};
use crate::action::Move;
use crate::board::Board;
use crate::types::{Piece, Player};

/// What a resolved move did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEffect {
    /// The piece that moved.
    pub mover: Piece,
    /// Enemy piece removed from the destination, if any.
    pub captured: Option<Piece>,
    /// Set when the move decided the game.
    pub winner: Option<Player>,
}

/// Plays an already-validated move and checks for a decided game.
///
/// The mover wins by standing on the enemy den, or by leaving the opponent
/// without a single legal move. Returns `None` if `from` is empty.
pub fn resolve(board: &mut Board, mv: Move, rules: RuleSet) -> Option<MoveEffect> {
    let mover = board.remove(mv.from)?;
    let captured = board.place(mv.to, mover);
    let player = mover.owner;

    let winner = if mv.to == player.target_den() || !has_legal_move(board, player.opponent(), rules)
    {
        Some(player)
    } else {
        None
    };

    Some(MoveEffect {
        mover,
        captured,
        winner,
    })
}

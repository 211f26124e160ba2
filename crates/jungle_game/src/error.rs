//! Rule-engine errors.
//!
//! Every variant is recoverable: validation always runs before any write, so a
//! rejected request leaves the session exactly as it was.

use crate::action::Move;

/// Error that can occur when addressing the board or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RuleError {
    /// A coordinate outside the 9x7 grid.
    #[display("Coordinate ({row}, {col}) is outside the 9x7 board")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The move is not among the legal moves of the side to move.
    #[display("Illegal move {_0}")]
    IllegalMove(Move),

    /// The game has already been decided.
    #[display("Game is already over")]
    GameAlreadyOver,
}

impl std::error::Error for RuleError {}

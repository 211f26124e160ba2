//! Jungle (Dou Shou Qi) rules engine and AI.
//!
//! A pure, synchronous core with no I/O:
//!
//! - **Board**: 9x7 grid with static river, trap, and den terrain
//! - **Rules**: legal moves, capture eligibility, move resolution
//! - **Session**: one match's board, turn, and outcome
//! - **AI**: alpha-beta negamax with difficulty tiers
//!
//! # Example
//!
//! ```
//! use jungle_game::{AiEngine, Difficulty, GameMode, GameSession};
//!
//! let mut session = GameSession::new(GameMode::Pve, Difficulty::Professional);
//! let mut engine = AiEngine::seeded(1);
//! if let Some(mv) = engine.select_move(&session, Difficulty::Beginner) {
//!     session.apply_move(mv.from, mv.to).unwrap();
//! }
//! assert_eq!(session.history().len(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod error;
mod mode;
mod session;
mod types;

pub mod ai;
pub mod invariants;
pub mod rules;

pub use action::Move;
pub use ai::{AiEngine, Difficulty, SearchProfile, TieBreak};
pub use board::{Board, terrain_at};
pub use error::RuleError;
pub use mode::GameMode;
pub use rules::{RiverCapture, RuleSet};
pub use session::{GameSession, PieceView, PlayedMove, SessionSnapshot};
pub use types::{COLS, Coord, Direction, Outcome, Piece, Player, ROWS, Species, Terrain};

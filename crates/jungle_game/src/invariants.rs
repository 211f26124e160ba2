//! First-class board invariants.
//!
//! Invariants are logical properties that must hold for every reachable
//! board. They are testable independently and are checked after every applied
//! move in debug builds.

use crate::board::{Board, terrain_at};
use crate::types::{Player, Species, Terrain};
use strum::IntoEnumIterator;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: only the Rat ever stands in the river.
pub struct OnlyRatsSwim;

impl Invariant<Board> for OnlyRatsSwim {
    fn holds(board: &Board) -> bool {
        board
            .occupied()
            .all(|(coord, piece)| !terrain_at(coord).is_river() || piece.species.swims())
    }

    fn description() -> &'static str {
        "Only Rats occupy river cells"
    }
}

/// Invariant: no player's piece stands on its own den.
pub struct OwnDenEmpty;

impl Invariant<Board> for OwnDenEmpty {
    fn holds(board: &Board) -> bool {
        board
            .occupied()
            .all(|(coord, piece)| terrain_at(coord) != Terrain::Den(piece.owner))
    }

    fn description() -> &'static str {
        "No piece stands on its own den"
    }
}

/// Invariant: each side has at most one piece of each rank.
///
/// Together with one slot per cell this bounds the board at 16 pieces.
pub struct UniqueRanks;

impl Invariant<Board> for UniqueRanks {
    fn holds(board: &Board) -> bool {
        Player::iter().all(|player| {
            Species::iter().all(|species| {
                board
                    .pieces_of(player)
                    .filter(|(_, piece)| piece.species == species)
                    .count()
                    <= 1
            })
        })
    }

    fn description() -> &'static str {
        "Each side holds at most one piece per rank"
    }
}

/// All board invariants as a composable set.
pub type BoardInvariants = (OnlyRatsSwim, OwnDenEmpty, UniqueRanks);

//! First-class move type.
//!
//! Moves are plain values: produced by the rule engine or the AI, validated
//! against the legal-move set, and consumed by the session.

use crate::types::Coord;
use serde::Serialize;

/// A move from one cell to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    /// Source cell.
    pub from: Coord,
    /// Destination cell.
    pub to: Coord,
}

impl Move {
    /// Creates a new move.
    pub const fn new(from: Coord, to: Coord) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

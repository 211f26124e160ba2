//! Core domain types for Jungle.

use crate::error::RuleError;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Number of rows on the board.
pub const ROWS: usize = 9;

/// Number of columns on the board.
pub const COLS: usize = 7;

/// Number of cells on the board.
pub const CELLS: usize = ROWS * COLS;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// Red starts on rows 6-8 and moves first.
    Red,
    /// Blue starts on rows 0-2.
    Blue,
}

impl Player {
    /// Returns the opponent player.
    pub const fn opponent(self) -> Self {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    /// Returns the den owned by this player.
    pub const fn den(self) -> Coord {
        match self {
            Player::Red => Coord { row: 8, col: 3 },
            Player::Blue => Coord { row: 0, col: 3 },
        }
    }

    /// Returns the den this player is trying to invade.
    pub const fn target_den(self) -> Coord {
        self.opponent().den()
    }

    /// Lowercase label used in logs and on the wire.
    pub const fn label(self) -> &'static str {
        match self {
            Player::Red => "red",
            Player::Blue => "blue",
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The eight animal kinds, ordered by rank.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    /// Rank 1. Swims, and captures the Elephant.
    Rat,
    /// Rank 2.
    Cat,
    /// Rank 3.
    Dog,
    /// Rank 4.
    Wolf,
    /// Rank 5.
    Leopard,
    /// Rank 6. Jumps the river.
    Tiger,
    /// Rank 7. Jumps the river.
    Lion,
    /// Rank 8.
    Elephant,
}

impl Species {
    /// Capture strength, 1 (Rat) through 8 (Elephant).
    pub const fn rank(self) -> u8 {
        match self {
            Species::Rat => 1,
            Species::Cat => 2,
            Species::Dog => 3,
            Species::Wolf => 4,
            Species::Leopard => 5,
            Species::Tiger => 6,
            Species::Lion => 7,
            Species::Elephant => 8,
        }
    }

    /// Whether this species may enter river cells.
    pub const fn swims(self) -> bool {
        matches!(self, Species::Rat)
    }

    /// Whether this species may jump across the river.
    pub const fn jumps_river(self) -> bool {
        matches!(self, Species::Lion | Species::Tiger)
    }

    /// Single-letter symbol used in board renderings.
    pub const fn symbol(self) -> char {
        match self {
            Species::Rat => 'r',
            Species::Cat => 'c',
            Species::Dog => 'd',
            Species::Wolf => 'w',
            Species::Leopard => 'p',
            Species::Tiger => 't',
            Species::Lion => 'l',
            Species::Elephant => 'e',
        }
    }
}

/// A piece on the board.
///
/// Pieces carry no identity beyond their species and owner; at most one piece
/// occupies a cell, so a coordinate identifies a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    /// Owning player.
    pub owner: Player,
    /// Animal kind.
    pub species: Species,
}

impl Piece {
    /// Creates a new piece.
    pub const fn new(owner: Player, species: Species) -> Self {
        Self { owner, species }
    }

    /// Capture strength of this piece.
    pub const fn rank(self) -> u8 {
        self.species.rank()
    }
}

/// A cell on the 9x7 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// Creates a coordinate, rejecting anything outside the grid.
    pub fn new(row: usize, col: usize) -> Result<Self, RuleError> {
        if row >= ROWS || col >= COLS {
            return Err(RuleError::OutOfBounds { row, col });
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Row index, 0 at Blue's home edge.
    pub const fn row(self) -> usize {
        self.row as usize
    }

    /// Column index.
    pub const fn col(self) -> usize {
        self.col as usize
    }

    /// Row-major cell index.
    pub const fn index(self) -> usize {
        self.row() * COLS + self.col()
    }

    /// Inverse of [`Coord::index`].
    pub const fn from_index(index: usize) -> Self {
        Self {
            row: (index / COLS) as u8,
            col: (index % COLS) as u8,
        }
    }

    /// Steps one cell in `direction`, returning `None` off the board.
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dr, dc) = direction.delta();
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if row < 0 || col < 0 || row as usize >= ROWS || col as usize >= COLS {
            return None;
        }
        Some(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Manhattan distance between two cells.
    pub fn distance(self, other: Coord) -> usize {
        self.row().abs_diff(other.row()) + self.col().abs_diff(other.col())
    }

    /// All 63 cells in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..CELLS).map(Coord::from_index)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Orthogonal direction, listed in move-enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    /// Toward row 0.
    Up,
    /// Toward row 8.
    Down,
    /// Toward column 0.
    Left,
    /// Toward column 6.
    Right,
}

impl Direction {
    /// Enumeration order used by the rule engine.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Row/column delta of one step.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Static classification of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "owner")]
pub enum Terrain {
    /// Plain land.
    Normal,
    /// Water; only the Rat may stand here.
    River,
    /// A player's home square.
    Den(Player),
    /// Trap owned by a player; enemies standing on it lose their rank.
    Trap(Player),
}

impl Terrain {
    /// Whether this is a river cell.
    pub const fn is_river(self) -> bool {
        matches!(self, Terrain::River)
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win. Terminal.
    Won(Player),
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Won(player) => Some(player),
            Outcome::InProgress => None,
        }
    }

    /// Returns true once the game has been decided.
    pub fn is_over(self) -> bool {
        matches!(self, Outcome::Won(_))
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Won(player) => write!(f, "Player {} wins", player),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_ranks_are_a_strict_order() {
        let ranks: Vec<u8> = Species::iter().map(Species::rank).collect();
        assert_eq!(ranks, (1..=8).collect::<Vec<u8>>());
    }

    #[test]
    fn test_coord_rejects_out_of_bounds() {
        assert!(Coord::new(8, 6).is_ok());
        assert_eq!(
            Coord::new(9, 0),
            Err(RuleError::OutOfBounds { row: 9, col: 0 })
        );
        assert_eq!(
            Coord::new(0, 7),
            Err(RuleError::OutOfBounds { row: 0, col: 7 })
        );
    }

    #[test]
    fn test_step_stops_at_edges() {
        let corner = Coord::from_index(0);
        assert_eq!(corner.step(Direction::Up), None);
        assert_eq!(corner.step(Direction::Left), None);
        assert_eq!(corner.step(Direction::Down), Some(Coord::from_index(7)));
    }

    #[test]
    fn test_dens_face_each_other() {
        assert_eq!(Player::Red.den().index(), 8 * COLS + 3);
        assert_eq!(Player::Red.target_den(), Player::Blue.den());
    }
}

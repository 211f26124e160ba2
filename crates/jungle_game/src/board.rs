//! The 9x7 board: piece placement and static terrain.

use crate::error::RuleError;
use crate::types::{CELLS, COLS, Coord, Piece, Player, ROWS, Species, Terrain};
use tracing::instrument;

/// Terrain of every cell, row-major, built at compile time.
const TERRAIN: [Terrain; CELLS] = build_terrain();

const fn build_terrain() -> [Terrain; CELLS] {
    let mut table = [Terrain::Normal; CELLS];

    // Two 3x2 lakes: rows 3-5, columns 1-2 and 4-5.
    let mut row = 3;
    while row <= 5 {
        table[row * COLS + 1] = Terrain::River;
        table[row * COLS + 2] = Terrain::River;
        table[row * COLS + 4] = Terrain::River;
        table[row * COLS + 5] = Terrain::River;
        row += 1;
    }

    table[3] = Terrain::Den(Player::Blue);
    table[2] = Terrain::Trap(Player::Blue);
    table[4] = Terrain::Trap(Player::Blue);
    table[COLS + 3] = Terrain::Trap(Player::Blue);

    table[8 * COLS + 3] = Terrain::Den(Player::Red);
    table[8 * COLS + 2] = Terrain::Trap(Player::Red);
    table[8 * COLS + 4] = Terrain::Trap(Player::Red);
    table[7 * COLS + 3] = Terrain::Trap(Player::Red);

    table
}

/// Returns the terrain of a cell.
pub fn terrain_at(coord: Coord) -> Terrain {
    TERRAIN[coord.index()]
}

/// Home placement shared by both sides: Blue as listed, Red point-mirrored.
const HOME_LAYOUT: [(Species, usize, usize); 8] = [
    (Species::Elephant, 0, 0),
    (Species::Lion, 0, 6),
    (Species::Cat, 1, 0),
    (Species::Tiger, 1, 1),
    (Species::Leopard, 1, 5),
    (Species::Wolf, 2, 0),
    (Species::Rat, 2, 2),
    (Species::Dog, 2, 6),
];

/// 9x7 Jungle board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Cells in row-major order; one slot per cell keeps occupancy single.
    cells: [Option<Piece>; CELLS],
}

impl Board {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Self {
            cells: [None; CELLS],
        }
    }

    /// Creates a board in the standard starting layout.
    #[instrument]
    pub fn starting() -> Self {
        let mut board = Self::empty();
        for (species, row, col) in HOME_LAYOUT {
            let blue = Coord::from_index(row * COLS + col);
            let red = Coord::from_index((ROWS - 1 - row) * COLS + (COLS - 1 - col));
            board.place(blue, Piece::new(Player::Blue, species));
            board.place(red, Piece::new(Player::Red, species));
        }
        board
    }

    /// Returns the piece on a cell, if any.
    pub fn piece_at(&self, coord: Coord) -> Option<Piece> {
        self.cells[coord.index()]
    }

    /// Returns the piece at raw `(row, col)`, failing outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Result<Option<Piece>, RuleError> {
        Ok(self.piece_at(Coord::new(row, col)?))
    }

    /// Puts a piece on a cell, returning whatever it displaced.
    ///
    /// No legality checking; the rule engine is the only caller during play.
    pub fn place(&mut self, coord: Coord, piece: Piece) -> Option<Piece> {
        self.cells[coord.index()].replace(piece)
    }

    /// Clears a cell, returning the piece that stood there.
    pub fn remove(&mut self, coord: Coord) -> Option<Piece> {
        self.cells[coord.index()].take()
    }

    /// Returns the terrain of a cell.
    pub fn terrain_at(&self, coord: Coord) -> Terrain {
        terrain_at(coord)
    }

    /// Iterates over every occupied cell in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.map(|piece| (Coord::from_index(idx), piece)))
    }

    /// Iterates over one player's pieces in row-major order.
    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.owner == player)
    }

    /// Number of pieces a player has left.
    pub fn piece_count(&self, player: Player) -> usize {
        self.pieces_of(player).count()
    }

    /// Finds a player's piece of a given species.
    pub fn find(&self, player: Player, species: Species) -> Option<Coord> {
        self.pieces_of(player)
            .find(|(_, piece)| piece.species == species)
            .map(|(coord, _)| coord)
    }

    /// Rows of optional pieces, top (row 0) first.
    pub fn rows(&self) -> Vec<Vec<Option<Piece>>> {
        self.cells.chunks(COLS).map(|row| row.to_vec()).collect()
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Red pieces are upper-case, Blue lower-case; `~` is river, `#` a trap,
    /// `@` a den.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for (idx, cell) in self.cells.iter().enumerate() {
            let coord = Coord::from_index(idx);
            let symbol = match cell {
                Some(piece) if piece.owner == Player::Red => {
                    piece.species.symbol().to_ascii_uppercase()
                }
                Some(piece) => piece.species.symbol(),
                None => match terrain_at(coord) {
                    Terrain::Normal => '.',
                    Terrain::River => '~',
                    Terrain::Trap(_) => '#',
                    Terrain::Den(_) => '@',
                },
            };
            result.push(symbol);
            if coord.col() == COLS - 1 {
                if coord.row() < ROWS - 1 {
                    result.push('\n');
                }
            } else {
                result.push(' ');
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn at(row: usize, col: usize) -> Coord {
        Coord::new(row, col).unwrap()
    }

    #[test]
    fn test_river_cells() {
        let river: Vec<Coord> = Coord::all()
            .filter(|c| terrain_at(*c) == Terrain::River)
            .collect();
        assert_eq!(river.len(), 12);
        assert!(river.contains(&at(3, 1)));
        assert!(river.contains(&at(5, 5)));
        assert!(!river.contains(&at(4, 3)));
    }

    #[test]
    fn test_dens_and_traps() {
        assert_eq!(terrain_at(at(0, 3)), Terrain::Den(Player::Blue));
        assert_eq!(terrain_at(at(8, 3)), Terrain::Den(Player::Red));
        for (row, col) in [(0, 2), (0, 4), (1, 3)] {
            assert_eq!(terrain_at(at(row, col)), Terrain::Trap(Player::Blue));
        }
        for (row, col) in [(8, 2), (8, 4), (7, 3)] {
            assert_eq!(terrain_at(at(row, col)), Terrain::Trap(Player::Red));
        }
    }

    #[test]
    fn test_starting_layout_has_one_piece_per_rank() {
        let board = Board::starting();
        for player in Player::iter() {
            assert_eq!(board.piece_count(player), 8);
            for species in Species::iter() {
                assert!(board.find(player, species).is_some());
            }
            assert!(board.piece_at(player.den()).is_none());
        }
        assert_eq!(
            board.piece_at(at(6, 4)),
            Some(Piece::new(Player::Red, Species::Rat))
        );
        assert_eq!(
            board.piece_at(at(0, 0)),
            Some(Piece::new(Player::Blue, Species::Elephant))
        );
    }

    #[test]
    fn test_get_out_of_bounds() {
        let board = Board::starting();
        assert_eq!(
            board.get(9, 3),
            Err(RuleError::OutOfBounds { row: 9, col: 3 })
        );
        assert!(board.get(8, 0).unwrap().is_some());
    }

    #[test]
    fn test_place_replaces_occupant() {
        let mut board = Board::empty();
        let cell = at(4, 3);
        assert_eq!(board.place(cell, Piece::new(Player::Red, Species::Cat)), None);
        let displaced = board.place(cell, Piece::new(Player::Blue, Species::Dog));
        assert_eq!(displaced, Some(Piece::new(Player::Red, Species::Cat)));
        assert_eq!(board.occupied().count(), 1);
        assert_eq!(board.remove(cell), Some(Piece::new(Player::Blue, Species::Dog)));
        assert_eq!(board.piece_at(cell), None);
    }

    #[test]
    fn test_display_marks_terrain() {
        let text = Board::empty().display();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), ROWS);
        assert_eq!(lines[0], ". . # @ # . .");
        assert_eq!(lines[4], ". ~ ~ . ~ ~ .");
    }
}

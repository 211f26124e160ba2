//! Search cache keyed by Zobrist hash of the position and side to move.

use crate::action::Move;
use crate::board::Board;
use crate::types::{CELLS, Piece, Player};
use std::collections::HashMap;

/// Entries held before the table is wiped and refilled.
const MAX_ENTRIES: usize = 100_000;

/// Keys per cell: two owners times eight ranks.
const PIECE_KINDS: usize = 16;

const KEYS: [u64; CELLS * PIECE_KINDS + 1] = build_keys();

const fn splitmix64(state: u64) -> u64 {
    let mut z = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

const fn build_keys() -> [u64; CELLS * PIECE_KINDS + 1] {
    let mut keys = [0; CELLS * PIECE_KINDS + 1];
    let mut state = 0x4A55_4E47_4C45_0001;
    let mut i = 0;
    while i < keys.len() {
        state = splitmix64(state);
        keys[i] = state;
        i += 1;
    }
    keys
}

fn piece_kind(piece: Piece) -> usize {
    let owner = match piece.owner {
        Player::Red => 0,
        Player::Blue => 8,
    };
    owner + usize::from(piece.rank() - 1)
}

/// Hash of a position with `to_move` on turn.
pub(crate) fn position_key(board: &Board, to_move: Player) -> u64 {
    let pieces = board
        .occupied()
        .fold(0, |key, (coord, piece)| {
            key ^ KEYS[coord.index() * PIECE_KINDS + piece_kind(piece)]
        });
    match to_move {
        Player::Red => pieces,
        Player::Blue => pieces ^ KEYS[CELLS * PIECE_KINDS],
    }
}

/// How a stored score relates to the true value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Entry {
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

/// Position cache for one search job.
#[derive(Debug, Default)]
pub(crate) struct TranspositionTable {
    entries: HashMap<u64, Entry>,
    hits: u64,
}

impl TranspositionTable {
    pub fn lookup(&mut self, key: u64) -> Option<Entry> {
        let hit = self.entries.get(&key).copied();
        if hit.is_some() {
            self.hits += 1;
        }
        hit
    }

    /// Keeps the deeper of two results for the same position.
    pub fn store(&mut self, key: u64, entry: Entry) {
        if self.entries.len() >= MAX_ENTRIES && !self.entries.contains_key(&key) {
            self.entries.clear();
        }
        match self.entries.get(&key) {
            Some(existing) if existing.depth > entry.depth => {}
            _ => {
                self.entries.insert(key, entry);
            }
        }
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coord, Species};

    fn at(row: usize, col: usize) -> Coord {
        Coord::new(row, col).unwrap()
    }

    #[test]
    fn test_key_depends_on_side_to_move() {
        let board = Board::starting();
        assert_ne!(
            position_key(&board, Player::Red),
            position_key(&board, Player::Blue)
        );
    }

    #[test]
    fn test_transposed_moves_reach_same_key() {
        let mut a = Board::empty();
        a.place(at(4, 0), Piece::new(Player::Red, Species::Dog));
        a.place(at(2, 6), Piece::new(Player::Blue, Species::Cat));
        let mut b = a.clone();
        b.remove(at(4, 0));
        b.place(at(4, 0), Piece::new(Player::Red, Species::Dog));
        assert_eq!(position_key(&a, Player::Red), position_key(&b, Player::Red));

        b.remove(at(4, 0));
        b.place(at(5, 0), Piece::new(Player::Red, Species::Dog));
        assert_ne!(position_key(&a, Player::Red), position_key(&b, Player::Red));
    }

    #[test]
    fn test_shallower_result_does_not_replace_deeper() {
        let mut table = TranspositionTable::default();
        let entry = |depth, score| Entry {
            depth,
            score,
            bound: Bound::Exact,
            best_move: None,
        };
        table.store(7, entry(4, 10));
        table.store(7, entry(2, -5));
        let got = table.lookup(7).expect("stored entry");
        assert_eq!((got.depth, got.score), (4, 10));
        table.store(7, entry(4, 3));
        assert_eq!(table.lookup(7).map(|e| e.score), Some(3));
        assert_eq!(table.hits(), 2);
    }
}

//! Legal destination enumeration.

use super::{RuleSet, can_capture};
use crate::action::Move;
use crate::board::{Board, terrain_at};
use crate::types::{Coord, Direction, Piece, Player, Terrain};

/// Returns the legal destinations for the piece on `from`.
///
/// Empty when `from` is empty or the piece there does not belong to `player`.
/// Destinations come out in direction order (up, down, left, right), each
/// direction's step before its river jump.
pub fn legal_moves(board: &Board, from: Coord, player: Player, rules: RuleSet) -> Vec<Coord> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };
    if piece.owner != player {
        return Vec::new();
    }

    candidates(board, from, piece)
        .into_iter()
        .filter(|to| destination_allowed(board, from, piece, *to, rules))
        .collect()
}

/// Returns every legal move of `player`, source cells in row-major order.
pub fn all_legal_moves(board: &Board, player: Player, rules: RuleSet) -> Vec<Move> {
    board
        .pieces_of(player)
        .flat_map(|(from, _)| {
            legal_moves(board, from, player, rules)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
        .collect()
}

/// Whether `player` has at least one legal move.
pub fn has_legal_move(board: &Board, player: Player, rules: RuleSet) -> bool {
    board.pieces_of(player).any(|(from, piece)| {
        candidates(board, from, piece)
            .into_iter()
            .any(|to| destination_allowed(board, from, piece, to, rules))
    })
}

fn candidates(board: &Board, from: Coord, piece: Piece) -> Vec<Coord> {
    let mut out = Vec::with_capacity(8);
    for direction in Direction::ALL {
        let Some(next) = from.step(direction) else {
            continue;
        };
        out.push(next);
        if piece.species.jumps_river()
            && terrain_at(next).is_river()
            && let Some(landing) = jump_landing(board, next, direction)
        {
            out.push(landing);
        }
    }
    out
}

/// Walks across the river from its first cell and returns the far bank.
///
/// Any piece swimming on the path blocks the jump.
fn jump_landing(board: &Board, mut cell: Coord, direction: Direction) -> Option<Coord> {
    while terrain_at(cell).is_river() {
        if board.piece_at(cell).is_some() {
            return None;
        }
        cell = cell.step(direction)?;
    }
    Some(cell)
}

fn destination_allowed(board: &Board, from: Coord, piece: Piece, to: Coord, rules: RuleSet) -> bool {
    let terrain = terrain_at(to);

    if terrain.is_river() && !piece.species.swims() {
        return false;
    }

    if terrain == Terrain::Den(piece.owner) {
        return false;
    }

    match board.piece_at(to) {
        None => true,
        Some(occupant) if occupant.owner == piece.owner => false,
        Some(occupant) => can_capture(piece, terrain_at(from), occupant, terrain, rules),
    }
}

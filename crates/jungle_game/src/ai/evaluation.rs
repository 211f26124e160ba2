//! Static position evaluation.
//!
//! Scores are relative to the side being evaluated and symmetric: the score
//! for one side is the negation of the score for the other.

use crate::action::Move;
use crate::board::{Board, terrain_at};
use crate::rules::{RuleSet, all_legal_moves};
use crate::types::{Coord, Piece, Player, ROWS, Species, Terrain};

/// Tunable weights of the evaluation terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalWeights {
    /// Material value by rank, Rat first.
    pub material: [i32; 8],
    /// Extra Rat value while the enemy Elephant is alive.
    pub rat_threat: i32,
    /// Per row advanced from the home edge.
    pub advance: i32,
    /// Flat positional value of a river cell.
    pub river_cell: i32,
    /// Bonus for a Rat in the river.
    pub rat_in_river: i32,
    /// Per step closer than three to the enemy den.
    pub den_pressure: i32,
    /// Per surviving piece.
    pub piece_count: i32,
    /// Divisor applied to the value of a piece standing in an enemy trap.
    pub trapped_divisor: i32,
    /// Bonus for holding a rank 6+ piece when the opponent has none.
    pub heavy_monopoly: i32,
    /// Per legal move.
    pub mobility: i32,
    /// Per rank of a piece an enemy can capture next move, per attacker.
    pub danger: i32,
    /// Multiplier on `danger` for a piece standing in an enemy trap.
    pub trapped_danger: i32,
    /// Per Lion or Tiger with a river jump available.
    pub jump_ready: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            material: [150, 220, 330, 440, 500, 800, 900, 1000],
            rat_threat: 100,
            advance: 10,
            river_cell: 5,
            rat_in_river: 30,
            den_pressure: 30,
            piece_count: 50,
            trapped_divisor: 2,
            heavy_monopoly: 100,
            mobility: 2,
            danger: 15,
            trapped_danger: 2,
            jump_ready: 20,
        }
    }
}

impl EvalWeights {
    /// Material value of a piece.
    pub fn value(&self, species: Species) -> i32 {
        self.material[usize::from(species.rank() - 1)]
    }
}

/// Evaluates `board` from `player`'s point of view.
pub fn evaluate(board: &Board, player: Player, rules: RuleSet, weights: &EvalWeights) -> i32 {
    let opponent = player.opponent();
    let my_moves = all_legal_moves(board, player, rules);
    let their_moves = all_legal_moves(board, opponent, rules);

    let material = side_score(board, player, weights) - side_score(board, opponent, weights);
    let mobility = (my_moves.len() as i32 - their_moves.len() as i32) * weights.mobility;
    let threats =
        threat_score(board, &my_moves, weights) - threat_score(board, &their_moves, weights);
    let jumps = (jumpers(&my_moves) - jumpers(&their_moves)) * weights.jump_ready;

    material + mobility + threats + jumps
}

/// Value of the enemy pieces `moves` could capture.
fn threat_score(board: &Board, moves: &[Move], weights: &EvalWeights) -> i32 {
    moves
        .iter()
        .filter_map(|mv| board.piece_at(mv.to).map(|victim| (mv.to, victim)))
        .map(|(at, victim)| {
            let threat = i32::from(victim.rank()) * weights.danger;
            if terrain_at(at) == Terrain::Trap(victim.owner.opponent()) {
                threat * weights.trapped_danger
            } else {
                threat
            }
        })
        .sum()
}

/// Number of pieces with a river jump among `moves`.
fn jumpers(moves: &[Move]) -> i32 {
    let mut sources: Vec<Coord> = moves
        .iter()
        .filter(|mv| mv.from.distance(mv.to) > 1)
        .map(|mv| mv.from)
        .collect();
    sources.dedup();
    sources.len() as i32
}

fn side_score(board: &Board, player: Player, weights: &EvalWeights) -> i32 {
    let enemy = player.opponent();
    let enemy_elephant = board.find(enemy, Species::Elephant).is_some();
    let mut score = 0;
    let mut count = 0;
    let mut heavy = false;

    for (coord, piece) in board.pieces_of(player) {
        count += 1;
        heavy |= piece.rank() >= 6;
        score += piece_score(coord, piece, enemy_elephant, weights);
    }

    let enemy_heavy = board.pieces_of(enemy).any(|(_, piece)| piece.rank() >= 6);
    if heavy && !enemy_heavy {
        score += weights.heavy_monopoly;
    }

    score + count * weights.piece_count
}

fn piece_score(coord: Coord, piece: Piece, enemy_elephant: bool, weights: &EvalWeights) -> i32 {
    let player = piece.owner;
    let mut value = weights.value(piece.species);
    if piece.species == Species::Rat && enemy_elephant {
        value += weights.rat_threat;
    }

    let terrain = terrain_at(coord);
    if terrain == Terrain::Trap(player.opponent()) {
        value /= weights.trapped_divisor.max(1);
    }

    let positional = if terrain.is_river() {
        weights.river_cell
            + if piece.species == Species::Rat {
                weights.rat_in_river
            } else {
                0
            }
    } else {
        let advanced = match player {
            Player::Red => ROWS - 1 - coord.row(),
            Player::Blue => coord.row(),
        };
        advanced as i32 * weights.advance
    };

    let distance = coord.distance(player.target_den());
    let pressure = if distance <= 2 {
        (3 - distance as i32) * weights.den_pressure
    } else {
        0
    };

    value + positional + pressure
}

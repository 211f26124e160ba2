//! Alpha-beta negamax over cloned boards.

use super::evaluation::{EvalWeights, evaluate};
use super::transposition::{Bound, Entry, TranspositionTable, position_key};
use crate::action::Move;
use crate::board::Board;
use crate::rules::{RuleSet, all_legal_moves, resolve};
use crate::types::Player;
use rayon::prelude::*;
use std::cmp::Reverse;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, trace};

/// Score of a decided game. Wins found at ply `p` score `WIN_SCORE - p`.
pub const WIN_SCORE: i32 = 1_000_000;

/// Scores at or beyond this magnitude are forced results.
const FORCED: i32 = WIN_SCORE - 1_000;

/// Nodes visited between deadline checks.
const CHECK_INTERVAL: u64 = 1024;

/// Search score of one root move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootScore {
    /// The candidate move.
    pub mv: Move,
    /// Negamax score from the mover's side.
    pub score: i32,
}

struct Context<'a> {
    rules: RuleSet,
    weights: &'a EvalWeights,
    deadline: Option<Instant>,
    nodes: u64,
    table: TranspositionTable,
}

impl Context<'_> {
    fn expired(&mut self) -> bool {
        self.nodes += 1;
        match self.deadline {
            Some(deadline) => self.nodes % CHECK_INTERVAL == 0 && Instant::now() >= deadline,
            None => false,
        }
    }
}

/// Scores every legal move of `player`, in enumeration order.
///
/// With a `budget` the search deepens one ply at a time up to `max_depth` and
/// keeps the scores of the deepest iteration that finished before the
/// deadline. Depth 1 is never cut short. Without a budget `max_depth` is
/// searched directly.
#[instrument(skip(board, weights))]
pub fn score_root_moves(
    board: &Board,
    player: Player,
    rules: RuleSet,
    weights: &EvalWeights,
    max_depth: u8,
    budget: Option<Duration>,
) -> Vec<RootScore> {
    let max_depth = max_depth.max(1);
    let Some(budget) = budget else {
        return search_root(board, player, max_depth, rules, weights, None).unwrap_or_default();
    };

    let deadline = Instant::now() + budget;
    let mut best = search_root(board, player, 1, rules, weights, None).unwrap_or_default();
    debug!(depth = 1, moves = best.len(), "Search iteration complete");

    for depth in 2..=max_depth {
        if forced_win(&best) || Instant::now() >= deadline {
            break;
        }
        match search_root(board, player, depth, rules, weights, Some(deadline)) {
            Some(scores) => {
                debug!(depth, "Search iteration complete");
                best = scores;
            }
            None => {
                debug!(depth, "Search iteration overran budget, discarded");
                break;
            }
        }
    }

    best
}

fn forced_win(scores: &[RootScore]) -> bool {
    scores.iter().any(|root| root.score >= FORCED)
}

/// Scores each root move at `depth` plies; `None` if the deadline passed.
fn search_root(
    board: &Board,
    player: Player,
    depth: u8,
    rules: RuleSet,
    weights: &EvalWeights,
    deadline: Option<Instant>,
) -> Option<Vec<RootScore>> {
    let moves = all_legal_moves(board, player, rules);

    moves
        .par_iter()
        .map(|&mv| {
            let mut ctx = Context {
                rules,
                weights,
                deadline,
                nodes: 0,
                table: TranspositionTable::default(),
            };
            let mut child = board.clone();
            let effect = resolve(&mut child, mv, rules)?;
            let score = if effect.winner.is_some() {
                WIN_SCORE - 1
            } else {
                -negamax(
                    &child,
                    player.opponent(),
                    depth - 1,
                    -WIN_SCORE,
                    WIN_SCORE,
                    1,
                    &mut ctx,
                )?
            };
            trace!(
                %mv,
                score,
                nodes = ctx.nodes,
                cache_hits = ctx.table.hits(),
                "Root move scored"
            );
            Some(RootScore { mv, score })
        })
        .collect()
}

fn negamax(
    board: &Board,
    to_move: Player,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    ply: i32,
    ctx: &mut Context<'_>,
) -> Option<i32> {
    if ctx.expired() {
        return None;
    }

    let key = position_key(board, to_move);
    let mut hint = None;
    if depth > 0
        && let Some(entry) = ctx.table.lookup(key)
    {
        hint = entry.best_move;
        if entry.depth >= depth {
            let score = from_table(entry.score, ply);
            match entry.bound {
                Bound::Exact => return Some(score),
                Bound::Lower if score >= beta => return Some(score),
                Bound::Upper if score <= alpha => return Some(score),
                _ => {}
            }
        }
    }

    let mut moves = all_legal_moves(board, to_move, ctx.rules);
    if moves.is_empty() {
        return Some(-(WIN_SCORE - ply));
    }
    if depth == 0 {
        return Some(evaluate(board, to_move, ctx.rules, ctx.weights));
    }

    moves.sort_by_key(|mv| {
        let hinted = if Some(*mv) == hint { 10_000 } else { 0 };
        Reverse(hinted + ordering_key(board, to_move, *mv))
    });

    let alpha_start = alpha;
    let mut best = -WIN_SCORE;
    let mut best_move = None;
    for mv in moves {
        let mut child = board.clone();
        let Some(effect) = resolve(&mut child, mv, ctx.rules) else {
            continue;
        };
        let score = if effect.winner.is_some() {
            WIN_SCORE - (ply + 1)
        } else {
            -negamax(
                &child,
                to_move.opponent(),
                depth - 1,
                -beta,
                -alpha,
                ply + 1,
                ctx,
            )?
        };
        if score > best {
            best = score;
            best_move = Some(mv);
        }
        alpha = alpha.max(score);
        if alpha >= beta {
            break;
        }
    }

    let bound = if best <= alpha_start {
        Bound::Upper
    } else if best >= beta {
        Bound::Lower
    } else {
        Bound::Exact
    };
    ctx.table.store(
        key,
        Entry {
            depth,
            score: to_table(best, ply),
            bound,
            best_move,
        },
    );

    Some(best)
}

/// Forced scores are cached as distance from the storing node.
fn to_table(score: i32, ply: i32) -> i32 {
    if score >= FORCED {
        score + ply
    } else if score <= -FORCED {
        score - ply
    } else {
        score
    }
}

fn from_table(score: i32, ply: i32) -> i32 {
    if score >= FORCED {
        score - ply
    } else if score <= -FORCED {
        score + ply
    } else {
        score
    }
}

/// Captures of valuable pieces first, then den entry, then moves toward the
/// enemy den.
fn ordering_key(board: &Board, player: Player, mv: Move) -> i32 {
    let target = player.target_den();
    let victim = board
        .piece_at(mv.to)
        .map_or(0, |piece| i32::from(piece.rank()) * 100);
    let den = if mv.to == target { 1000 } else { 0 };
    let approach = (12 - mv.to.distance(target) as i32) * 5;
    victim + den + approach
}

//! Search-based AI opponent.
//!
//! The engine never mutates a session. It reads the position, searches cloned
//! boards, and hands back a move for the caller to apply through the normal
//! move path.

mod difficulty;
mod evaluation;
mod search;
mod transposition;

pub use difficulty::{Difficulty, SearchProfile, TieBreak};
pub use evaluation::{EvalWeights, evaluate};
pub use search::{RootScore, WIN_SCORE, score_root_moves};

use crate::action::Move;
use crate::board::Board;
use crate::rules::{RuleSet, all_legal_moves};
use crate::session::GameSession;
use crate::types::Player;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, instrument};

/// Move selector for computer-controlled sides.
#[derive(Debug, Clone)]
pub struct AiEngine {
    rng: StdRng,
    weights: EvalWeights,
    time_budget: Option<Duration>,
}

impl Default for AiEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AiEngine {
    /// Creates an engine seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Creates an engine with a fixed seed, for reproducible play.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            weights: EvalWeights::default(),
            time_budget: None,
        }
    }

    /// Replaces the time budget of tiers that search under one.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Replaces the evaluation weights.
    pub fn with_weights(mut self, weights: EvalWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Picks a move for the side to move in `session`.
    ///
    /// Returns `None` when the game is over or the side to move is stuck.
    #[instrument(skip(self, session), fields(player = %session.current_player()))]
    pub fn select_move(&mut self, session: &GameSession, difficulty: Difficulty) -> Option<Move> {
        if session.outcome().is_over() {
            return None;
        }
        self.choose(
            session.board(),
            session.current_player(),
            session.rules(),
            difficulty,
        )
    }

    /// Picks a move for `player` on a bare board.
    pub fn choose(
        &mut self,
        board: &Board,
        player: Player,
        rules: RuleSet,
        difficulty: Difficulty,
    ) -> Option<Move> {
        let mut profile = difficulty.profile();
        if profile.time_budget.is_some() && self.time_budget.is_some() {
            profile.time_budget = self.time_budget;
        }
        self.choose_with_profile(board, player, rules, profile)
    }

    /// Picks a move under an explicit search profile.
    pub fn choose_with_profile(
        &mut self,
        board: &Board,
        player: Player,
        rules: RuleSet,
        profile: SearchProfile,
    ) -> Option<Move> {
        let moves = all_legal_moves(board, player, rules);
        if moves.is_empty() {
            debug!("No legal moves");
            return None;
        }

        if profile.randomness > 0.0 && self.rng.random_bool(profile.randomness) {
            let mv = moves.choose(&mut self.rng).copied();
            debug!(?mv, "Playing random move");
            return mv;
        }

        let scores = score_root_moves(
            board,
            player,
            rules,
            &self.weights,
            profile.depth,
            profile.time_budget,
        );
        let best = scores.iter().map(|root| root.score).max()?;
        let tied: Vec<Move> = scores
            .iter()
            .filter(|root| root.score == best)
            .map(|root| root.mv)
            .collect();

        let mv = match profile.tie_break {
            TieBreak::FirstInOrder => tied.first().copied(),
            TieBreak::Random => tied.choose(&mut self.rng).copied(),
        };
        debug!(?mv, score = best, ties = tied.len(), "Search chose move");
        mv
    }
}

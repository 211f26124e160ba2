//! Difficulty tiers and the search settings they map to.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum::{Display, EnumIter, EnumString};
use tracing::instrument;

/// AI strength, weakest first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Mostly random moves, one ply of lookahead otherwise.
    Beginner,
    /// Frequently random, two plies.
    Easy,
    /// Occasionally random, three plies.
    #[default]
    Amateur,
    /// Never random, four plies.
    Professional,
    /// Never random, iterative deepening under a time budget.
    ///
    /// The move comes from the deepest iteration that beat the clock, so it
    /// is repeatable only while the same depths complete.
    Master,
}

/// How to choose among root moves with the same score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TieBreak {
    /// Take the earliest move in rule-engine enumeration order.
    FirstInOrder,
    /// Pick uniformly among the tied moves.
    Random,
}

/// Search settings for one tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchProfile {
    /// Maximum search depth in plies.
    pub depth: u8,
    /// Probability of playing a uniformly random legal move instead.
    pub randomness: f64,
    /// Tie policy among best-scoring moves.
    pub tie_break: TieBreak,
    /// Wall-clock budget; when set the search deepens iteratively and keeps
    /// the last depth that finished in time.
    pub time_budget: Option<Duration>,
}

impl SearchProfile {
    /// Fixed-depth, deterministic profile.
    pub const fn fixed(depth: u8) -> Self {
        Self {
            depth,
            randomness: 0.0,
            tie_break: TieBreak::FirstInOrder,
            time_budget: None,
        }
    }

    /// Whether this profile always picks the same move for the same position.
    ///
    /// A time budget makes the reached depth depend on the machine.
    pub fn is_deterministic(&self) -> bool {
        self.randomness == 0.0
            && self.tie_break == TieBreak::FirstInOrder
            && self.time_budget.is_none()
    }
}

impl Difficulty {
    /// Returns the search profile for this tier.
    #[instrument]
    pub fn profile(self) -> SearchProfile {
        match self {
            Difficulty::Beginner => SearchProfile {
                depth: 1,
                randomness: 0.85,
                tie_break: TieBreak::Random,
                time_budget: None,
            },
            Difficulty::Easy => SearchProfile {
                depth: 2,
                randomness: 0.40,
                tie_break: TieBreak::Random,
                time_budget: None,
            },
            Difficulty::Amateur => SearchProfile {
                depth: 3,
                randomness: 0.15,
                tie_break: TieBreak::Random,
                time_budget: None,
            },
            Difficulty::Professional => SearchProfile::fixed(4),
            Difficulty::Master => SearchProfile {
                time_budget: Some(Duration::from_secs(3)),
                ..SearchProfile::fixed(6)
            },
        }
    }
}

//! Game rules for Jungle.
//!
//! Pure functions over a [`Board`](crate::Board): capture eligibility, legal
//! destination enumeration, and move resolution with terminal detection.
//! Rules are separated from session state so the AI can run them against
//! cloned boards.

pub mod capture;
pub mod movement;
pub mod resolve;

pub use capture::can_capture;
pub use movement::{all_legal_moves, has_legal_move, legal_moves};
pub use resolve::{MoveEffect, resolve};

use serde::{Deserialize, Serialize};

/// How captures across the land/water boundary are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiverCapture {
    /// No capture crosses the shoreline: a swimming Rat takes nothing on land
    /// (the Elephant included) and nothing on land takes a swimming Rat.
    #[default]
    Strict,
    /// Only traps and rank decide; a swimming Rat may take a grounded Elephant.
    Lenient,
}

/// Configurable rule variants for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RuleSet {
    /// Shoreline capture policy.
    #[serde(default)]
    pub river_capture: RiverCapture,
}

impl RuleSet {
    /// Creates a rule set with the given shoreline policy.
    pub const fn new(river_capture: RiverCapture) -> Self {
        Self { river_capture }
    }
}

//! Headless AI-versus-AI games.

use jungle_game::{AiEngine, Difficulty, GameMode, GameSession, Player, RuleError, RuleSet};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for one self-play game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelfPlayConfig {
    /// Red's strength.
    pub red: Difficulty,
    /// Blue's strength.
    pub blue: Difficulty,
    /// Stop after this many plies without a result.
    pub max_plies: usize,
    /// Seed for both engines; random when `None`.
    pub seed: Option<u64>,
    /// Rule variant.
    pub rules: RuleSet,
    /// Master search budget override.
    pub time_budget: Option<Duration>,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            red: Difficulty::default(),
            blue: Difficulty::default(),
            max_plies: 200,
            seed: None,
            rules: RuleSet::default(),
            time_budget: None,
        }
    }
}

/// How a self-play game ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfPlayReport {
    /// Winner, or `None` if the ply limit was reached.
    pub winner: Option<Player>,
    /// Plies played.
    pub plies: usize,
    /// Final position as text.
    pub final_board: String,
}

/// Plays a full game between two engines.
#[instrument]
pub fn self_play(config: SelfPlayConfig) -> Result<SelfPlayReport, RuleError> {
    let mut seeds = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut red = engine(seeds.random(), config.time_budget);
    let mut blue = engine(seeds.random(), config.time_budget);

    let mut session =
        GameSession::new(GameMode::Aivai, config.red).with_rules(config.rules);

    while session.history().len() < config.max_plies && !session.outcome().is_over() {
        let player = session.current_player();
        let (engine, difficulty) = match player {
            Player::Red => (&mut red, config.red),
            Player::Blue => (&mut blue, config.blue),
        };

        let Some(mv) = engine.select_move(&session, difficulty) else {
            session.concede_if_immobilized();
            break;
        };
        session.apply_move(mv.from, mv.to)?;
        debug!(ply = session.history().len(), %player, %mv, "Self-play move");
    }

    let report = SelfPlayReport {
        winner: session.outcome().winner(),
        plies: session.history().len(),
        final_board: session.board().display(),
    };
    info!(winner = ?report.winner, plies = report.plies, "Self-play finished");
    Ok(report)
}

fn engine(seed: u64, budget: Option<Duration>) -> AiEngine {
    let engine = AiEngine::seeded(seed);
    match budget {
        Some(budget) => engine.with_time_budget(budget),
        None => engine,
    }
}

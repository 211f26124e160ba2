//! Who controls each side.

use crate::types::Player;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Seat assignment for a game.
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
pub enum GameMode {
    /// Two humans.
    #[default]
    Pvp,
    /// Red is human, Blue is the AI.
    Pve,
    /// The AI plays both sides.
    #[serde(alias = "eve")]
    #[strum(to_string = "aivai", serialize = "eve")]
    Aivai,
}

impl GameMode {
    /// Whether the AI controls `player` in this mode.
    pub fn is_ai(self, player: Player) -> bool {
        match self {
            GameMode::Pvp => false,
            GameMode::Pve => player == Player::Blue,
            GameMode::Aivai => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_ai_seats() {
        assert!(!GameMode::Pvp.is_ai(Player::Red));
        assert!(!GameMode::Pve.is_ai(Player::Red));
        assert!(GameMode::Pve.is_ai(Player::Blue));
        assert!(GameMode::Aivai.is_ai(Player::Red));
    }

    #[test]
    fn test_accepts_eve_alias() {
        assert_eq!(GameMode::from_str("eve"), Ok(GameMode::Aivai));
        let mode: GameMode = serde_json::from_str("\"eve\"").unwrap();
        assert_eq!(mode, GameMode::Aivai);
        assert_eq!(serde_json::to_string(&GameMode::Aivai).unwrap(), "\"aivai\"");
    }
}

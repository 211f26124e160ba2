//! Capture eligibility.

use super::{RiverCapture, RuleSet};
use crate::types::{Piece, Species, Terrain};

/// Checks whether `attacker`, standing on `attacker_terrain`, may take
/// `defender` standing on `defender_terrain`.
///
/// A capture succeeds when the defender sits in one of the attacker's traps,
/// when the attacker's rank is at least the defender's, or when a Rat attacks
/// an Elephant. Under [`RiverCapture::Strict`] nothing crosses the shoreline.
pub fn can_capture(
    attacker: Piece,
    attacker_terrain: Terrain,
    defender: Piece,
    defender_terrain: Terrain,
    rules: RuleSet,
) -> bool {
    if attacker.owner == defender.owner {
        return false;
    }

    if defender_terrain == Terrain::Trap(attacker.owner) {
        return true;
    }

    if rules.river_capture == RiverCapture::Strict
        && attacker_terrain.is_river() != defender_terrain.is_river()
    {
        return false;
    }

    if attacker.species == Species::Rat && defender.species == Species::Elephant {
        return true;
    }

    attacker.rank() >= defender.rank()
}

//! Combatant identity

use replaydex_protocol::Player;

/// A species fielded by one player.
///
/// This is the stable identity statistics are keyed by. Nicknames are only
/// labels for whoever sits in a slot right now and never appear here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub player: Player,
    pub species: String,
}

impl Combatant {
    pub fn new(player: Player, species: impl Into<String>) -> Self {
        Self {
            player,
            species: species.into(),
        }
    }

    /// Same team (including a doubles partner, or itself)
    pub fn is_ally_of(&self, other: &Combatant) -> bool {
        self.player.is_ally_of(other.player)
    }
}

impl std::fmt::Display for Combatant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.player, self.species)
    }
}

/// The species name before any forme suffix ("Charizard-Mega-X" -> "Charizard")
pub fn base_species(species: &str) -> &str {
    species.split('-').next().unwrap_or(species)
}

/// Whether two species strings are formes of the same pokemon
pub fn same_base_species(a: &str, b: &str) -> bool {
    base_species(a) == base_species(b)
}

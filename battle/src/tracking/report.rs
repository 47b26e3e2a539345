//! Structured result of analyzing one match

use replaydex_protocol::Player;

use crate::types::{Combatant, CombatantStats, DamageCause};

/// A player and the username playing it
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerInfo {
    pub player: Player,
    pub username: String,
}

/// Species one player brought, in the order they were first seen
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    pub player: Player,
    pub species: Vec<String>,
}

/// One faint and whoever is credited with it
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Knockout {
    /// Equal to `victim` for self-inflicted faints
    pub attacker: Combatant,
    pub victim: Combatant,
    /// Cause of the terminal HP loss
    pub cause: DamageCause,
    /// Move, hazard, item or ability credited
    pub credited: Option<String>,
    pub turn: u32,
}

impl Knockout {
    pub fn is_self_ko(&self) -> bool {
        self.attacker == self.victim
    }
}

/// A faint nobody is credited with: no cause at all, or a hazard or
/// weather whose setter never showed up in the log
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UncreditedFaint {
    pub victim: Combatant,
    pub cause: DamageCause,
    pub credited: Option<String>,
    pub turn: u32,
}

/// How the match ended
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum Winner {
    Side { player: Player, username: String },
    Tie,
}

/// Everything learned from one battle log
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchReport {
    pub players: Vec<PlayerInfo>,
    pub rosters: Vec<Roster>,
    /// In the order the faints happened
    pub knockouts: Vec<Knockout>,
    /// Faints with no knockout, in order
    pub uncredited_faints: Vec<UncreditedFaint>,
    /// None when the log stops before the end
    pub winner: Option<Winner>,
    /// Last turn number seen
    pub turns: u32,
    /// One record per (player, species), in the order first seen
    pub combatants: Vec<CombatantStats>,
}

impl MatchReport {
    pub fn combatant(&self, player: Player, species: &str) -> Option<&CombatantStats> {
        self.combatants
            .iter()
            .find(|stats| stats.combatant.player == player && stats.combatant.species == species)
    }

    pub fn combatants_of(&self, player: Player) -> impl Iterator<Item = &CombatantStats> {
        self.combatants
            .iter()
            .filter(move |stats| stats.combatant.player == player)
    }

    pub fn roster(&self, player: Player) -> &[String] {
        self.rosters
            .iter()
            .find(|roster| roster.player == player)
            .map(|roster| roster.species.as_slice())
            .unwrap_or(&[])
    }

    pub fn username(&self, player: Player) -> Option<&str> {
        self.players
            .iter()
            .find(|info| info.player == player)
            .map(|info| info.username.as_str())
    }

    pub fn total_knockouts(&self) -> u32 {
        self.combatants.iter().map(|stats| stats.knockouts).sum()
    }

    pub fn total_faints(&self) -> u32 {
        self.combatants.iter().map(CombatantStats::faints).sum()
    }
}

//! Side (player) identity state

use std::collections::HashMap;

use replaydex_protocol::Player;

use super::combatant::same_base_species;

/// Whoever currently occupies an active slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotOccupant {
    pub nickname: String,
    pub species: String,
}

/// One player's side of the battle, as far as identity goes
#[derive(Debug, Clone)]
pub struct SideState {
    /// Player identifier (P1, P2, etc.)
    pub player: Player,

    /// Player's username (empty until `|player|` is seen)
    pub username: String,

    /// Declared species, insertion order, no duplicates
    pub roster: Vec<String>,

    /// Active slots by position letter ('a' -> 0, 'b' -> 1, ...)
    slots: Vec<Option<SlotOccupant>>,

    /// Nickname -> species, last write wins
    nicknames: HashMap<String, String>,
}

impl SideState {
    /// Create a new side state
    pub fn new(player: Player, username: impl Into<String>) -> Self {
        Self {
            player,
            username: username.into(),
            roster: Vec::new(),
            slots: vec![None], // Default to singles
            nicknames: HashMap::new(),
        }
    }

    /// Add a species to the roster unless already present
    pub fn declare(&mut self, species: &str) {
        if !self.roster.iter().any(|s| s == species) {
            self.roster.push(species.to_string());
        }
    }

    /// Bind a slot to a nickname and species.
    ///
    /// Returns the roster entry that was replaced when a team preview
    /// wildcard ("Urshifu-*") turned out to be this species.
    pub fn bind(&mut self, slot: usize, nickname: &str, species: &str) -> Option<String> {
        let reconciled = self.reconcile_wildcard(species);
        if reconciled.is_none() {
            self.declare(species);
        }

        if self.slots.len() <= slot {
            self.slots.resize(slot + 1, None);
        }
        self.slots[slot] = Some(SlotOccupant {
            nickname: nickname.to_string(),
            species: species.to_string(),
        });
        self.nicknames
            .insert(nickname.to_string(), species.to_string());

        reconciled
    }

    /// The species a switch-in should be counted as.
    ///
    /// Forme changes (Mega Evolution, Palafin-Hero, Zygarde-Complete) keep
    /// whichever species the pokemon was first known by, so one pokemon never
    /// splits into two records.
    pub fn canonical_species(&self, nickname: &str, species: &str) -> String {
        if let Some(previous) = self.species_for_nickname(nickname)
            && same_base_species(previous, species)
        {
            return previous.to_string();
        }
        if self.roster.iter().any(|s| s == species) {
            return species.to_string();
        }
        self.roster
            .iter()
            .find(|entry| !entry.ends_with("-*") && same_base_species(entry, species))
            .cloned()
            .unwrap_or_else(|| species.to_string())
    }

    /// Replace a wildcard roster entry in place
    fn reconcile_wildcard(&mut self, species: &str) -> Option<String> {
        if self.roster.iter().any(|s| s == species) {
            return None;
        }
        let index = self.roster.iter().position(|entry| {
            entry
                .strip_suffix("-*")
                .is_some_and(|base| same_base_species(base, species))
        })?;
        Some(std::mem::replace(
            &mut self.roster[index],
            species.to_string(),
        ))
    }

    /// Get the occupant of a slot (0-indexed)
    pub fn slot(&self, slot: usize) -> Option<&SlotOccupant> {
        self.slots.get(slot).and_then(|s| s.as_ref())
    }

    /// Species last bound to a nickname on this side
    pub fn species_for_nickname(&self, nickname: &str) -> Option<&str> {
        self.nicknames.get(nickname).map(|s| s.as_str())
    }
}

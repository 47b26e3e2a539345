//! Nickname to species resolution

use replaydex_protocol::{Player, Pokemon, PokemonDetails};

use crate::types::{Combatant, SideState};

/// Result of binding a slot on switch-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchOutcome {
    /// Species the incoming pokemon is counted as
    pub species: String,
    /// Team preview wildcard the species replaced in the roster ("Urshifu-*")
    pub replaced_wildcard: Option<String>,
}

/// Maps the labels the log uses ("p1a: Nick") to species.
///
/// Slots are rebound only by switch-ins, so a damage line always resolves to
/// whoever most recently switched into that slot.
#[derive(Debug, Clone, Default)]
pub struct IdentityResolver {
    /// Player sides (indexed by Player enum)
    /// Up to 4 players for multi battles
    sides: [Option<SideState>; 4],
}

impl IdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a side by player
    pub fn side(&self, player: Player) -> Option<&SideState> {
        self.sides[player.index()].as_ref()
    }

    /// Get or create a side for a player
    fn side_mut(&mut self, player: Player) -> &mut SideState {
        self.sides[player.index()].get_or_insert_with(|| SideState::new(player, ""))
    }

    /// Iterate over all initialized sides
    pub fn sides(&self) -> impl Iterator<Item = &SideState> {
        self.sides.iter().filter_map(|s| s.as_ref())
    }

    pub fn set_username(&mut self, player: Player, username: &str) {
        self.side_mut(player).username = username.to_string();
    }

    pub fn username(&self, player: Player) -> Option<&str> {
        self.side(player)
            .map(|side| side.username.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Find which side a username plays
    pub fn player_for_username(&self, username: &str) -> Option<Player> {
        self.sides()
            .find(|side| side.username == username)
            .map(|side| side.player)
    }

    /// Register a roster entry. Never touches slot bindings.
    pub fn declare(&mut self, player: Player, details: &PokemonDetails) {
        self.side_mut(player).declare(&details.species);
    }

    pub fn roster(&self, player: Player) -> &[String] {
        self.side(player)
            .map(|side| side.roster.as_slice())
            .unwrap_or(&[])
    }

    /// Bind the switch-in's slot to its nickname and species
    pub fn switch_in(&mut self, pokemon: &Pokemon, details: &PokemonDetails) -> SwitchOutcome {
        let slot = pokemon.position.map(position_to_slot).unwrap_or(0);
        let side = self.side_mut(pokemon.player);

        let species = side.canonical_species(&pokemon.name, &details.species);
        let replaced_wildcard = side.bind(slot, &pokemon.name, &species);

        SwitchOutcome {
            species,
            replaced_wildcard,
        }
    }

    /// Species behind a nickname: the matching slot occupant first, then the
    /// side's nickname history.
    pub fn resolve_species(&self, pokemon: &Pokemon) -> Option<&str> {
        let side = self.side(pokemon.player)?;

        if let Some(position) = pokemon.position
            && let Some(occupant) = side.slot(position_to_slot(position))
            && occupant.nickname == pokemon.name
        {
            return Some(occupant.species.as_str());
        }

        side.species_for_nickname(&pokemon.name)
    }

    /// Resolve a log reference to a combatant, falling back to the raw name
    pub fn resolve(&self, pokemon: &Pokemon) -> Combatant {
        let species = self
            .resolve_species(pokemon)
            .unwrap_or(&pokemon.name)
            .to_string();
        Combatant::new(pokemon.player, species)
    }

    /// Species in a player's first active slot
    pub fn current_species(&self, player: Player) -> Option<&str> {
        self.species_in_slot(player, 'a')
    }

    pub fn species_in_slot(&self, player: Player, position: char) -> Option<&str> {
        self.side(player)?
            .slot(position_to_slot(position))
            .map(|occupant| occupant.species.as_str())
    }
}

/// Convert position character to slot index
pub fn position_to_slot(pos: char) -> usize {
    match pos {
        'a'..='z' => (pos as u8 - b'a') as usize,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pokemon(s: &str) -> Pokemon {
        Pokemon::parse(s).unwrap()
    }

    fn details(s: &str) -> PokemonDetails {
        PokemonDetails::parse(s)
    }

    #[test]
    fn test_position_to_slot() {
        assert_eq!(position_to_slot('a'), 0);
        assert_eq!(position_to_slot('b'), 1);
        assert_eq!(position_to_slot('c'), 2);
        assert_eq!(position_to_slot('?'), 0);
    }

    #[test]
    fn test_resolve_through_slot() {
        let mut resolver = IdentityResolver::new();
        resolver.switch_in(&pokemon("p1a: Chompy"), &details("Garchomp, L50, F"));

        assert_eq!(resolver.resolve_species(&pokemon("p1a: Chompy")), Some("Garchomp"));
        assert_eq!(resolver.current_species(Player::P1), Some("Garchomp"));
        assert_eq!(
            resolver.resolve(&pokemon("p1a: Chompy")),
            Combatant::new(Player::P1, "Garchomp")
        );
    }

    #[test]
    fn test_resolve_slotless_reference_uses_history() {
        let mut resolver = IdentityResolver::new();
        resolver.switch_in(&pokemon("p1a: Chompy"), &details("Garchomp"));
        resolver.switch_in(&pokemon("p1a: Pex"), &details("Toxapex"));

        assert_eq!(resolver.resolve_species(&pokemon("p1: Chompy")), Some("Garchomp"));
        assert_eq!(resolver.current_species(Player::P1), Some("Toxapex"));
    }

    #[test]
    fn test_same_nickname_on_both_sides() {
        let mut resolver = IdentityResolver::new();
        resolver.switch_in(&pokemon("p1a: Bob"), &details("Garchomp"));
        resolver.switch_in(&pokemon("p2a: Bob"), &details("Dragapult"));

        assert_eq!(resolver.resolve_species(&pokemon("p1a: Bob")), Some("Garchomp"));
        assert_eq!(resolver.resolve_species(&pokemon("p2a: Bob")), Some("Dragapult"));
    }

    #[test]
    fn test_declare_does_not_bind_slots() {
        let mut resolver = IdentityResolver::new();
        resolver.declare(Player::P1, &details("Garchomp, L50"));
        resolver.declare(Player::P1, &details("Toxapex"));

        assert_eq!(resolver.roster(Player::P1), ["Garchomp", "Toxapex"]);
        assert_eq!(resolver.current_species(Player::P1), None);
        assert!(resolver.roster(Player::P2).is_empty());
    }

    #[test]
    fn test_switch_in_reconciles_wildcard() {
        let mut resolver = IdentityResolver::new();
        resolver.declare(Player::P2, &details("Urshifu-*"));

        let outcome = resolver.switch_in(&pokemon("p2a: Urshifu"), &details("Urshifu-Rapid-Strike"));

        assert_eq!(outcome.species, "Urshifu-Rapid-Strike");
        assert_eq!(outcome.replaced_wildcard.as_deref(), Some("Urshifu-*"));
        assert_eq!(resolver.roster(Player::P2), ["Urshifu-Rapid-Strike"]);
    }

    #[test]
    fn test_doubles_slots() {
        let mut resolver = IdentityResolver::new();
        resolver.switch_in(&pokemon("p1a: Rilla"), &details("Rillaboom"));
        resolver.switch_in(&pokemon("p1b: Flutter"), &details("Flutter Mane"));

        assert_eq!(resolver.species_in_slot(Player::P1, 'a'), Some("Rillaboom"));
        assert_eq!(resolver.species_in_slot(Player::P1, 'b'), Some("Flutter Mane"));
    }

    #[test]
    fn test_usernames() {
        let mut resolver = IdentityResolver::new();
        resolver.set_username(Player::P1, "Alice");
        resolver.set_username(Player::P2, "Bob");

        assert_eq!(resolver.username(Player::P1), Some("Alice"));
        assert_eq!(resolver.player_for_username("Bob"), Some(Player::P2));
        assert_eq!(resolver.player_for_username("Carol"), None);
        assert_eq!(resolver.username(Player::P3), None);
    }

    #[test]
    fn test_unknown_reference_falls_back_to_name() {
        let resolver = IdentityResolver::new();
        assert_eq!(
            resolver.resolve(&pokemon("p2a: Mystery")),
            Combatant::new(Player::P2, "Mystery")
        );
    }
}

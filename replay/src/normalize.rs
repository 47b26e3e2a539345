//! Species name normalization for cross-match grouping

use replaydex_battle::types::base_species;

/// Species whose formes differ only in appearance (or in ways usage
/// statistics conventionally ignore)
const COSMETIC_FORMES: &[&str] = &[
    "Alcremie",
    "Burmy",
    "Deerling",
    "Dudunsparce",
    "Flabébé",
    "Floette",
    "Florges",
    "Furfrou",
    "Gastrodon",
    "Genesect",
    "Maushold",
    "Minior",
    "Pikachu",
    "Poltchageist",
    "Polteageist",
    "Sawsbuck",
    "Scatterbug",
    "Shellos",
    "Sinistcha",
    "Sinistea",
    "Spewpa",
    "Tatsugiri",
    "Vivillon",
];

/// Formes of the species above that are competitively distinct
const DISTINCT_FORMES: &[&str] = &["Floette-Eternal", "Pikachu-Starter"];

/// Drop the team preview `-*` wildcard
pub fn strip_wildcard(species: &str) -> &str {
    species.strip_suffix("-*").unwrap_or(species)
}

/// Group key for a species: wildcard stripped and cosmetic formes collapsed
/// onto the base species.
pub fn normalize_species(species: &str) -> String {
    let species = strip_wildcard(species);
    if DISTINCT_FORMES.contains(&species) {
        return species.to_string();
    }

    let base = base_species(species);
    if COSMETIC_FORMES.contains(&base) {
        base.to_string()
    } else {
        species.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_wildcard() {
        assert_eq!(strip_wildcard("Urshifu-*"), "Urshifu");
        assert_eq!(strip_wildcard("Urshifu-Rapid-Strike"), "Urshifu-Rapid-Strike");
    }

    #[test]
    fn test_cosmetic_formes_collapse() {
        assert_eq!(normalize_species("Gastrodon-East"), "Gastrodon");
        assert_eq!(normalize_species("Vivillon-Pokeball"), "Vivillon");
        assert_eq!(normalize_species("Maushold-Four"), "Maushold");
        assert_eq!(normalize_species("Tatsugiri-Droopy"), "Tatsugiri");
        assert_eq!(normalize_species("Florges"), "Florges");
    }

    #[test]
    fn test_distinct_formes_kept() {
        assert_eq!(normalize_species("Rotom-Wash"), "Rotom-Wash");
        assert_eq!(normalize_species("Landorus-Therian"), "Landorus-Therian");
        assert_eq!(normalize_species("Floette-Eternal"), "Floette-Eternal");
        assert_eq!(normalize_species("Urshifu-*"), "Urshifu");
    }
}

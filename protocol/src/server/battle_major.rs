//! Major battle action line parsers
//!
//! These are the primary actions in battle: moves, switches, faints.

use super::battle::{parse_hp_status, parse_pokemon, require_field, Annotations, Pokemon, PokemonDetails};
use super::{Event, SwitchKind};
use anyhow::Result;

/// Parse |move|POKEMON|MOVE|TARGET with optional tags
pub fn parse_move(parts: &[&str]) -> Result<Event> {
    let pokemon = parse_pokemon(parts, 2)?;
    let move_name = require_field(parts, 3, "move")?;
    let target = parts.get(4).and_then(|s| Pokemon::parse(s));
    let annotations = Annotations::parse(parts.get(4..).unwrap_or_default());

    Ok(Event::Move {
        pokemon,
        move_name,
        target,
        annotations,
    })
}

/// Parse |switch|POKEMON|DETAILS|HP STATUS (also |drag| and |replace|)
pub fn parse_switch(parts: &[&str], kind: SwitchKind) -> Result<Event> {
    let pokemon = parse_pokemon(parts, 2)?;
    let details = PokemonDetails::parse(&require_field(parts, 3, "details")?);
    let hp_status = parse_hp_status(parts, 4);

    Ok(Event::SwitchIn {
        pokemon,
        details,
        hp_status,
        kind,
    })
}

/// Parse |faint|POKEMON
pub fn parse_faint(parts: &[&str]) -> Result<Event> {
    let pokemon = parse_pokemon(parts, 2)?;
    Ok(Event::Faint(pokemon))
}

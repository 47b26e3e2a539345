//! Minor battle action line parsers
//!
//! These are secondary effects in battle: damage, healing, status, side and
//! field conditions, volatile effects. In the official client, they're
//! usually displayed in smaller font.

use super::battle::{
    parse_pokemon, parse_side, require_field, require_hp_status, Annotations, HpStatus, Pokemon,
};
use super::Event;
use anyhow::Result;

fn tags_from(parts: &[&str], index: usize) -> Annotations {
    Annotations::parse(parts.get(index..).unwrap_or_default())
}

/// Parse |-damage|POKEMON|HP STATUS
pub fn parse_damage(parts: &[&str]) -> Result<Event> {
    let pokemon = parse_pokemon(parts, 2)?;
    let hp_status = require_hp_status(parts, 3)?;

    Ok(Event::DamageDelta {
        pokemon,
        hp_status,
        annotations: tags_from(parts, 4),
    })
}

/// Parse |-heal|POKEMON|HP STATUS
pub fn parse_heal(parts: &[&str]) -> Result<Event> {
    let pokemon = parse_pokemon(parts, 2)?;
    let hp_status = require_hp_status(parts, 3)?;

    Ok(Event::HealDelta {
        pokemon,
        hp_status,
        annotations: tags_from(parts, 4),
    })
}

/// Parse |-sethp|POKEMON|HP, or the older |-sethp|POKEMON|HP|POKEMON|HP
pub fn parse_sethp(parts: &[&str]) -> Result<Event> {
    let first = (parse_pokemon(parts, 2)?, require_hp_status(parts, 3)?);
    let mut targets = vec![first];

    let second = parts
        .get(4)
        .and_then(|s| Pokemon::parse(s))
        .zip(parts.get(5).and_then(|s| HpStatus::parse(s)));
    if let Some(second) = second {
        targets.push(second);
    }

    Ok(Event::HpSet {
        targets,
        annotations: tags_from(parts, 4),
    })
}

/// Parse |-status|POKEMON|STATUS
pub fn parse_status(parts: &[&str]) -> Result<Event> {
    let pokemon = parse_pokemon(parts, 2)?;
    let status = require_field(parts, 3, "status")?;

    Ok(Event::StatusApplied {
        pokemon,
        status,
        annotations: tags_from(parts, 4),
    })
}

/// Parse |-curestatus|POKEMON|STATUS
pub fn parse_curestatus(parts: &[&str]) -> Result<Event> {
    let pokemon = parse_pokemon(parts, 2)?;
    let status = parts.get(3).unwrap_or(&"").to_string();

    Ok(Event::StatusCured {
        pokemon,
        status,
        annotations: tags_from(parts, 4),
    })
}

/// Parse |-sidestart|SIDE|CONDITION
pub fn parse_sidestart(parts: &[&str]) -> Result<Event> {
    let side = parse_side(parts, 2)?;
    let condition = require_field(parts, 3, "condition")?;

    Ok(Event::SideHazardAdded {
        side,
        condition,
        annotations: tags_from(parts, 4),
    })
}

/// Parse |-sideend|SIDE|CONDITION
pub fn parse_sideend(parts: &[&str]) -> Result<Event> {
    let side = parse_side(parts, 2)?;
    let condition = require_field(parts, 3, "condition")?;

    Ok(Event::SideHazardRemoved {
        side,
        condition,
        annotations: tags_from(parts, 4),
    })
}

/// Parse |-weather|WEATHER
pub fn parse_weather(parts: &[&str]) -> Result<Event> {
    let weather = parts.get(2).unwrap_or(&"none").to_string();

    Ok(Event::WeatherChanged {
        weather,
        annotations: tags_from(parts, 3),
    })
}

/// Parse |-start|POKEMON|EFFECT
pub fn parse_start(parts: &[&str]) -> Result<Event> {
    let pokemon = parse_pokemon(parts, 2)?;
    let effect = require_field(parts, 3, "effect")?;

    Ok(Event::EffectStarted {
        pokemon,
        effect,
        annotations: tags_from(parts, 4),
    })
}

/// Parse |-activate|EFFECT (with optional Pokemon and other fields)
pub fn parse_activate(parts: &[&str]) -> Result<Event> {
    // First part might be a Pokemon or an effect
    let pokemon = parts.get(2).and_then(|s| Pokemon::parse(s));
    let skip_pokemon = pokemon.is_some() || parts.get(2).is_some_and(|s| s.is_empty());
    let effect_index = if skip_pokemon { 3 } else { 2 };
    let effect = require_field(parts, effect_index, "effect")?;

    Ok(Event::EffectActivated {
        pokemon,
        effect,
        annotations: tags_from(parts, effect_index + 1),
    })
}

/// Parse |-end|POKEMON|EFFECT
pub fn parse_end(parts: &[&str]) -> Result<Event> {
    let pokemon = parse_pokemon(parts, 2)?;
    let effect = require_field(parts, 3, "effect")?;

    Ok(Event::EffectEnded {
        pokemon,
        effect,
        annotations: tags_from(parts, 4),
    })
}

//! Battle initialization line parsers
//!
//! These lines are sent at the start of a battle and declare who is playing
//! with what.

use super::battle::{Player, PokemonDetails, require_field};
use super::Event;
use anyhow::Result;

/// Parse |player|PLAYER|USERNAME|AVATAR|RATING
pub fn parse_player(parts: &[&str]) -> Result<Event> {
    let player = parts
        .get(2)
        .and_then(|s| Player::parse(s))
        .ok_or_else(|| anyhow::anyhow!("Missing player"))?;

    // A bare |player|p1| is sent when a seat is vacated
    let username = require_field(parts, 3, "username")?;

    Ok(Event::PlayerDeclared { player, username })
}

/// Parse |poke|PLAYER|DETAILS|ITEM
pub fn parse_poke(parts: &[&str]) -> Result<Event> {
    let player = parts
        .get(2)
        .and_then(|s| Player::parse(s))
        .ok_or_else(|| anyhow::anyhow!("Missing player"))?;

    let details = PokemonDetails::parse(&require_field(parts, 3, "details")?);

    let has_item = parts.get(4).map(|s| *s == "item").unwrap_or(false);

    Ok(Event::RosterEntry {
        player,
        details,
        has_item,
    })
}

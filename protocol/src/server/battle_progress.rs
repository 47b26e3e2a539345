//! Battle progress line parsers
//!
//! These lines track the flow and outcome of a battle.

use super::battle::require_field;
use super::Event;
use anyhow::Result;

/// Parse |turn|NUMBER
pub fn parse_turn(parts: &[&str]) -> Result<Event> {
    let turn = parts
        .get(2)
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| anyhow::anyhow!("Missing turn number"))?;

    Ok(Event::TurnStarted(turn))
}

/// Parse |win|USER
pub fn parse_win(parts: &[&str]) -> Result<Event> {
    let user = require_field(parts, 2, "winner")?;
    Ok(Event::Win(user))
}

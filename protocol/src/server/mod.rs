//! Battle log lines and their classification into [`Event`]s

mod battle;
mod battle_init;
mod battle_major;
mod battle_minor;
mod battle_progress;

use anyhow::Result;

use crate::ParseError;

pub use battle::{
    Annotations, HpStatus, Player, Pokemon, PokemonDetails, parse_details, parse_hp_status,
    parse_pokemon, parse_side,
};

/// How a pokemon arrived in its slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchKind {
    /// `|switch|`, chosen by the player
    Switch,
    /// `|drag|`, forced by Roar, Red Card, Dragon Tail...
    Drag,
    /// `|replace|`, the true identity behind an Illusion
    Replace,
}

/// One classified log line
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// `|player|PLAYER|USERNAME|AVATAR|RATING`
    PlayerDeclared { player: Player, username: String },

    /// `|poke|PLAYER|DETAILS|ITEM` (team preview)
    RosterEntry {
        player: Player,
        details: PokemonDetails,
        has_item: bool,
    },

    /// `|switch|`, `|drag|` or `|replace|` with POKEMON|DETAILS|HP STATUS
    SwitchIn {
        pokemon: Pokemon,
        details: PokemonDetails,
        hp_status: Option<HpStatus>,
        kind: SwitchKind,
    },

    /// `|move|POKEMON|MOVE|TARGET` with optional tags
    Move {
        pokemon: Pokemon,
        move_name: String,
        target: Option<Pokemon>,
        annotations: Annotations,
    },

    /// `|-damage|POKEMON|HP STATUS`
    DamageDelta {
        pokemon: Pokemon,
        hp_status: HpStatus,
        annotations: Annotations,
    },

    /// `|-heal|POKEMON|HP STATUS`
    HealDelta {
        pokemon: Pokemon,
        hp_status: HpStatus,
        annotations: Annotations,
    },

    /// `|-sethp|POKEMON|HP` (Pain Split). Old logs put both targets on one line.
    HpSet {
        targets: Vec<(Pokemon, HpStatus)>,
        annotations: Annotations,
    },

    /// `|-status|POKEMON|STATUS`
    StatusApplied {
        pokemon: Pokemon,
        status: String,
        annotations: Annotations,
    },

    /// `|-curestatus|POKEMON|STATUS`
    StatusCured {
        pokemon: Pokemon,
        status: String,
        annotations: Annotations,
    },

    /// `|-sidestart|SIDE|CONDITION`. Screens and Tailwind arrive here too;
    /// consumers pick out the hazards.
    SideHazardAdded {
        side: Player,
        condition: String,
        annotations: Annotations,
    },

    /// `|-sideend|SIDE|CONDITION`
    SideHazardRemoved {
        side: Player,
        condition: String,
        annotations: Annotations,
    },

    /// `|-weather|WEATHER`, including `[upkeep]` ticks and `none`
    WeatherChanged {
        weather: String,
        annotations: Annotations,
    },

    /// `|-start|POKEMON|EFFECT`
    EffectStarted {
        pokemon: Pokemon,
        effect: String,
        annotations: Annotations,
    },

    /// `|-activate|POKEMON|EFFECT` (the pokemon is absent for field effects)
    EffectActivated {
        pokemon: Option<Pokemon>,
        effect: String,
        annotations: Annotations,
    },

    /// `|-end|POKEMON|EFFECT`
    EffectEnded {
        pokemon: Pokemon,
        effect: String,
        annotations: Annotations,
    },

    /// `|turn|NUMBER`
    TurnStarted(u32),

    /// `|faint|POKEMON`
    Faint(Pokemon),

    /// `|win|USER`
    Win(String),

    /// `|tie`
    Tie,

    /// Anything else: chat, timestamps, unknown or malformed lines
    Other,
}

impl Event {
    pub fn is_other(&self) -> bool {
        matches!(self, Event::Other)
    }
}

/// Classify a single log line. Never fails: unknown or malformed lines become
/// [`Event::Other`].
pub fn classify_line(line: &str) -> Event {
    let line = line.trim();

    if !line.starts_with('|') {
        return Event::Other;
    }

    let parts: Vec<&str> = line.split('|').collect();

    match parse_event(&parts) {
        Ok(event) => event,
        Err(e) => {
            tracing::trace!(error = %e, line, "malformed log line");
            Event::Other
        }
    }
}

fn parse_event(parts: &[&str]) -> Result<Event> {
    let Some(kind) = parts.get(1) else {
        return Err(ParseError::EmptyMessage.into());
    };

    match *kind {
        "player" => battle_init::parse_player(parts),
        "poke" => battle_init::parse_poke(parts),
        "switch" => battle_major::parse_switch(parts, SwitchKind::Switch),
        "drag" => battle_major::parse_switch(parts, SwitchKind::Drag),
        "replace" => battle_major::parse_switch(parts, SwitchKind::Replace),
        "move" => battle_major::parse_move(parts),
        "faint" => battle_major::parse_faint(parts),
        "-damage" => battle_minor::parse_damage(parts),
        "-heal" => battle_minor::parse_heal(parts),
        "-sethp" => battle_minor::parse_sethp(parts),
        "-status" => battle_minor::parse_status(parts),
        "-curestatus" => battle_minor::parse_curestatus(parts),
        "-sidestart" => battle_minor::parse_sidestart(parts),
        "-sideend" => battle_minor::parse_sideend(parts),
        "-weather" => battle_minor::parse_weather(parts),
        "-start" => battle_minor::parse_start(parts),
        "-activate" => battle_minor::parse_activate(parts),
        "-end" => battle_minor::parse_end(parts),
        "turn" => battle_progress::parse_turn(parts),
        "win" => battle_progress::parse_win(parts),
        "tie" => Ok(Event::Tie),
        _ => Ok(Event::Other),
    }
}

/// A whole battle log, classified lazily.
///
/// Iterating borrows the text, so the same log can be walked any number of
/// times and always yields the same events.
#[derive(Debug, Clone, Copy)]
pub struct EventLog<'a> {
    text: &'a str,
}

impl<'a> EventLog<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    pub fn iter(&self) -> Events<'a> {
        Events {
            lines: self.text.lines(),
        }
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }
}

impl<'a> IntoIterator for &EventLog<'a> {
    type Item = Event;
    type IntoIter = Events<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the events of an [`EventLog`], one per non-empty line
#[derive(Debug, Clone)]
pub struct Events<'a> {
    lines: std::str::Lines<'a>,
}

impl Iterator for Events<'_> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        self.lines
            .by_ref()
            .find(|line| !line.trim().is_empty())
            .map(classify_line)
    }
}

//! Shared value types for battle log lines

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Player in a battle (p1, p2, p3, p4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    P1,
    P2,
    P3,
    P4,
}

impl Player {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "p1" => Some(Player::P1),
            "p2" => Some(Player::P2),
            "p3" => Some(Player::P3),
            "p4" => Some(Player::P4),
            _ => None,
        }
    }

    /// Parse the player from the leading "pN" of a longer token ("p2a", "p2: Bob")
    pub fn parse_prefix(s: &str) -> Option<Self> {
        s.get(..2).and_then(Self::parse)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Player::P1 => "p1",
            Player::P2 => "p2",
            Player::P3 => "p3",
            Player::P4 => "p4",
        }
    }

    /// Array index for per-player tables
    pub fn index(&self) -> usize {
        match self {
            Player::P1 => 0,
            Player::P2 => 1,
            Player::P3 => 2,
            Player::P4 => 3,
        }
    }

    /// The player on the other side of a two-sided battle
    pub fn foe(&self) -> Self {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
            Player::P3 => Player::P4,
            Player::P4 => Player::P3,
        }
    }

    /// Players 1/3 and 2/4 share a side in multi battles
    pub fn is_ally_of(&self, other: Player) -> bool {
        self.index() % 2 == other.index() % 2
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pokemon identifier in the form "POSITION: NAME" (e.g., "p1a: Pikachu")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pokemon {
    /// Player who owns this pokemon
    pub player: Player,
    /// Position letter (a, b, c for active slots, or None if inactive)
    pub position: Option<char>,
    /// Pokemon's name/nickname
    pub name: String,
}

impl Pokemon {
    /// Parse a pokemon ID string like "p1a: Pikachu" or "p1: Pikachu"
    pub fn parse(s: &str) -> Option<Self> {
        let (pos_part, name) = s.split_once(": ")?;
        if pos_part.len() > 3 || name.is_empty() {
            return None;
        }

        let player = Player::parse_prefix(pos_part)?;
        let position = pos_part.chars().nth(2).filter(|c| c.is_ascii_lowercase());

        Some(Pokemon {
            player,
            position,
            name: name.to_string(),
        })
    }
}

/// Pokemon details string (species, level, gender, shiny, tera)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PokemonDetails {
    pub species: String,
    pub level: Option<u8>,
    pub gender: Option<char>,
    pub shiny: bool,
    pub tera_type: Option<String>,
}

impl PokemonDetails {
    /// `"Garchomp, L50, F, shiny, tera:Fire"`. Unknown tags are ignored.
    pub fn parse(s: &str) -> Self {
        let mut tags = s.split(", ");
        let mut details = PokemonDetails {
            species: tags.next().unwrap_or_default().trim().to_string(),
            ..PokemonDetails::default()
        };

        for tag in tags {
            match tag {
                "M" | "F" => details.gender = tag.chars().next(),
                "shiny" => details.shiny = true,
                _ => {
                    if let Some(level) = tag.strip_prefix('L') {
                        details.level = level.parse().ok();
                    } else if let Some(tera) = tag.strip_prefix("tera:") {
                        details.tera_type = Some(tera.to_string());
                    }
                }
            }
        }

        details
    }

    /// Team preview hides some formes behind a wildcard ("Urshifu-*")
    pub fn is_wildcard(&self) -> bool {
        self.species.ends_with("-*")
    }
}

/// Condition field of a pokemon: `"100/100"`, `"50/100 slp"`, `"0 fnt"`.
///
/// Spectator logs report HP out of 100; a bare number is already a percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct HpStatus {
    pub current: u32,
    pub max: Option<u32>,
    /// Non-volatile status ("slp", "par", "brn", "psn", "tox", "frz") or "fnt"
    pub status: Option<String>,
}

impl HpStatus {
    pub fn parse(s: &str) -> Option<Self> {
        let mut fields = s.split_whitespace();
        let hp = fields.next()?;
        let status = fields.next().map(str::to_string);

        let (current, max) = match hp.split_once('/') {
            Some((current, max)) => (current.parse().ok()?, Some(max.parse().ok()?)),
            None => (hp.parse().ok()?, None),
        };

        Some(HpStatus {
            current,
            max,
            status,
        })
    }

    /// HP as a percentage of max HP. A bare number is already a percentage.
    pub fn percent(&self) -> f64 {
        if self.is_fainted() {
            return 0.0;
        }
        match self.max {
            Some(0) => 0.0,
            Some(max) => f64::from(self.current) * 100.0 / f64::from(max),
            None => f64::from(self.current),
        }
    }

    pub fn is_fainted(&self) -> bool {
        self.status.as_deref() == Some("fnt")
    }
}

/// Inline tags trailing a line: `[from] EFFECT`, `[of] POKEMON`, `[upkeep]`, ...
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Annotations {
    /// Effect named by `[from]` ("item: Life Orb", "Stealth Rock", "psn")
    pub from: Option<String>,
    /// Pokemon named by `[of]`
    pub of: Option<Pokemon>,
    /// Every other tag, brackets stripped ("upkeep", "silent", "wisher")
    pub flags: Vec<String>,
}

impl Annotations {
    /// Collect tags from the given fields. Fields not starting with `[` are skipped.
    pub fn parse(parts: &[&str]) -> Self {
        let mut annotations = Annotations::default();

        for part in parts {
            let Some(tag) = part.strip_prefix('[') else {
                continue;
            };
            let Some((name, value)) = tag.split_once(']') else {
                continue;
            };
            let value = value.trim();

            match name {
                "from" if !value.is_empty() => annotations.from = Some(value.to_string()),
                "of" => annotations.of = Pokemon::parse(value),
                _ => annotations.flags.push(name.to_string()),
            }
        }

        annotations
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    /// The `[from]` effect with an optional "move: " prefix removed
    pub fn from_effect(&self) -> Option<&str> {
        self.from
            .as_deref()
            .map(|f| f.strip_prefix("move: ").unwrap_or(f))
    }
}

/// Helper to parse Pokemon from message parts
pub fn parse_pokemon(parts: &[&str], index: usize) -> Result<Pokemon, anyhow::Error> {
    parts
        .get(index)
        .and_then(|s| Pokemon::parse(s))
        .ok_or_else(|| ParseError::MissingField("pokemon".to_string()).into())
}

/// Helper to parse the side of a side condition ("p2: Bob")
pub fn parse_side(parts: &[&str], index: usize) -> Result<Player, anyhow::Error> {
    parts
        .get(index)
        .and_then(|s| Player::parse_prefix(s))
        .ok_or_else(|| ParseError::MissingField("side".to_string()).into())
}

/// Helper to parse PokemonDetails from message parts
pub fn parse_details(parts: &[&str], index: usize) -> PokemonDetails {
    parts
        .get(index)
        .map(|s| PokemonDetails::parse(s))
        .unwrap_or_default()
}

/// Helper to parse HpStatus from message parts
pub fn parse_hp_status(parts: &[&str], index: usize) -> Option<HpStatus> {
    parts.get(index).and_then(|s| HpStatus::parse(s))
}

/// Helper for fields that must carry an HP status
pub fn require_hp_status(parts: &[&str], index: usize) -> Result<HpStatus, anyhow::Error> {
    parse_hp_status(parts, index)
        .ok_or_else(|| ParseError::MissingField("hp status".to_string()).into())
}

/// Helper for free-text fields that must be present and non-empty
pub fn require_field(parts: &[&str], index: usize, name: &str) -> Result<String, anyhow::Error> {
    parts
        .get(index)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ParseError::MissingField(name.to_string()).into())
}

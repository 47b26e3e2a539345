//! Field effects that take HP from whoever stands in them

/// Weather that chips HP at the end of each turn.
///
/// Sun, rain, snow and the primal weathers never damage anyone; they only
/// matter because they replace sand or hail, so they parse to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weather {
    Sandstorm,
    Hail,
}

impl Weather {
    /// `"Sandstorm"` or `"Hail"` from a `-weather` line or a `[from]` tag
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandstorm" => Some(Weather::Sandstorm),
            "hail" => Some(Weather::Hail),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Sandstorm => "Sandstorm",
            Weather::Hail => "Hail",
        }
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry hazards that hurt or poison on switch-in.
///
/// Screens, Tailwind and Sticky Web never cost HP and are not tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideCondition {
    StealthRock,
    Spikes,
    /// Poisons instead of damaging; the poison is credited to its setter
    ToxicSpikes,
    /// G-Max Steelsurge
    Steelsurge,
}

impl SideCondition {
    /// `"move: Stealth Rock"`, `"Spikes"`, `"G-Max Steelsurge"`
    pub fn parse(s: &str) -> Option<Self> {
        let name = s.strip_prefix("move: ").unwrap_or(s);
        let key: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "stealthrock" => Some(SideCondition::StealthRock),
            "spikes" => Some(SideCondition::Spikes),
            "toxicspikes" => Some(SideCondition::ToxicSpikes),
            "gmaxsteelsurge" | "steelsurge" => Some(SideCondition::Steelsurge),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SideCondition::StealthRock => "Stealth Rock",
            SideCondition::Spikes => "Spikes",
            SideCondition::ToxicSpikes => "Toxic Spikes",
            SideCondition::Steelsurge => "G-Max Steelsurge",
        }
    }
}

impl std::fmt::Display for SideCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Damage cause taxonomy

use super::conditions::{SideCondition, Weather};
use super::status::Status;

/// What took a chunk of HP. Every HP loss lands in exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum DamageCause {
    /// An opposing move's primary effect
    Direct,

    // Entry hazards
    StealthRock,
    Spikes,
    Steelsurge,

    // Status ticks
    Poison,
    Toxic,
    Burn,

    // Weather ticks
    Sandstorm,
    Hail,

    // Retaliation on contact
    ContactAbility, // Rough Skin, Iron Barbs, Aftermath...
    ContactItem,    // Rocky Helmet, Jaboca/Rowap Berry

    // Passive item/ability damage
    PassiveAbility, // Bad Dreams, Solar Power, Dry Skin...
    PassiveItem,    // Life Orb, Black Sludge, Sticky Barb...

    Recoil,

    // Residual move effects
    LeechSeed,
    PartialTrap,
    Curse, // also Nightmare and Salt Cure

    /// Hitting itself in confusion
    Confusion,
    /// HP paid for a substitute
    Substitute,
    /// Self-KO and HP-cost moves
    Sacrifice,
    /// Destiny Bond and Perish Song
    DelayedMove,
    /// An ally's move
    FriendlyFire,
    /// Nothing identifiable
    Unattributed,
}

/// Coarse grouping of [`DamageCause`]s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CauseCategory {
    Direct,
    Hazard,
    Status,
    Weather,
    Retaliation,
    Passive,
    Residual,
    SelfInflicted,
    Ally,
    Unknown,
}

impl DamageCause {
    pub const ALL: [DamageCause; 23] = [
        DamageCause::Direct,
        DamageCause::StealthRock,
        DamageCause::Spikes,
        DamageCause::Steelsurge,
        DamageCause::Poison,
        DamageCause::Toxic,
        DamageCause::Burn,
        DamageCause::Sandstorm,
        DamageCause::Hail,
        DamageCause::ContactAbility,
        DamageCause::ContactItem,
        DamageCause::PassiveAbility,
        DamageCause::PassiveItem,
        DamageCause::Recoil,
        DamageCause::LeechSeed,
        DamageCause::PartialTrap,
        DamageCause::Curse,
        DamageCause::Confusion,
        DamageCause::Substitute,
        DamageCause::Sacrifice,
        DamageCause::DelayedMove,
        DamageCause::FriendlyFire,
        DamageCause::Unattributed,
    ];

    /// Only an opposing move's primary effect is direct damage
    pub fn is_direct(&self) -> bool {
        matches!(self, DamageCause::Direct)
    }

    pub fn category(&self) -> CauseCategory {
        match self {
            DamageCause::Direct => CauseCategory::Direct,
            DamageCause::StealthRock | DamageCause::Spikes | DamageCause::Steelsurge => {
                CauseCategory::Hazard
            }
            DamageCause::Poison | DamageCause::Toxic | DamageCause::Burn => CauseCategory::Status,
            DamageCause::Sandstorm | DamageCause::Hail => CauseCategory::Weather,
            DamageCause::ContactAbility | DamageCause::ContactItem => CauseCategory::Retaliation,
            DamageCause::PassiveAbility | DamageCause::PassiveItem => CauseCategory::Passive,
            DamageCause::LeechSeed
            | DamageCause::PartialTrap
            | DamageCause::Curse
            | DamageCause::DelayedMove => CauseCategory::Residual,
            DamageCause::Recoil
            | DamageCause::Confusion
            | DamageCause::Substitute
            | DamageCause::Sacrifice => CauseCategory::SelfInflicted,
            DamageCause::FriendlyFire => CauseCategory::Ally,
            DamageCause::Unattributed => CauseCategory::Unknown,
        }
    }

    /// Causes that never have another combatant behind them
    pub fn is_self_inflicted(&self) -> bool {
        self.category() == CauseCategory::SelfInflicted
    }

    pub fn from_hazard(hazard: SideCondition) -> Option<Self> {
        match hazard {
            SideCondition::StealthRock => Some(DamageCause::StealthRock),
            SideCondition::Spikes => Some(DamageCause::Spikes),
            SideCondition::Steelsurge => Some(DamageCause::Steelsurge),
            SideCondition::ToxicSpikes => None,
        }
    }

    pub fn from_status(status: Status) -> Self {
        match status {
            Status::Poison => DamageCause::Poison,
            Status::BadPoison => DamageCause::Toxic,
            Status::Burn => DamageCause::Burn,
        }
    }

    pub fn from_weather(weather: Weather) -> Self {
        match weather {
            Weather::Sandstorm => DamageCause::Sandstorm,
            Weather::Hail => DamageCause::Hail,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DamageCause::Direct => "Direct",
            DamageCause::StealthRock => "Stealth Rock",
            DamageCause::Spikes => "Spikes",
            DamageCause::Steelsurge => "G-Max Steelsurge",
            DamageCause::Poison => "Poison",
            DamageCause::Toxic => "Toxic",
            DamageCause::Burn => "Burn",
            DamageCause::Sandstorm => "Sandstorm",
            DamageCause::Hail => "Hail",
            DamageCause::ContactAbility => "Contact Ability",
            DamageCause::ContactItem => "Contact Item",
            DamageCause::PassiveAbility => "Passive Ability",
            DamageCause::PassiveItem => "Passive Item",
            DamageCause::Recoil => "Recoil",
            DamageCause::LeechSeed => "Leech Seed",
            DamageCause::PartialTrap => "Partial Trap",
            DamageCause::Curse => "Curse",
            DamageCause::Confusion => "Confusion",
            DamageCause::Substitute => "Substitute",
            DamageCause::Sacrifice => "Sacrifice",
            DamageCause::DelayedMove => "Delayed Move",
            DamageCause::FriendlyFire => "Friendly Fire",
            DamageCause::Unattributed => "Unattributed",
        }
    }
}

impl std::fmt::Display for DamageCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

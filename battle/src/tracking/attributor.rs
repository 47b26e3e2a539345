//! HP delta attribution

use std::collections::HashMap;

use replaydex_protocol::{Annotations, HpStatus};

use super::causality::{CausalContext, CausalityTracker};
use crate::types::{Combatant, DamageCause, SideCondition, Status, Volatile, Weather};

/// Items that hurt the attacker when it makes contact
const CONTACT_ITEMS: &[&str] = &["Rocky Helmet", "Jaboca Berry", "Rowap Berry"];

/// Abilities that hurt the attacker on contact (or on the holder's KO)
const CONTACT_ABILITIES: &[&str] = &["Rough Skin", "Iron Barbs", "Aftermath", "Innards Out"];

/// Moves whose HP cost shows up as an annotated self-damage line
const SACRIFICE_MOVES: &[&str] = &["mindblown", "steelbeam", "chloroblast"];

const RECOIL_EFFECTS: &[&str] = &["recoil", "highjumpkick", "jumpkick"];

/// Who and what is behind one HP loss
#[derive(Debug, Clone, PartialEq)]
pub struct Attribution {
    pub cause: DamageCause,
    /// The combatant credited with the damage, never the victim itself
    pub source: Option<Combatant>,
    /// Move, hazard, item or ability name credited
    pub effect: Option<String>,
    /// The victim did this to itself
    pub self_inflicted: bool,
}

impl Attribution {
    fn new(cause: DamageCause, source: Option<Combatant>, effect: Option<String>) -> Self {
        Self {
            cause,
            source,
            effect,
            self_inflicted: false,
        }
    }

    pub fn unattributed(source: Option<Combatant>, effect: Option<String>) -> Self {
        Self::new(DamageCause::Unattributed, source, effect)
    }

    /// Self-credit when nobody else is behind a cause that can be self-inflicted
    fn normalized(mut self, victim: &Combatant) -> Self {
        if self.source.as_ref() == Some(victim) {
            self.source = None;
            self.self_inflicted = true;
        }
        if self.source.is_none() {
            use crate::types::CauseCategory as C;
            self.self_inflicted |= matches!(
                self.cause.category(),
                C::SelfInflicted | C::Passive | C::Status
            );
        }
        self
    }
}

/// Last-known HP per combatant, as a percentage of max HP
#[derive(Debug, Clone, Default)]
pub struct HpTable {
    hp: HashMap<Combatant, f64>,
}

impl HpTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, combatant: &Combatant) -> Option<f64> {
        self.hp.get(combatant).copied()
    }

    /// HP a damage line can still take away (full HP when never seen)
    pub fn remaining(&self, combatant: &Combatant) -> f64 {
        self.get(combatant).unwrap_or(100.0)
    }

    /// Set the baseline from a switch-in line.
    ///
    /// Returns HP recovered while benched, which only a switch-in above the
    /// last-known value of a living combatant can show.
    pub fn switch_in(&mut self, combatant: &Combatant, hp: Option<&HpStatus>) -> f64 {
        let incoming = hp.map(HpStatus::percent).unwrap_or(100.0);
        let previous = self.hp.insert(combatant.clone(), incoming);

        match previous {
            Some(previous) if previous > 0.0 && incoming > previous => incoming - previous,
            _ => 0.0,
        }
    }

    /// Apply a damage line, returning the HP lost
    pub fn damage(&mut self, combatant: &Combatant, hp: &HpStatus) -> f64 {
        let before = self.remaining(combatant);
        let after = hp.percent();
        self.hp.insert(combatant.clone(), after);
        (before - after).max(0.0)
    }

    /// Apply a heal line, returning the HP recovered
    pub fn heal(&mut self, combatant: &Combatant, hp: &HpStatus) -> f64 {
        let before = self.remaining(combatant);
        let after = hp.percent();
        self.hp.insert(combatant.clone(), after);
        (after - before).max(0.0)
    }

    /// Overwrite the baseline with no attribution (Pain Split and friends)
    pub fn set(&mut self, combatant: &Combatant, hp: &HpStatus) {
        self.hp.insert(combatant.clone(), hp.percent());
    }

    /// Drain whatever is left, for faints with no terminal damage line
    pub fn drain(&mut self, combatant: &Combatant) -> f64 {
        let left = self.remaining(combatant);
        self.hp.insert(combatant.clone(), 0.0);
        left
    }
}

/// Decide what caused a damage line.
///
/// An inline `[from]` always wins. Without one the pending causal context
/// decides, and with neither the damage is unattributed.
pub fn attribute_damage(
    victim: &Combatant,
    annotations: &Annotations,
    of: Option<Combatant>,
    tracker: &CausalityTracker,
) -> Attribution {
    let attribution = match annotations.from.as_deref() {
        Some(from) => attribute_annotated(victim, from, annotations, of, tracker),
        None if annotations.has_flag("partiallytrapped") => Attribution::new(
            DamageCause::PartialTrap,
            of.or_else(|| tracker.effect_source(victim, Volatile::PartialTrap).cloned()),
            None,
        ),
        None => attribute_from_context(victim, tracker),
    };

    let attribution = attribution.normalized(victim);
    tracing::debug!(
        victim = %victim,
        cause = %attribution.cause,
        source = ?attribution.source.as_ref().map(|s| s.to_string()),
        "attributed damage"
    );
    attribution
}

fn attribute_annotated(
    victim: &Combatant,
    from: &str,
    annotations: &Annotations,
    of: Option<Combatant>,
    tracker: &CausalityTracker,
) -> Attribution {
    if let Some(item) = from.strip_prefix("item: ") {
        let cause = if CONTACT_ITEMS.contains(&item) {
            DamageCause::ContactItem
        } else {
            DamageCause::PassiveItem
        };
        return Attribution::new(cause, of, Some(item.to_string()));
    }

    if let Some(ability) = from.strip_prefix("ability: ") {
        let cause = if CONTACT_ABILITIES.contains(&ability) {
            DamageCause::ContactAbility
        } else {
            DamageCause::PassiveAbility
        };
        return Attribution::new(cause, of, Some(ability.to_string()));
    }

    let effect = annotations.from_effect().unwrap_or(from);

    if let Some(hazard) = SideCondition::parse(effect)
        && let Some(cause) = DamageCause::from_hazard(hazard)
    {
        let setter = tracker.hazard_setter(victim.player, hazard).cloned();
        return Attribution::new(cause, setter, Some(hazard.as_str().to_string()));
    }

    if let Some(weather) = Weather::parse(effect) {
        let setter = tracker.weather_setter(weather).cloned();
        return Attribution::new(
            DamageCause::from_weather(weather),
            setter,
            Some(weather.as_str().to_string()),
        );
    }

    if let Some(status) = Status::parse(effect) {
        let credit = tracker.status_credit(victim);
        // Toxic ticks are announced as plain psn
        let cause = match credit {
            Some(credit) if credit.status == Status::BadPoison => DamageCause::Toxic,
            _ => DamageCause::from_status(status),
        };
        let inflicter = credit.and_then(|c| c.inflicter.clone());
        return Attribution::new(cause, inflicter, Some(status.as_str().to_string()));
    }

    let normalized = effect.to_lowercase().replace([' ', '-', '\''], "");

    if RECOIL_EFFECTS.contains(&normalized.as_str()) {
        return Attribution::new(DamageCause::Recoil, None, Some(effect.to_string()));
    }
    if SACRIFICE_MOVES.contains(&normalized.as_str()) {
        return Attribution::new(DamageCause::Sacrifice, None, Some(effect.to_string()));
    }
    if normalized == "confusion" {
        return Attribution::new(DamageCause::Confusion, None, None);
    }

    let volatile = if annotations.has_flag("partiallytrapped") {
        Some(Volatile::PartialTrap)
    } else {
        Volatile::parse(effect)
    };
    let residual = match volatile {
        Some(Volatile::LeechSeed) => Some((DamageCause::LeechSeed, Volatile::LeechSeed)),
        Some(Volatile::PartialTrap) => Some((DamageCause::PartialTrap, Volatile::PartialTrap)),
        Some(v @ (Volatile::Curse | Volatile::Nightmare | Volatile::SaltCure)) => {
            Some((DamageCause::Curse, v))
        }
        _ => None,
    };
    if let Some((cause, volatile)) = residual {
        let source = of.or_else(|| tracker.effect_source(victim, volatile).cloned());
        return Attribution::new(cause, source, Some(effect.to_string()));
    }

    Attribution::unattributed(of, Some(effect.to_string()))
}

fn attribute_from_context(victim: &Combatant, tracker: &CausalityTracker) -> Attribution {
    match tracker.context() {
        CausalContext::PendingMove {
            attacker,
            move_name,
            ..
        } => {
            let effect = Some(move_name.clone());
            if attacker == victim {
                let cause = if move_name.eq_ignore_ascii_case("substitute") {
                    DamageCause::Substitute
                } else {
                    DamageCause::Sacrifice
                };
                Attribution::new(cause, None, effect)
            } else if attacker.is_ally_of(victim) {
                Attribution::new(DamageCause::FriendlyFire, Some(attacker.clone()), effect)
            } else {
                Attribution::new(DamageCause::Direct, Some(attacker.clone()), effect)
            }
        }
        CausalContext::PendingHazard { side, hazard } if *side == victim.player => {
            match DamageCause::from_hazard(*hazard) {
                Some(cause) => Attribution::new(
                    cause,
                    tracker.hazard_setter(*side, *hazard).cloned(),
                    Some(hazard.as_str().to_string()),
                ),
                None => Attribution::unattributed(None, None),
            }
        }
        CausalContext::PendingWeather { weather } => Attribution::new(
            DamageCause::from_weather(*weather),
            tracker.weather_setter(*weather).cloned(),
            Some(weather.as_str().to_string()),
        ),
        _ => Attribution::unattributed(None, None),
    }
}

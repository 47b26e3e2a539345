//! Per-combatant statistics records

use std::collections::BTreeMap;

use super::cause::DamageCause;
use super::combatant::Combatant;

/// HP percentage accumulated per cause.
///
/// Amounts are percentages of the damaged combatant's max HP, so a full KO
/// from 100% is 100.0 no matter the actual stat.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DamageLedger {
    by_cause: BTreeMap<DamageCause, f64>,
}

impl DamageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an amount under a cause. Non-positive amounts are ignored.
    pub fn add(&mut self, cause: DamageCause, amount: f64) {
        if amount > 0.0 {
            *self.by_cause.entry(cause).or_insert(0.0) += amount;
        }
    }

    pub fn get(&self, cause: DamageCause) -> f64 {
        self.by_cause.get(&cause).copied().unwrap_or(0.0)
    }

    /// Damage from an opposing move's primary effect
    pub fn direct(&self) -> f64 {
        self.get(DamageCause::Direct)
    }

    /// Everything that isn't direct
    pub fn indirect(&self) -> f64 {
        self.by_cause
            .iter()
            .filter(|(cause, _)| !cause.is_direct())
            .map(|(_, amount)| amount)
            .sum()
    }

    /// The part of [`indirect`](Self::indirect) a combatant did to itself
    /// (recoil, confusion, substitutes, sacrifices)
    pub fn self_inflicted(&self) -> f64 {
        self.by_cause
            .iter()
            .filter(|(cause, _)| cause.is_self_inflicted())
            .map(|(_, amount)| amount)
            .sum()
    }

    pub fn total(&self) -> f64 {
        self.by_cause.values().sum()
    }

    /// Causes with a recorded amount, in taxonomy order
    pub fn iter(&self) -> impl Iterator<Item = (DamageCause, f64)> + '_ {
        self.by_cause.iter().map(|(cause, amount)| (*cause, *amount))
    }

    pub fn is_empty(&self) -> bool {
        self.by_cause.is_empty()
    }

    pub fn merge(&mut self, other: &DamageLedger) {
        for (cause, amount) in other.iter() {
            self.add(cause, amount);
        }
    }
}

/// HP recovered by a combatant
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Healing {
    /// All healing, including regenerated
    pub total: f64,
    /// Recovered while benched (Regenerator)
    pub regenerated: f64,
}

impl Healing {
    pub fn add(&mut self, amount: f64) {
        if amount > 0.0 {
            self.total += amount;
        }
    }

    pub fn add_regenerated(&mut self, amount: f64) {
        if amount > 0.0 {
            self.total += amount;
            self.regenerated += amount;
        }
    }

    pub fn merge(&mut self, other: &Healing) {
        self.total += other.total;
        self.regenerated += other.regenerated;
    }
}

/// Everything recorded about one combatant over a match
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantStats {
    pub combatant: Combatant,

    /// Opponents this combatant knocked out
    pub knockouts: u32,
    pub fainted: bool,
    /// Its side won the match
    pub won: bool,
    /// Took the field at least once (roster entries that never switched in stay false)
    pub appeared: bool,
    /// Hits its substitute absorbed
    pub substitute_hits: u32,

    pub damage_dealt: DamageLedger,
    pub damage_taken: DamageLedger,
    pub healing: Healing,
}

impl CombatantStats {
    pub fn new(combatant: Combatant) -> Self {
        Self {
            combatant,
            knockouts: 0,
            fainted: false,
            won: false,
            appeared: false,
            substitute_hits: 0,
            damage_dealt: DamageLedger::new(),
            damage_taken: DamageLedger::new(),
            healing: Healing::default(),
        }
    }

    pub fn species(&self) -> &str {
        &self.combatant.species
    }

    /// Faints as a count (0 or 1 within one match)
    pub fn faints(&self) -> u32 {
        u32::from(self.fainted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replaydex_protocol::Player;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_ledger_direct_indirect_split() {
        let mut ledger = DamageLedger::new();
        ledger.add(DamageCause::Direct, 52.0);
        ledger.add(DamageCause::StealthRock, 12.5);
        ledger.add(DamageCause::Burn, 6.25);
        ledger.add(DamageCause::Direct, 10.0);

        assert!(approx(ledger.direct(), 62.0));
        assert!(approx(ledger.indirect(), 18.75));
        assert!(approx(ledger.total(), ledger.direct() + ledger.indirect()));
    }

    #[test]
    fn test_ledger_self_inflicted_is_part_of_indirect() {
        let mut ledger = DamageLedger::new();
        ledger.add(DamageCause::Recoil, 11.0);
        ledger.add(DamageCause::Substitute, 25.0);
        ledger.add(DamageCause::Poison, 12.5);

        assert!(approx(ledger.self_inflicted(), 36.0));
        assert!(approx(ledger.indirect(), 48.5));
    }

    #[test]
    fn test_ledger_ignores_non_positive() {
        let mut ledger = DamageLedger::new();
        ledger.add(DamageCause::Recoil, 0.0);
        ledger.add(DamageCause::Recoil, -5.0);

        assert!(ledger.is_empty());
        assert_eq!(ledger.get(DamageCause::Recoil), 0.0);
    }

    #[test]
    fn test_ledger_merge() {
        let mut a = DamageLedger::new();
        a.add(DamageCause::Spikes, 12.5);
        let mut b = DamageLedger::new();
        b.add(DamageCause::Spikes, 12.5);
        b.add(DamageCause::Direct, 40.0);

        a.merge(&b);
        assert!(approx(a.get(DamageCause::Spikes), 25.0));
        assert!(approx(a.total(), 65.0));
    }

    #[test]
    fn test_healing_regenerated_counts_toward_total() {
        let mut healing = Healing::default();
        healing.add(25.0);
        healing.add_regenerated(33.0);

        assert!(approx(healing.total, 58.0));
        assert!(approx(healing.regenerated, 33.0));
    }

    #[test]
    fn test_new_record_is_empty() {
        let stats = CombatantStats::new(Combatant::new(Player::P2, "Toxapex"));
        assert_eq!(stats.species(), "Toxapex");
        assert_eq!(stats.knockouts, 0);
        assert_eq!(stats.faints(), 0);
        assert!(stats.damage_dealt.is_empty());
    }
}

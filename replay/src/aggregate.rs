//! Per-species statistics summed across many matches

use std::collections::BTreeMap;

use serde::Serialize;

use replaydex_battle::{CombatantStats, DamageLedger, Healing, MatchReport};

use crate::normalize::{normalize_species, strip_wildcard};

/// How match records are grouped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Merge formes such as `Gastrodon-East` into `Gastrodon`
    pub collapse_cosmetic_formes: bool,
    /// Skip team members that never left the bench
    pub require_appearance: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            collapse_cosmetic_formes: true,
            require_appearance: false,
        }
    }
}

/// Direct/indirect split of a damage ledger
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DamageTotals {
    pub direct: f64,
    pub indirect: f64,
    pub total: f64,
}

impl DamageTotals {
    fn from_ledger(ledger: &DamageLedger) -> Self {
        Self {
            direct: ledger.direct(),
            indirect: ledger.indirect(),
            total: ledger.total(),
        }
    }

    fn per(self, games: f64) -> Self {
        Self {
            direct: self.direct / games,
            indirect: self.indirect / games,
            total: self.total / games,
        }
    }
}

/// Totals divided by games played
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PerGame {
    pub knockouts: f64,
    pub faints: f64,
    pub damage_dealt: DamageTotals,
    pub damage_taken: DamageTotals,
    pub healing: f64,
}

/// One species across every analyzed match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesSummary {
    pub species: String,
    pub games_played: u32,
    pub wins: u32,
    pub knockouts: u32,
    pub faints: u32,
    pub substitute_hits: u32,
    pub damage_dealt: DamageTotals,
    pub damage_taken: DamageTotals,
    pub damage_dealt_by_cause: DamageLedger,
    pub damage_taken_by_cause: DamageLedger,
    pub healing: Healing,
    pub per_game: PerGame,
    /// Knockouts per faint; plain knockouts when never fainted
    pub ko_ratio: f64,
}

/// Result of aggregating a batch
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub matches_analyzed: u32,
    pub matches_failed: u32,
    /// Sorted by species name
    pub species: Vec<SpeciesSummary>,
}

impl BatchSummary {
    pub fn species(&self, name: &str) -> Option<&SpeciesSummary> {
        self.species.iter().find(|summary| summary.species == name)
    }

    /// Count matches that failed before reaching analysis (unreadable files)
    pub fn record_failures(&mut self, count: u32) {
        self.matches_failed += count;
    }
}

#[derive(Debug, Default)]
struct SpeciesAccumulator {
    games_played: u32,
    wins: u32,
    knockouts: u32,
    faints: u32,
    substitute_hits: u32,
    damage_dealt: DamageLedger,
    damage_taken: DamageLedger,
    healing: Healing,
}

impl SpeciesAccumulator {
    fn add(&mut self, stats: &CombatantStats) {
        self.games_played += 1;
        self.wins += u32::from(stats.won);
        self.knockouts += stats.knockouts;
        self.faints += stats.faints();
        self.substitute_hits += stats.substitute_hits;
        self.damage_dealt.merge(&stats.damage_dealt);
        self.damage_taken.merge(&stats.damage_taken);
        self.healing.merge(&stats.healing);
    }

    fn summarize(self, species: String) -> SpeciesSummary {
        let games = f64::from(self.games_played.max(1));
        let damage_dealt = DamageTotals::from_ledger(&self.damage_dealt);
        let damage_taken = DamageTotals::from_ledger(&self.damage_taken);

        let ko_ratio = if self.faints == 0 {
            f64::from(self.knockouts)
        } else {
            f64::from(self.knockouts) / f64::from(self.faints)
        };

        SpeciesSummary {
            species,
            games_played: self.games_played,
            wins: self.wins,
            knockouts: self.knockouts,
            faints: self.faints,
            substitute_hits: self.substitute_hits,
            damage_dealt,
            damage_taken,
            per_game: PerGame {
                knockouts: f64::from(self.knockouts) / games,
                faints: f64::from(self.faints) / games,
                damage_dealt: damage_dealt.per(games),
                damage_taken: damage_taken.per(games),
                healing: self.healing.total / games,
            },
            damage_dealt_by_cause: self.damage_dealt,
            damage_taken_by_cause: self.damage_taken,
            healing: self.healing,
            ko_ratio,
        }
    }
}

/// Folds match reports into per-species totals.
///
/// Every (player, species) record of a match counts as one game for that
/// species, so a mirror match counts twice.
#[derive(Debug, Default)]
pub struct CrossMatchAggregator {
    options: AggregateOptions,
    species: BTreeMap<String, SpeciesAccumulator>,
    matches_analyzed: u32,
    matches_failed: u32,
}

impl CrossMatchAggregator {
    pub fn new(options: AggregateOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    fn key(&self, species: &str) -> String {
        if self.options.collapse_cosmetic_formes {
            normalize_species(species)
        } else {
            strip_wildcard(species).to_string()
        }
    }

    pub fn add(&mut self, report: &MatchReport) {
        for stats in &report.combatants {
            if self.options.require_appearance && !stats.appeared {
                continue;
            }
            let key = self.key(stats.species());
            self.species.entry(key).or_default().add(stats);
        }
        self.matches_analyzed += 1;
    }

    /// A match excluded from the totals
    pub fn record_failure(&mut self) {
        self.matches_failed += 1;
    }

    pub fn finish(self) -> BatchSummary {
        BatchSummary {
            matches_analyzed: self.matches_analyzed,
            matches_failed: self.matches_failed,
            species: self
                .species
                .into_iter()
                .map(|(species, acc)| acc.summarize(species))
                .collect(),
        }
    }
}

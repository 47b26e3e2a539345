//! MatchAnalyzer - folds classified events into per-combatant statistics

use std::collections::HashMap;

use replaydex_protocol::{
    Annotations, Event, HpStatus, Player, Pokemon, PokemonDetails, SwitchKind,
};

use super::attributor::{Attribution, HpTable, attribute_damage};
use super::causality::CausalityTracker;
use super::identity::IdentityResolver;
use super::report::{Knockout, MatchReport, PlayerInfo, Roster, UncreditedFaint, Winner};
use crate::AnalysisError;
use crate::types::{
    Combatant, CombatantStats, DamageCause, SideCondition, Status, Volatile, Weather,
};

/// Where a match scan is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanPhase {
    #[default]
    NotStarted,
    Scanning,
    Completed,
}

/// Single-use, single-threaded fold over one match's events.
///
/// Feed every event in log order with [`process`](Self::process), then call
/// [`finish`](Self::finish) once for the report.
#[derive(Debug, Clone, Default)]
pub struct MatchAnalyzer {
    phase: ScanPhase,

    identity: IdentityResolver,
    causality: CausalityTracker,
    hp: HpTable,

    /// Per-combatant records, in the order first seen
    records: Vec<CombatantStats>,
    index: HashMap<Combatant, usize>,

    /// Attribution of the delta that took each combatant to 0 HP
    terminal: HashMap<Combatant, Attribution>,

    knockouts: Vec<Knockout>,
    uncredited_faints: Vec<UncreditedFaint>,
    winner: Option<Winner>,

    /// Current turn number (0 = not started)
    turn: u32,
}

impl MatchAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    /// Process one event. The first event starts the scan.
    pub fn process(&mut self, event: &Event) -> Result<(), AnalysisError> {
        match self.phase {
            ScanPhase::Completed => return Err(AnalysisError::AlreadyCompleted),
            ScanPhase::NotStarted => self.phase = ScanPhase::Scanning,
            ScanPhase::Scanning => {}
        }

        self.update(event);
        Ok(())
    }

    /// End the scan and produce the report.
    ///
    /// Fails when either player's declaration or roster never showed up,
    /// since nothing in the report could be trusted without them.
    pub fn finish(&mut self) -> Result<MatchReport, AnalysisError> {
        match self.phase {
            ScanPhase::Completed => return Err(AnalysisError::AlreadyCompleted),
            ScanPhase::NotStarted => {
                self.phase = ScanPhase::Completed;
                return Err(AnalysisError::EmptyLog);
            }
            ScanPhase::Scanning => self.phase = ScanPhase::Completed,
        }

        for player in [Player::P1, Player::P2] {
            if self.identity.username(player).is_none() {
                return Err(AnalysisError::MissingPlayer(player));
            }
            if self.identity.roster(player).is_empty() {
                return Err(AnalysisError::EmptyRoster(player));
            }
        }

        let players = self
            .identity
            .sides()
            .filter(|side| !side.username.is_empty())
            .map(|side| PlayerInfo {
                player: side.player,
                username: side.username.clone(),
            })
            .collect();
        let rosters = self
            .identity
            .sides()
            .map(|side| Roster {
                player: side.player,
                species: side.roster.clone(),
            })
            .collect();

        Ok(MatchReport {
            players,
            rosters,
            knockouts: std::mem::take(&mut self.knockouts),
            uncredited_faints: std::mem::take(&mut self.uncredited_faints),
            winner: self.winner.take(),
            turns: self.turn,
            combatants: std::mem::take(&mut self.records),
        })
    }

    fn update(&mut self, event: &Event) {
        match event {
            // === Match setup ===
            Event::PlayerDeclared { player, username } => {
                self.identity.set_username(*player, username);
            }

            Event::RosterEntry {
                player,
                details,
                has_item: _,
            } => {
                self.identity.declare(*player, details);
                self.record_index(&Combatant::new(*player, details.species.clone()));
            }

            Event::TurnStarted(turn) => {
                self.turn = *turn;
                self.causality.on_turn();
            }

            // === Major actions ===
            Event::SwitchIn {
                pokemon,
                details,
                hp_status,
                kind,
            } => {
                self.handle_switch(pokemon, details, hp_status.as_ref(), *kind);
            }

            Event::Move {
                pokemon,
                move_name,
                target,
                annotations: _,
            } => {
                let attacker = self.identity.resolve(pokemon);
                let target = target.as_ref().map(|t| self.identity.resolve(t));
                self.record_index(&attacker);
                self.causality.on_move(attacker, target, move_name);
            }

            Event::Faint(pokemon) => {
                self.handle_faint(pokemon);
            }

            // === HP changes ===
            Event::DamageDelta {
                pokemon,
                hp_status,
                annotations,
            } => {
                self.handle_damage(pokemon, hp_status, annotations);
            }

            Event::HealDelta {
                pokemon,
                hp_status,
                annotations,
            } => {
                let combatant = self.identity.resolve(pokemon);
                let amount = self.hp.heal(&combatant, hp_status);
                let idx = self.record_index(&combatant);
                if annotations.from.as_deref() == Some("ability: Regenerator") {
                    self.records[idx].healing.add_regenerated(amount);
                } else {
                    self.records[idx].healing.add(amount);
                }
            }

            Event::HpSet {
                targets,
                annotations: _,
            } => {
                for (pokemon, hp_status) in targets {
                    let combatant = self.identity.resolve(pokemon);
                    self.hp.set(&combatant, hp_status);
                }
            }

            // === Status ===
            Event::StatusApplied {
                pokemon,
                status,
                annotations,
            } => {
                self.handle_status(pokemon, status, annotations);
            }

            Event::StatusCured { pokemon, .. } => {
                let combatant = self.identity.resolve(pokemon);
                self.causality.clear_status(&combatant);
            }

            // === Field ===
            Event::SideHazardAdded {
                side,
                condition,
                annotations,
            } => {
                if let Some(hazard) = SideCondition::parse(condition) {
                    let setter = self.credited_source(annotations);
                    self.causality.on_hazard_added(*side, hazard, setter);
                }
            }

            Event::SideHazardRemoved {
                side, condition, ..
            } => {
                if let Some(hazard) = SideCondition::parse(condition) {
                    self.causality.on_hazard_removed(*side, hazard);
                }
            }

            Event::WeatherChanged {
                weather,
                annotations,
            } => {
                let upkeep = annotations.has_flag("upkeep");
                let setter = if upkeep {
                    None
                } else {
                    self.credited_source(annotations)
                };
                self.causality
                    .on_weather(Weather::parse(weather), setter, upkeep);
            }

            // === Volatile effects ===
            Event::EffectStarted {
                pokemon,
                effect,
                annotations,
            } => {
                self.handle_effect_start(pokemon, effect, annotations);
            }

            Event::EffectActivated {
                pokemon: Some(pokemon),
                effect,
                annotations,
            } => {
                self.handle_activate(pokemon, effect, annotations);
            }

            Event::EffectEnded {
                pokemon,
                effect,
                annotations,
            } => {
                self.handle_effect_end(pokemon, effect, annotations);
            }

            // === Outcome ===
            Event::Win(name) => {
                self.handle_win(name);
            }

            Event::Tie => {
                self.winner = Some(Winner::Tie);
            }

            Event::EffectActivated { pokemon: None, .. } | Event::Other => {}
        }
    }

    // === Records ===

    /// Get or create the record for a combatant
    fn record_index(&mut self, combatant: &Combatant) -> usize {
        if let Some(&idx) = self.index.get(combatant) {
            return idx;
        }
        self.records.push(CombatantStats::new(combatant.clone()));
        let idx = self.records.len() - 1;
        self.index.insert(combatant.clone(), idx);
        idx
    }

    fn record_mut(&mut self, combatant: &Combatant) -> &mut CombatantStats {
        let idx = self.record_index(combatant);
        &mut self.records[idx]
    }

    /// Move a team preview wildcard's record to the concrete species
    fn rename_record(&mut self, from: Combatant, to: &Combatant) {
        if self.index.contains_key(to) {
            return;
        }
        if let Some(idx) = self.index.remove(&from) {
            self.records[idx].combatant = to.clone();
            self.index.insert(to.clone(), idx);
        }
    }

    /// Resolve the `[of]` pokemon, or fall back to whoever is mid-move
    fn credited_source(&self, annotations: &Annotations) -> Option<Combatant> {
        annotations
            .of
            .as_ref()
            .map(|of| self.identity.resolve(of))
            .or_else(|| self.causality.pending_attacker().cloned())
    }

    fn credit_damage(&mut self, victim: &Combatant, attribution: &Attribution, amount: f64) {
        self.record_mut(victim)
            .damage_taken
            .add(attribution.cause, amount);
        if let Some(source) = &attribution.source {
            self.record_mut(source)
                .damage_dealt
                .add(attribution.cause, amount);
        }
    }

    // === Handlers ===

    fn handle_switch(
        &mut self,
        pokemon: &Pokemon,
        details: &PokemonDetails,
        hp_status: Option<&HpStatus>,
        kind: SwitchKind,
    ) {
        let outcome = self.identity.switch_in(pokemon, details);
        let combatant = Combatant::new(pokemon.player, outcome.species);

        if let Some(wildcard) = outcome.replaced_wildcard {
            self.rename_record(Combatant::new(pokemon.player, wildcard), &combatant);
        }

        let idx = self.record_index(&combatant);
        self.records[idx].appeared = true;

        // An Illusion reveal is the same pokemon, not a new arrival
        if kind == SwitchKind::Replace {
            if let Some(hp) = hp_status {
                self.hp.set(&combatant, hp);
            }
            return;
        }

        let regenerated = self.hp.switch_in(&combatant, hp_status);
        if !self.records[idx].fainted {
            self.records[idx].healing.add_regenerated(regenerated);
        }
        self.causality.on_switch_in(&combatant);
    }

    fn handle_damage(&mut self, pokemon: &Pokemon, hp_status: &HpStatus, annotations: &Annotations) {
        let victim = self.identity.resolve(pokemon);
        let of = annotations.of.as_ref().map(|of| self.identity.resolve(of));

        let amount = self.hp.damage(&victim, hp_status);
        if amount <= 0.0 {
            return;
        }

        if let Some(status) = hp_status.status.as_deref().and_then(Status::parse) {
            self.causality.observe_status(&victim, status);
        }

        let attribution = attribute_damage(&victim, annotations, of, &self.causality);
        self.credit_damage(&victim, &attribution, amount);

        if self.hp.remaining(&victim) <= 0.0 {
            self.terminal.insert(victim, attribution);
        }
    }

    fn handle_status(&mut self, pokemon: &Pokemon, status: &str, annotations: &Annotations) {
        let Some(status) = Status::parse(status) else {
            return;
        };
        let victim = self.identity.resolve(pokemon);

        let inflicter = if annotations
            .from
            .as_deref()
            .is_some_and(|from| from.starts_with("item: "))
        {
            // Toxic Orb, Flame Orb
            Some(victim.clone())
        } else if let Some(of) = &annotations.of {
            Some(self.identity.resolve(of))
        } else if let Some((side, SideCondition::ToxicSpikes)) = self.causality.pending_hazard()
            && side == victim.player
        {
            self.causality
                .hazard_setter(side, SideCondition::ToxicSpikes)
                .cloned()
        } else {
            self.causality.pending_attacker().cloned()
        };

        tracing::debug!(
            victim = %victim,
            status = %status,
            inflicter = ?inflicter.as_ref().map(|c| c.to_string()),
            "status applied"
        );
        self.causality.record_status(victim, status, inflicter);
    }

    fn handle_effect_start(&mut self, pokemon: &Pokemon, effect: &str, annotations: &Annotations) {
        let Some(volatile) = Volatile::parse(effect) else {
            return;
        };
        let target = self.identity.resolve(pokemon);

        match volatile {
            // `-start` names the user; it lands on the other side
            Volatile::FutureSight => {
                self.causality
                    .record_future_attack(target.player.foe(), target);
            }
            Volatile::PerishSong => {
                let singer = self.credited_source(annotations);
                if effect.ends_with('0') {
                    self.causality.record_perish_zero(target.clone());
                }
                self.causality
                    .record_effect(target, Volatile::PerishSong, singer);
            }
            Volatile::Substitute if annotations.has_flag("damage") => {
                self.record_mut(&target).substitute_hits += 1;
            }
            v if v.is_residual() => {
                let source = self.credited_source(annotations);
                self.causality.record_effect(target, v, source);
            }
            _ => {}
        }
    }

    fn handle_activate(&mut self, pokemon: &Pokemon, effect: &str, annotations: &Annotations) {
        let Some(volatile) = Volatile::parse(effect) else {
            return;
        };
        let target = self.identity.resolve(pokemon);

        match volatile {
            Volatile::Substitute if annotations.has_flag("damage") => {
                self.record_mut(&target).substitute_hits += 1;
            }
            Volatile::DestinyBond => {
                self.causality.record_destiny_bond(target);
            }
            Volatile::PartialTrap => {
                let trapper = self.credited_source(annotations);
                self.causality
                    .record_effect(target, Volatile::PartialTrap, trapper);
            }
            _ => {}
        }
    }

    fn handle_effect_end(&mut self, pokemon: &Pokemon, effect: &str, annotations: &Annotations) {
        let Some(volatile) = Volatile::parse(effect) else {
            return;
        };
        let target = self.identity.resolve(pokemon);

        match volatile {
            // `-end` names the target the delayed attack lands on
            Volatile::FutureSight => {
                if let Some(user) = self.causality.take_future_attack(target.player) {
                    let move_name = effect.strip_prefix("move: ").unwrap_or(effect);
                    self.causality.on_delayed_hit(user, target, move_name);
                }
            }
            Volatile::Substitute => {
                if !annotations.has_flag("silent") {
                    self.record_mut(&target).substitute_hits += 1;
                }
                self.causality.end_effect(&target, volatile);
            }
            _ => self.causality.end_effect(&target, volatile),
        }
    }

    fn handle_faint(&mut self, pokemon: &Pokemon) {
        let victim = self.identity.resolve(pokemon);
        let idx = self.record_index(&victim);

        if self.records[idx].fainted {
            tracing::debug!(victim = %victim, "repeat faint, no further credit");
            self.hp.drain(&victim);
            self.terminal.remove(&victim);
            self.causality.on_faint(&victim);
            return;
        }
        self.records[idx].fainted = true;

        let attribution = if self.hp.remaining(&victim) > 0.0 {
            // No terminal damage line: self-KO moves, Destiny Bond, Perish Song
            let attribution = self.synthetic_terminal(&victim);
            let amount = self.hp.drain(&victim);
            self.credit_damage(&victim, &attribution, amount);
            Some(attribution)
        } else {
            self.terminal.remove(&victim)
        };

        self.credit_knockout(victim.clone(), attribution);
        self.causality.on_faint(&victim);
    }

    fn synthetic_terminal(&self, victim: &Combatant) -> Attribution {
        let attribution = if let Some(bonder) = self.causality.destiny_bond()
            && bonder != victim
        {
            Attribution {
                cause: DamageCause::DelayedMove,
                source: Some(bonder.clone()),
                effect: Some("Destiny Bond".to_string()),
                self_inflicted: false,
            }
        } else if self.causality.is_perish_zero(victim) {
            let singer = self
                .causality
                .effect_source(victim, Volatile::PerishSong)
                .filter(|singer| *singer != victim)
                .cloned();
            Attribution {
                cause: DamageCause::DelayedMove,
                self_inflicted: singer.is_none(),
                source: singer,
                effect: Some("Perish Song".to_string()),
            }
        } else if self.causality.pending_attacker() == Some(victim) {
            Attribution {
                cause: DamageCause::Sacrifice,
                source: None,
                effect: self.causality.pending_move().map(str::to_string),
                self_inflicted: true,
            }
        } else {
            Attribution::unattributed(None, None)
        };

        tracing::debug!(victim = %victim, cause = %attribution.cause, "faint without terminal delta");
        attribution
    }

    fn credit_knockout(&mut self, victim: Combatant, attribution: Option<Attribution>) {
        let attribution =
            attribution.unwrap_or_else(|| Attribution::unattributed(None, None));

        let attacker = match attribution.source {
            Some(source) => source,
            None if attribution.self_inflicted => victim.clone(),
            None => {
                // Unattributed, or a hazard/weather whose setter was never seen
                tracing::debug!(victim = %victim, cause = %attribution.cause, "knockout not credited");
                self.uncredited_faints.push(UncreditedFaint {
                    victim,
                    cause: attribution.cause,
                    credited: attribution.effect,
                    turn: self.turn,
                });
                return;
            }
        };

        if !attacker.is_ally_of(&victim) {
            self.record_mut(&attacker).knockouts += 1;
        }

        tracing::debug!(
            attacker = %attacker,
            victim = %victim,
            cause = %attribution.cause,
            turn = self.turn,
            "knockout"
        );
        self.knockouts.push(Knockout {
            attacker,
            victim,
            cause: attribution.cause,
            credited: attribution.effect,
            turn: self.turn,
        });
    }

    fn handle_win(&mut self, name: &str) {
        let Some(player) = self
            .identity
            .player_for_username(name)
            .or_else(|| Player::parse(name))
        else {
            tracing::warn!(winner = name, "winner matches no declared player");
            return;
        };

        for record in &mut self.records {
            if record.combatant.player.is_ally_of(player) {
                record.won = true;
            }
        }
        self.winner = Some(Winner::Side {
            player,
            username: name.to_string(),
        });
    }
}

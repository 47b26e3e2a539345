//! Causal context and credit ledgers
//!
//! The log never says "A's move did this damage" on the damage line itself;
//! the cause is whatever happened just before. [`CausalContext`] holds that
//! single most recent hint. Effects that keep dealing damage long after the
//! line that caused them (hazards, weather, status, Leech Seed...) are
//! remembered separately so the right combatant gets the credit later.

use std::collections::{HashMap, HashSet};

use replaydex_protocol::Player;

use crate::types::{Combatant, FieldState, SideCondition, Status, Volatile, Weather};

/// The one active causal hint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CausalContext {
    #[default]
    Idle,
    PendingMove {
        attacker: Combatant,
        target: Option<Combatant>,
        move_name: String,
    },
    PendingHazard {
        side: Player,
        hazard: SideCondition,
    },
    PendingWeather {
        weather: Weather,
    },
}

/// A non-volatile status and whoever inflicted it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCredit {
    pub status: Status,
    pub inflicter: Option<Combatant>,
}

#[derive(Debug, Clone, Default)]
pub struct CausalityTracker {
    context: CausalContext,

    /// Hazards and weather with their setters
    pub field: FieldState,

    statuses: HashMap<Combatant, StatusCredit>,
    effects: HashMap<(Combatant, Volatile), Option<Combatant>>,

    /// Future Sight / Doom Desire users, by the side they will land on
    future_attacks: [Option<Combatant>; 4],

    /// Destiny Bond user for the current turn
    destiny_bond: Option<Combatant>,

    /// Perish count reached 0
    perished: HashSet<Combatant>,
}

impl CausalityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current hint. Reading never clears it.
    pub fn context(&self) -> &CausalContext {
        &self.context
    }

    // === Transitions ===

    pub fn on_move(&mut self, attacker: Combatant, target: Option<Combatant>, move_name: &str) {
        self.context = CausalContext::PendingMove {
            attacker,
            target,
            move_name: move_name.to_string(),
        };
    }

    /// A new turn starts with no pending cause
    pub fn on_turn(&mut self) {
        self.context = CausalContext::Idle;
        self.destiny_bond = None;
    }

    /// Switch-ins onto a side with hazards wait for the hazard to trigger
    pub fn on_switch_in(&mut self, combatant: &Combatant) {
        self.effects.retain(|(target, _), _| target != combatant);
        self.perished.remove(combatant);

        self.context = match self.field.entry_hazard(combatant.player) {
            Some(hazard) => CausalContext::PendingHazard {
                side: combatant.player,
                hazard,
            },
            None => CausalContext::Idle,
        };
    }

    pub fn on_hazard_added(
        &mut self,
        side: Player,
        hazard: SideCondition,
        setter: Option<Combatant>,
    ) {
        self.field.add_hazard(side, hazard, setter);
        self.context = CausalContext::PendingHazard { side, hazard };
    }

    pub fn on_hazard_removed(&mut self, side: Player, hazard: SideCondition) {
        self.field.remove_hazard(side, hazard);
    }

    /// New weather records its setter. An upkeep line only refreshes the hint.
    pub fn on_weather(&mut self, weather: Option<Weather>, setter: Option<Combatant>, upkeep: bool) {
        let Some(weather) = weather else {
            self.field.clear_weather();
            self.context = CausalContext::Idle;
            return;
        };

        if !upkeep {
            self.field.set_weather(weather, setter);
        }
        self.context = CausalContext::PendingWeather { weather };
    }

    /// Replace the hint with a move that lands without a `|move|` line
    /// (Future Sight, Doom Desire)
    pub fn on_delayed_hit(&mut self, attacker: Combatant, target: Combatant, move_name: &str) {
        self.on_move(attacker, Some(target), move_name);
    }

    // === Queries ===

    pub fn pending_attacker(&self) -> Option<&Combatant> {
        match &self.context {
            CausalContext::PendingMove { attacker, .. } => Some(attacker),
            _ => None,
        }
    }

    pub fn pending_move(&self) -> Option<&str> {
        match &self.context {
            CausalContext::PendingMove { move_name, .. } => Some(move_name.as_str()),
            _ => None,
        }
    }

    pub fn pending_hazard(&self) -> Option<(Player, SideCondition)> {
        match &self.context {
            CausalContext::PendingHazard { side, hazard } => Some((*side, *hazard)),
            _ => None,
        }
    }

    pub fn hazard_setter(&self, side: Player, hazard: SideCondition) -> Option<&Combatant> {
        self.field.hazard_setter(side, hazard)
    }

    pub fn weather_setter(&self, weather: Weather) -> Option<&Combatant> {
        self.field.weather_setter(weather)
    }

    // === Status ledger ===

    pub fn record_status(&mut self, victim: Combatant, status: Status, inflicter: Option<Combatant>) {
        self.statuses
            .insert(victim, StatusCredit { status, inflicter });
    }

    /// Trust the status an HP field shows over the one recorded. The
    /// inflicter is kept; a status that was never announced has none.
    pub fn observe_status(&mut self, victim: &Combatant, status: Status) {
        match self.statuses.get_mut(victim) {
            Some(credit) => credit.status = status,
            None => {
                self.statuses.insert(
                    victim.clone(),
                    StatusCredit {
                        status,
                        inflicter: None,
                    },
                );
            }
        }
    }

    pub fn clear_status(&mut self, victim: &Combatant) {
        self.statuses.remove(victim);
    }

    pub fn status_credit(&self, victim: &Combatant) -> Option<&StatusCredit> {
        self.statuses.get(victim)
    }

    // === Volatile effect ledger ===

    /// Remember who started an effect. A refresh keeps the first source.
    pub fn record_effect(&mut self, target: Combatant, effect: Volatile, source: Option<Combatant>) {
        let entry = self.effects.entry((target, effect)).or_insert(None);
        if entry.is_none() {
            *entry = source;
        }
    }

    pub fn end_effect(&mut self, target: &Combatant, effect: Volatile) {
        self.effects.remove(&(target.clone(), effect));
    }

    pub fn has_effect(&self, target: &Combatant, effect: Volatile) -> bool {
        self.effects.contains_key(&(target.clone(), effect))
    }

    pub fn effect_source(&self, target: &Combatant, effect: Volatile) -> Option<&Combatant> {
        self.effects
            .get(&(target.clone(), effect))
            .and_then(|source| source.as_ref())
    }

    // === Delayed moves ===

    pub fn record_future_attack(&mut self, target_side: Player, user: Combatant) {
        self.future_attacks[target_side.index()] = Some(user);
    }

    pub fn take_future_attack(&mut self, target_side: Player) -> Option<Combatant> {
        self.future_attacks[target_side.index()].take()
    }

    pub fn record_destiny_bond(&mut self, user: Combatant) {
        self.destiny_bond = Some(user);
    }

    pub fn destiny_bond(&self) -> Option<&Combatant> {
        self.destiny_bond.as_ref()
    }

    pub fn record_perish_zero(&mut self, target: Combatant) {
        self.perished.insert(target);
    }

    pub fn is_perish_zero(&self, target: &Combatant) -> bool {
        self.perished.contains(target)
    }

    /// Forget everything attached to a combatant that left the battle
    pub fn on_faint(&mut self, victim: &Combatant) {
        self.statuses.remove(victim);
        self.effects.retain(|(target, _), _| target != victim);
        self.perished.remove(victim);
    }
}

//! Field conditions and who set them

use std::collections::HashMap;

use replaydex_protocol::Player;

use super::combatant::Combatant;
use super::conditions::{SideCondition, Weather};

/// Active weather and the combatant that summoned it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherState {
    pub weather: Weather,
    /// None when the log never said who
    pub setter: Option<Combatant>,
}

/// Field conditions that can keep dealing damage after the line that set them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    /// Current weather condition
    pub weather: Option<WeatherState>,

    /// Hazards per side (indexed by Player), with the setter of each
    hazards: [HashMap<SideCondition, Option<Combatant>>; 4],
}

impl FieldState {
    /// Create a new empty field state
    pub fn new() -> Self {
        Self::default()
    }

    /// Set weather. Re-announcing the same weather keeps the original setter.
    pub fn set_weather(&mut self, weather: Weather, setter: Option<Combatant>) {
        match &mut self.weather {
            Some(state) if state.weather == weather => {
                if state.setter.is_none() {
                    state.setter = setter;
                }
            }
            _ => self.weather = Some(WeatherState { weather, setter }),
        }
    }

    /// Clear weather
    pub fn clear_weather(&mut self) {
        self.weather = None;
    }

    pub fn weather_setter(&self, weather: Weather) -> Option<&Combatant> {
        self.weather
            .as_ref()
            .filter(|state| state.weather == weather)
            .and_then(|state| state.setter.as_ref())
    }

    /// Record a hazard layer. The first setter keeps the credit for stacked layers.
    pub fn add_hazard(&mut self, side: Player, hazard: SideCondition, setter: Option<Combatant>) {
        let entry = self.hazards[side.index()].entry(hazard).or_insert(None);
        if entry.is_none() {
            *entry = setter;
        }
    }

    pub fn remove_hazard(&mut self, side: Player, hazard: SideCondition) {
        self.hazards[side.index()].remove(&hazard);
    }

    pub fn has_hazard(&self, side: Player, hazard: SideCondition) -> bool {
        self.hazards[side.index()].contains_key(&hazard)
    }

    pub fn hazard_setter(&self, side: Player, hazard: SideCondition) -> Option<&Combatant> {
        self.hazards[side.index()]
            .get(&hazard)
            .and_then(|setter| setter.as_ref())
    }

    /// The hazard a switch-in onto this side triggers first, if any.
    ///
    /// Toxic Spikes wins because its effect is an unannotated `-status`,
    /// while damaging hazards always name themselves in `[from]`.
    pub fn entry_hazard(&self, side: Player) -> Option<SideCondition> {
        const ORDER: [SideCondition; 4] = [
            SideCondition::ToxicSpikes,
            SideCondition::StealthRock,
            SideCondition::Spikes,
            SideCondition::Steelsurge,
        ];
        ORDER
            .into_iter()
            .find(|hazard| self.has_hazard(side, *hazard))
    }
}

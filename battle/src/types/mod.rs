//! Domain types for battle log analysis

mod cause;
mod combatant;
mod conditions;
mod field;
mod side;
mod stats;
mod status;

pub use cause::{CauseCategory, DamageCause};
pub use combatant::{Combatant, base_species, same_base_species};
pub use conditions::{SideCondition, Weather};
pub use field::{FieldState, WeatherState};
pub use side::{SideState, SlotOccupant};
pub use stats::{CombatantStats, DamageLedger, Healing};
pub use status::{Status, Volatile};

//! Match analysis from classified log events

mod analyzer;
mod attributor;
mod causality;
mod identity;
mod report;

pub use analyzer::{MatchAnalyzer, ScanPhase};
pub use attributor::{Attribution, HpTable, attribute_damage};
pub use causality::{CausalContext, CausalityTracker, StatusCredit};
pub use identity::{IdentityResolver, SwitchOutcome, position_to_slot};
pub use report::{Knockout, MatchReport, PlayerInfo, Roster, UncreditedFaint, Winner};

//! Damage, healing and knockout attribution for Pokemon Showdown battle logs.
//!
//! # Overview
//!
//! `replaydex-battle` sits between `replaydex-protocol` (line classification)
//! and the cross-match statistics in `replaydex-replay`:
//!
//! ```text
//! replaydex-protocol (Event per log line)
//!        │
//!        ▼
//! replaydex-battle (identity, causality, attribution) ← THIS CRATE
//!        │
//!        ├─> replaydex-replay (batches of matches)
//!        └─> replaydex-cli
//! ```
//!
//! # Main Types
//!
//! ## Domain Types
//! - [`Combatant`] - A species fielded by one player; what statistics are keyed by
//! - [`DamageCause`] - Every HP loss lands in exactly one cause
//! - [`CombatantStats`] - Damage dealt/taken per cause, healing, knockouts
//! - [`Status`], [`Volatile`], [`Weather`], [`SideCondition`] - Effects that cause damage later
//!
//! ## Analysis
//! - [`MatchAnalyzer`] - Folds events into per-combatant statistics
//! - [`analyze`] - One log string in, one [`MatchReport`] out
//!
//! # Example Usage
//!
//! ```ignore
//! use replaydex_battle::{analyze, DamageCause, Player};
//!
//! let report = analyze(&log)?;
//!
//! if let Some(chomp) = report.combatant(Player::P1, "Garchomp") {
//!     println!("direct: {}", chomp.damage_dealt.direct());
//!     println!("rocks: {}", chomp.damage_dealt.get(DamageCause::StealthRock));
//! }
//! ```

use thiserror::Error;

pub mod tracking;
pub mod types;

// Re-export main types at crate root for convenience
pub use tracking::{
    CausalContext, CausalityTracker, IdentityResolver, Knockout, MatchAnalyzer, MatchReport,
    PlayerInfo, Roster, ScanPhase, UncreditedFaint, Winner,
};
pub use types::{
    CauseCategory, Combatant, CombatantStats, DamageCause, DamageLedger, Healing, SideCondition,
    Status, Volatile, Weather,
};

// Re-export commonly used protocol types
pub use replaydex_protocol::{Event, EventLog, Player};

/// Why a match produced no report
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("No player declaration for {0}")]
    MissingPlayer(Player),

    #[error("No pokemon declared or seen for {0}")]
    EmptyRoster(Player),

    #[error("Empty log")]
    EmptyLog,

    #[error("Match analysis already completed")]
    AlreadyCompleted,
}

/// Analyze one battle log.
///
/// A pure function of its input: every call builds fresh state, so the same
/// log always yields the same report.
pub fn analyze(log: &str) -> Result<MatchReport, AnalysisError> {
    let mut analyzer = MatchAnalyzer::new();
    for event in &EventLog::new(log) {
        analyzer.process(&event)?;
    }
    analyzer.finish()
}

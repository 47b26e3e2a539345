//! Loading saved Showdown replays and aggregating statistics across them.
//!
//! ```text
//! replay file (.json / .html / .log)
//!        │  ReplayDocument::parse
//!        ▼
//! battle log ──analyze──> MatchReport   (one per match, in parallel)
//!                              │
//!                              ▼
//!                    CrossMatchAggregator ──> BatchSummary
//! ```
//!
//! # Example
//!
//! ```ignore
//! use replaydex_replay::{AggregateOptions, analyze_batch};
//!
//! let summary = analyze_batch(&logs, AggregateOptions::default());
//! for species in &summary.species {
//!     println!("{}: {:.1} direct/game", species.species, species.per_game.damage_dealt.direct);
//! }
//! ```

use thiserror::Error;

pub mod aggregate;
pub mod batch;
pub mod document;
pub mod normalize;

pub use aggregate::{
    AggregateOptions, BatchSummary, CrossMatchAggregator, DamageTotals, PerGame, SpeciesSummary,
};
pub use batch::{analyze_batch, analyze_documents};
pub use document::ReplayDocument;
pub use normalize::{normalize_species, strip_wildcard};

pub use replaydex_battle::{AnalysisError, MatchReport};

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("Invalid replay JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No battle log found in replay")]
    MissingLogData,
}

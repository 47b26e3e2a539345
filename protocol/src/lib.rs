//! Line classification for Pokemon Showdown battle logs.
//!
//! A battle log is one event per line, `|`-delimited:
//!
//! ```text
//! |switch|p1a: Chompy|Garchomp, L50, F|100/100
//! |move|p2a: Corviknight|Brave Bird|p1a: Chompy
//! |-damage|p1a: Chompy|36/100
//! ```
//!
//! [`EventLog`] walks a whole log lazily and yields one [`Event`] per
//! non-empty line. Classification is purely syntactic and never fails.

use thiserror::Error;

pub mod server;

pub use server::{
    Annotations, Event, EventLog, Events, HpStatus, Player, Pokemon, PokemonDetails, SwitchKind,
    classify_line,
};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid message format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Empty message")]
    EmptyMessage,
}

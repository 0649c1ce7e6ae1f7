//! Classifies live play-by-play text into fantasy alerts.
//!
//! Each poll hands the [`AlertEngine`] one game's [`GameSnapshot`] and the
//! roster entries playing in it. Plays become big-play candidates, scoring
//! summary entries become touchdown candidates, and every candidate carries an
//! [`EventKey`] the caller's [`AlertLedger`] uses to drop alerts it already sent.

pub mod config;
pub mod engine;
pub mod error;
pub mod parsers;
pub mod schema;

pub use config::{AmbiguityPolicy, EngineConfig, Thresholds};
pub use engine::{AlertEngine, AlertLedger, ClassifiedGame, GameReport, InMemoryLedger};
pub use error::{EngineError, GameClockError, PlayTextError, YardsError};
pub use schema::{Attribution, ClassifiedEvent, Classification, Diagnostic, EventKey, EventKind, GameId, GameSnapshot, PlayRecord, RosterEntry, ScoringRecord, Subtype, TeamRef};

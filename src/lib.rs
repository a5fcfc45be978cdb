//! Strictly Darts library - turn-based darts scoring engine
//!
//! Tracks whose turn it is, validates and records each throw, supports
//! bounded undo, and derives per-player totals under two rule sets.
//!
//! # Architecture
//!
//! - **Config**: explicit [`GameConfig`] value, loadable from TOML
//! - **Ledger**: append-only throw history driving the turn sequence
//! - **Scoring**: classic cumulative totals or hunter target-score rules
//! - **Signal**: per-game game-over broadcast
//!
//! # Example
//!
//! ```
//! use strictly_darts::{DartsGame, GameConfig, StatusCode};
//!
//! # fn example() -> Result<(), strictly_darts::ConfigError> {
//! let mut game = DartsGame::new(GameConfig::hunter(2, 10, 301))?;
//! assert_eq!(game.add_score("T20"), StatusCode::ScoreAdded);
//! assert_eq!(game.add_score("X"), StatusCode::InvalidNotation);
//! assert_eq!(game.standings().map(|s| s.total(1)), Ok(60));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig, ScoringMode, ScoringRules};

// Crate-level exports - Darts engine
pub use games::darts::{
    Advance, ClassicScoring, DartsGame, GameOverSignal, GameSnapshot, HunterScoring, Notation,
    NotationError, RecordError, ScoreLedger, ScoreProjection, ScoreRecord, Standings, StatusCode,
    StatusKind, Subscription, TurnPosition, TurnState, next, points, projection_for, validate,
};

// Crate-level exports - Invariants
pub use games::darts::invariants::{
    HistoryOrderedInvariant, Invariant, InvariantSet, InvariantViolation, LedgerInvariants,
    TurnInBoundsInvariant, UndoWithinLimitInvariant,
};

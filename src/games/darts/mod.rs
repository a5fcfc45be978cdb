//! Darts scoring engine: notation, turns, ledger, scoring rules and signals.

mod game;
mod ledger;
mod notation;
mod record;
mod scoring;
mod signal;
mod snapshot;
mod status;
mod turn;

pub mod invariants;

pub use game::DartsGame;
pub use ledger::ScoreLedger;
pub use notation::{Notation, NotationError, points, validate};
pub use record::{RecordError, ScoreRecord};
pub use scoring::{ClassicScoring, HunterScoring, ScoreProjection, Standings, projection_for};
pub use signal::{GameOverSignal, Subscription};
pub use snapshot::GameSnapshot;
pub use status::{StatusCode, StatusKind};
pub use turn::{Advance, TurnPosition, TurnState, next};

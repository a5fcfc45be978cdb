//! Status codes returned by every engine operation.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Whether a status reports success or a refused request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StatusKind {
    /// The operation did what was asked (or the game is over).
    Success,
    /// The operation was refused and nothing changed.
    Error,
}

/// Result of an engine operation.
///
/// `GameOver` is a success: it reports that the game has ended, and every
/// later mutating call short-circuits to it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    /// A throw was recorded.
    #[display("Score added successfully")]
    ScoreAdded,
    /// The last throw was removed.
    #[display("Last score removed successfully")]
    ScoreRemoved,
    /// The game has ended.
    #[display("Game over")]
    GameOver,
    /// The notation was not a valid throw.
    #[strum(serialize = "INVALID_DART_NOTATION")]
    #[display("Invalid dart notation")]
    InvalidNotation,
    /// No more undos are allowed this game.
    #[display("Undo limit reached")]
    UndoLimitReached,
    /// There is nothing to undo.
    #[display("No scores to remove")]
    NoScoresToRemove,
    /// An internal invariant failed.
    #[display("Unexpected error")]
    UnexpectedError,
}

impl StatusCode {
    /// Success or error.
    pub fn kind(&self) -> StatusKind {
        match self {
            Self::ScoreAdded | Self::ScoreRemoved | Self::GameOver => StatusKind::Success,
            Self::InvalidNotation
            | Self::UndoLimitReached
            | Self::NoScoresToRemove
            | Self::UnexpectedError => StatusKind::Error,
        }
    }

    /// Stable identifier, e.g. `"SCORE_ADDED"`.
    pub fn code(&self) -> &'static str {
        self.into()
    }

    /// Human-readable message.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// True for success statuses.
    pub fn is_success(&self) -> bool {
        self.kind() == StatusKind::Success
    }
}

impl Serialize for StatusCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("StatusCode", 3)?;
        state.serialize_field("type", &self.kind())?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}

//! Score records and their `R{round}-P{player}-D{dart}-{notation}` form.

use super::turn::TurnPosition;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// One recorded throw.
///
/// The notation is kept verbatim as entered, so formatting and parsing
/// reproduce the exact same tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, new, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScoreRecord {
    /// Round the dart was thrown in.
    pub round: u32,
    /// Player who threw it.
    pub player: u32,
    /// Dart number within the turn.
    pub dart: u32,
    /// Notation as entered.
    pub notation: String,
}

/// A formatted record that does not match the record grammar.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid formatted score: {}", input)]
pub struct RecordError {
    /// The rejected text.
    pub input: String,
}

impl ScoreRecord {
    /// Creates a record for the throw at `position`.
    pub fn at(position: TurnPosition, notation: impl Into<String>) -> Self {
        Self::new(position.round, position.player, position.dart, notation.into())
    }

    /// The `(round, player, dart)` this record was thrown at.
    pub fn position(&self) -> TurnPosition {
        TurnPosition::new(self.round, self.player, self.dart)
    }

    /// Parses the formatted representation.
    #[instrument]
    pub fn parse(formatted: &str) -> Result<Self, RecordError> {
        let invalid = || RecordError {
            input: formatted.to_string(),
        };

        let mut parts = formatted.splitn(4, '-');
        let round = parse_tagged(parts.next(), 'R').ok_or_else(invalid)?;
        let player = parse_tagged(parts.next(), 'P').ok_or_else(invalid)?;
        let dart = parse_tagged(parts.next(), 'D').ok_or_else(invalid)?;
        let notation = parts.next().ok_or_else(invalid)?;

        if notation.is_empty() || !notation.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(invalid());
        }

        Ok(Self::new(round, player, dart, notation.to_string()))
    }
}

/// Parses `"{tag}{digits}"` into the number.
fn parse_tagged(part: Option<&str>, tag: char) -> Option<u32> {
    let digits = part?.strip_prefix(tag)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl std::fmt::Display for ScoreRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "R{}-P{}-D{}-{}",
            self.round, self.player, self.dart, self.notation
        )
    }
}

impl FromStr for ScoreRecord {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ScoreRecord {
    type Error = RecordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ScoreRecord> for String {
    fn from(record: ScoreRecord) -> Self {
        record.to_string()
    }
}

//! Throw notation: validation and point values.
//!
//! A notation names the segment a single dart landed in:
//! a plain number (`"7"`), the outer bull (`"B"`), the inner bull (`"DB"`),
//! or a double/triple ring (`"D10"`, `"T20"`).

use crate::config::ScoringRules;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// A parsed throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Notation {
    /// Plain segment (or 0 for a miss).
    Single(u32),
    /// Double ring, `D{n}`.
    Double(u32),
    /// Triple ring, `T{n}`.
    Triple(u32),
    /// Outer bull, `B`.
    Bull,
    /// Inner bull, `DB`.
    DoubleBull,
}

/// Error raised when a notation falls outside the grammar or the bounds.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum NotationError {
    /// Not a number, bull, or `D`/`T` followed by digits.
    #[display("Unsupported dartboard notation: {}", _0)]
    Unsupported(#[error(not(source))] String),

    /// Recognised shape, magnitude outside the configured bounds.
    #[display("Invalid dartboard value: {}", _0)]
    OutOfRange(#[error(not(source))] String),
}

/// Returns `true` for a non-empty run of ASCII digits.
fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl Notation {
    /// Parses and bounds-checks a notation string.
    ///
    /// Plain numbers must lie in `score_min..=score_max`; the number behind
    /// a `D`/`T` prefix must lie in `min_non_zero_score..=score_max`.
    /// Signs, whitespace and trailing characters are rejected.
    #[instrument(skip(rules))]
    pub fn parse(notation: &str, rules: &ScoringRules) -> Result<Self, NotationError> {
        match notation {
            "B" => return Ok(Self::Bull),
            "DB" => return Ok(Self::DoubleBull),
            _ => {}
        }

        if is_digits(notation) {
            let value = notation
                .parse::<u32>()
                .map_err(|_| NotationError::OutOfRange(notation.to_string()))?;
            if value < *rules.score_min() || value > *rules.score_max() {
                return Err(NotationError::OutOfRange(notation.to_string()));
            }
            return Ok(Self::Single(value));
        }

        let (multiplier, digits) = match (notation.strip_prefix('D'), notation.strip_prefix('T')) {
            (Some(rest), _) => ('D', rest),
            (_, Some(rest)) => ('T', rest),
            _ => return Err(NotationError::Unsupported(notation.to_string())),
        };
        if !is_digits(digits) {
            return Err(NotationError::Unsupported(notation.to_string()));
        }
        let value = digits
            .parse::<u32>()
            .map_err(|_| NotationError::OutOfRange(notation.to_string()))?;
        if value < *rules.min_non_zero_score() || value > *rules.score_max() {
            return Err(NotationError::OutOfRange(notation.to_string()));
        }

        Ok(match multiplier {
            'D' => Self::Double(value),
            _ => Self::Triple(value),
        })
    }

    /// Point value of this throw under the given rules.
    pub fn points(&self, rules: &ScoringRules) -> u32 {
        match self {
            Self::Single(n) => *n,
            Self::Double(n) => n.saturating_mul(2),
            Self::Triple(n) => n.saturating_mul(3),
            Self::Bull => *rules.bull(),
            Self::DoubleBull => *rules.double_bull(),
        }
    }

    /// Returns true for either bull.
    pub fn is_bullseye(&self) -> bool {
        matches!(self, Self::Bull | Self::DoubleBull)
    }
}

impl std::fmt::Display for Notation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(n) => write!(f, "{}", n),
            Self::Double(n) => write!(f, "D{}", n),
            Self::Triple(n) => write!(f, "T{}", n),
            Self::Bull => write!(f, "B"),
            Self::DoubleBull => write!(f, "DB"),
        }
    }
}

/// Checks whether `notation` is an acceptable throw.
#[instrument(skip(rules))]
pub fn validate(notation: &str, rules: &ScoringRules) -> bool {
    match Notation::parse(notation, rules) {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "Rejected dart notation");
            false
        }
    }
}

/// Converts a notation string to its point value.
///
/// # Errors
///
/// Returns [`NotationError`] if the notation is malformed or out of range.
#[instrument(skip(rules))]
pub fn points(notation: &str, rules: &ScoringRules) -> Result<u32, NotationError> {
    Notation::parse(notation, rules).map(|n| n.points(rules))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ScoringRules {
        ScoringRules::default()
    }

    #[test]
    fn test_points_table() {
        let r = rules();
        assert_eq!(points("T20", &r), Ok(60));
        assert_eq!(points("D10", &r), Ok(20));
        assert_eq!(points("DB", &r), Ok(50));
        assert_eq!(points("B", &r), Ok(25));
        assert_eq!(points("7", &r), Ok(7));
        assert_eq!(points("0", &r), Ok(0));
    }

    #[test]
    fn test_plain_bounds() {
        let r = rules();
        assert!(validate("0", &r));
        assert!(validate("20", &r));
        assert!(!validate("21", &r));
        assert!(!validate("-1", &r));
        assert!(!validate("+5", &r));
    }

    #[test]
    fn test_multiplier_bounds() {
        let r = rules();
        assert!(validate("T1", &r));
        assert!(validate("D20", &r));
        assert!(!validate("T0", &r));
        assert!(!validate("D21", &r));
        assert_eq!(
            points("T21", &r),
            Err(NotationError::OutOfRange("T21".to_string()))
        );
    }

    #[test]
    fn test_malformed_rejected() {
        let r = rules();
        for bad in ["", "X5", "T", "D", "TT5", "7a", "T5x", "b", "db", "Q20", " 5", "BB"] {
            assert!(!validate(bad, &r), "{:?} should be rejected", bad);
        }
        assert_eq!(
            points("X5", &r),
            Err(NotationError::Unsupported("X5".to_string()))
        );
    }

    #[test]
    fn test_leading_zero_accepted() {
        assert_eq!(points("07", &rules()), Ok(7));
    }

    #[test]
    fn test_huge_number_is_out_of_range_not_panic() {
        assert!(!validate("99999999999999999999", &rules()));
        assert!(!validate("T99999999999999999999", &rules()));
    }

    #[test]
    fn test_custom_bull_values() {
        let r = rules().with_bull(30).with_double_bull(60);
        assert_eq!(points("B", &r), Ok(30));
        assert_eq!(points("DB", &r), Ok(60));
    }

    #[test]
    fn test_bullseye_helper_and_display() {
        let r = rules();
        assert!(Notation::parse("B", &r).unwrap().is_bullseye());
        assert!(Notation::parse("DB", &r).unwrap().is_bullseye());
        assert!(!Notation::parse("D25", &rules().with_score_max(25)).unwrap().is_bullseye());
        assert_eq!(Notation::parse("T20", &r).unwrap().to_string(), "T20");
    }
}

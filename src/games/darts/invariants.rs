//! First-class invariants for the score ledger.
//!
//! Invariants are logical properties that must hold after every ledger
//! mutation. The ledger checks them in debug builds; they are also testable
//! on their own.

use super::ledger::ScoreLedger;
use super::turn::TurnPosition;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for triples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: the current position lies inside the configured bounds.
pub struct TurnInBoundsInvariant;

impl Invariant<ScoreLedger> for TurnInBoundsInvariant {
    fn holds(ledger: &ScoreLedger) -> bool {
        let TurnPosition {
            round,
            player,
            dart,
        } = ledger.turn().position;
        let max = ledger.max_position();
        (1..=max.round).contains(&round)
            && (1..=max.player).contains(&player)
            && (1..=max.dart).contains(&dart)
    }

    fn description() -> &'static str {
        "Round, player and dart lie within configured bounds"
    }
}

/// Invariant: the undo counter never passes the configured limit.
pub struct UndoWithinLimitInvariant;

impl Invariant<ScoreLedger> for UndoWithinLimitInvariant {
    fn holds(ledger: &ScoreLedger) -> bool {
        ledger.turn().undo_count <= *ledger.config().max_undo_steps()
    }

    fn description() -> &'static str {
        "Undo count does not exceed the undo limit"
    }
}

/// Invariant: records are in strictly increasing position order and the
/// current position follows the last record (or equals it once the game
/// is over).
pub struct HistoryOrderedInvariant;

impl Invariant<ScoreLedger> for HistoryOrderedInvariant {
    fn holds(ledger: &ScoreLedger) -> bool {
        let history = ledger.history();
        let ordered = history
            .windows(2)
            .all(|pair| pair[0].position() < pair[1].position());

        let current = ledger.turn().position;
        let follows = match history.last() {
            None => current == TurnPosition::first(),
            Some(last) if ledger.is_game_over() => last.position() <= current,
            Some(last) => last.position() < current,
        };

        ordered && follows
    }

    fn description() -> &'static str {
        "History is ordered and ends before the current position"
    }
}

/// All ledger invariants as a composable set.
pub type LedgerInvariants = (
    TurnInBoundsInvariant,
    UndoWithinLimitInvariant,
    HistoryOrderedInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_fresh_ledger_holds() {
        let ledger = ScoreLedger::new(GameConfig::new(2, 3)).unwrap();
        assert!(LedgerInvariants::check_all(&ledger).is_ok());
    }

    #[test]
    fn test_holds_after_adds_and_undo() {
        let mut ledger = ScoreLedger::new(GameConfig::new(2, 3)).unwrap();
        for n in ["T20", "5", "B", "DB"] {
            ledger.add_score(n);
        }
        ledger.remove_last_score();
        assert!(LedgerInvariants::check_all(&ledger).is_ok());
    }

    #[test]
    fn test_holds_after_game_over() {
        let mut ledger = ScoreLedger::new(GameConfig::new(1, 1)).unwrap();
        for n in ["1", "2", "3"] {
            ledger.add_score(n);
        }
        assert!(ledger.is_game_over());
        assert!(LedgerInvariants::check_all(&ledger).is_ok());
    }

    #[test]
    fn test_detects_out_of_bounds_turn() {
        let mut ledger = ScoreLedger::new(GameConfig::new(2, 3)).unwrap();
        ledger.turn_mut().position.player = 3;
        let violations = LedgerInvariants::check_all(&ledger).unwrap_err();
        assert!(
            violations
                .iter()
                .any(|v| v.description == TurnInBoundsInvariant::description())
        );
    }

    #[test]
    fn test_detects_turn_behind_history() {
        let mut ledger = ScoreLedger::new(GameConfig::new(2, 3)).unwrap();
        ledger.add_score("5");
        ledger.add_score("6");
        ledger.turn_mut().position = TurnPosition::first();
        assert!(!HistoryOrderedInvariant::holds(&ledger));
        assert!(TurnInBoundsInvariant::holds(&ledger));
        assert!(UndoWithinLimitInvariant::holds(&ledger));
    }
}

//! Serializable read-side view of a game.

use super::game::DartsGame;
use super::scoring::Standings;
use super::turn::TurnState;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

/// Everything a caller needs to render the game, as one serializable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Position of the next throw and undo usage.
    pub turn: TurnState,
    /// Whether the game has ended.
    pub game_over: bool,
    /// History in record form, oldest first.
    pub history: Vec<String>,
    /// This round's notations per player (or last round's).
    pub round_scores: BTreeMap<u32, Vec<String>>,
    /// Totals under the configured rule set. `None` if they could not be
    /// computed.
    pub standings: Option<Standings>,
}

impl GameSnapshot {
    /// Captures the current state of `game`.
    pub fn capture(game: &DartsGame) -> Self {
        let ledger = game.ledger();
        let standings = match game.standings() {
            Ok(s) => Some(s),
            Err(e) => {
                warn!(error = %e, "Snapshot without standings");
                None
            }
        };
        Self {
            turn: *ledger.turn(),
            game_over: ledger.is_game_over(),
            history: ledger.formatted_history(),
            round_scores: ledger.player_round_scores(),
            standings,
        }
    }
}

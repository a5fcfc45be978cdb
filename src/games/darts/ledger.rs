//! The score ledger: turn state, throw history, undo and the game-over latch.
//!
//! Every mutating operation returns a [`StatusCode`]; the ledger never
//! fails with a panic or a `Result`. Records are only ever appended by
//! [`ScoreLedger::add_score`] and popped by [`ScoreLedger::remove_last_score`].

use super::invariants::{InvariantSet, LedgerInvariants};
use super::notation::validate;
use super::record::ScoreRecord;
use super::signal::{GameOverSignal, Subscription};
use super::status::StatusCode;
use super::turn::{self, TurnPosition, TurnState};
use crate::config::{ConfigError, GameConfig};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// Append-only throw log that drives the turn sequence.
#[derive(Debug)]
pub struct ScoreLedger {
    config: GameConfig,
    turn: TurnState,
    history: Vec<ScoreRecord>,
    game_over: bool,
    signal: GameOverSignal,
}

impl ScoreLedger {
    /// Validates `config`, then creates an empty ledger at `(1, 1, 1)`.
    #[instrument(skip(config))]
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            turn: TurnState::default(),
            history: Vec::new(),
            game_over: false,
            signal: GameOverSignal::new(),
        })
    }

    /// Feeds `notations` through [`ScoreLedger::add_score`] in order.
    ///
    /// Stops after the first status other than `ScoreAdded`; the returned
    /// statuses include that one.
    #[instrument(skip(config, notations))]
    pub fn replay<I, S>(config: GameConfig, notations: I) -> Result<(Self, Vec<StatusCode>), ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ledger = Self::new(config)?;
        let statuses = ledger.replay_into(notations);
        Ok((ledger, statuses))
    }

    /// Applies `notations` to this ledger until one is not `ScoreAdded`.
    pub(crate) fn replay_into<I, S>(&mut self, notations: I) -> Vec<StatusCode>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut statuses = Vec::new();
        for notation in notations {
            let status = self.add_score(notation.as_ref());
            statuses.push(status);
            if status != StatusCode::ScoreAdded {
                break;
            }
        }
        statuses
    }

    /// Records a throw for the current position and advances the turn.
    #[instrument(skip(self), fields(position = %self.turn.position))]
    pub fn add_score(&mut self, notation: &str) -> StatusCode {
        if self.game_over {
            return StatusCode::GameOver;
        }
        if !validate(notation, self.config.scoring()) {
            return StatusCode::InvalidNotation;
        }

        let saved = self.turn;
        let position = saved.position;
        self.history.push(ScoreRecord::at(position, notation));
        let advance = turn::next(position, self.max_position());
        self.turn.position = advance.position();
        self.game_over = advance.is_terminal();

        if !self.invariants_hold() {
            self.history.pop();
            self.turn = saved;
            self.game_over = false;
            return StatusCode::UnexpectedError;
        }

        if self.game_over {
            self.announce_game_over();
            StatusCode::GameOver
        } else {
            debug!(next = %self.turn.position, "Score added");
            StatusCode::ScoreAdded
        }
    }

    /// Pops the last throw and returns to the position it was thrown at.
    ///
    /// Refusals are checked in a fixed order: empty history, game over,
    /// undo limit.
    #[instrument(skip(self), fields(undo_count = self.turn.undo_count))]
    pub fn remove_last_score(&mut self) -> StatusCode {
        if self.history.is_empty() {
            warn!("No scores to remove");
            return StatusCode::NoScoresToRemove;
        }
        if self.game_over {
            return StatusCode::GameOver;
        }
        if self.turn.undo_count >= *self.config.max_undo_steps() {
            warn!(limit = *self.config.max_undo_steps(), "Undo limit reached");
            return StatusCode::UndoLimitReached;
        }

        let saved = self.turn;
        let Some(record) = self.history.pop() else {
            return StatusCode::UnexpectedError;
        };
        self.turn.position = record.position();
        self.turn.undo_count += 1;

        if !self.invariants_hold() {
            self.history.push(record);
            self.turn = saved;
            return StatusCode::UnexpectedError;
        }
        debug!(removed = %record, "Score removed");
        StatusCode::ScoreRemoved
    }

    /// Drops the last throw without counting it as an undo.
    ///
    /// Used to take back a throw the caller could not score.
    pub(crate) fn discard_last(&mut self) -> Option<ScoreRecord> {
        if self.game_over {
            return None;
        }
        let record = self.history.pop()?;
        self.turn.position = record.position();
        debug!(discarded = %record, "Score discarded");
        Some(record)
    }

    /// Sets the game-over latch and publishes the signal.
    ///
    /// Returns false, without publishing, if the latch was already set.
    #[instrument(skip(self))]
    pub fn declare_game_over(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.game_over = true;
        self.announce_game_over();
        true
    }

    fn announce_game_over(&self) {
        info!(throws = self.history.len(), "Game over");
        self.signal.publish();
    }

    /// Notations per player for the current round, or the previous round
    /// if the player has not thrown in the current one yet.
    #[instrument(skip(self))]
    pub fn player_round_scores(&self) -> BTreeMap<u32, Vec<String>> {
        let current = self.turn.position.round;
        (1..=*self.config.players_count())
            .map(|player| {
                let in_round = |round: u32| -> Vec<String> {
                    self.history
                        .iter()
                        .filter(|r| r.player == player && r.round == round)
                        .map(|r| r.notation.clone())
                        .collect()
                };
                let scores = match in_round(current) {
                    scores if !scores.is_empty() => scores,
                    _ if current > 1 => in_round(current - 1),
                    _ => Vec::new(),
                };
                (player, scores)
            })
            .collect()
    }

    /// Registers a game-over handler on this ledger's signal.
    pub fn on_game_over(&self, handler: impl Fn() + 'static) -> Subscription {
        self.signal.subscribe(handler)
    }

    /// The game-over signal owned by this ledger.
    pub fn signal(&self) -> &GameOverSignal {
        &self.signal
    }

    /// The configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current turn state.
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    /// Recorded throws, oldest first.
    pub fn history(&self) -> &[ScoreRecord] {
        &self.history
    }

    /// History in `R{round}-P{player}-D{dart}-{notation}` form.
    pub fn formatted_history(&self) -> Vec<String> {
        self.history.iter().map(ScoreRecord::to_string).collect()
    }

    /// True once the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The last `(round, player, dart)` of the game.
    pub fn max_position(&self) -> TurnPosition {
        TurnPosition::new(
            *self.config.rounds_count(),
            *self.config.players_count(),
            *self.config.max_darts_per_turn(),
        )
    }

    /// Checks the ledger invariants in debug builds; always true in release.
    fn invariants_hold(&self) -> bool {
        if !cfg!(debug_assertions) {
            return true;
        }
        match LedgerInvariants::check_all(self) {
            Ok(()) => true,
            Err(violations) => {
                let descriptions = violations
                    .iter()
                    .map(|v| v.description.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                warn!(%descriptions, "Ledger invariant violated, mutation rolled back");
                false
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn turn_mut(&mut self) -> &mut TurnState {
        &mut self.turn
    }
}

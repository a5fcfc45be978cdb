//! A darts game: the ledger plus the scoring rule set from the config.
//!
//! In hunter mode a player reaching the target ends the game before the
//! turn sequence runs out.

use super::ledger::ScoreLedger;
use super::notation::NotationError;
use super::scoring::{ScoreProjection, Standings, projection_for};
use super::signal::Subscription;
use super::snapshot::GameSnapshot;
use super::status::StatusCode;
use crate::config::{ConfigError, GameConfig};
use tracing::{info, instrument, warn};

/// Scoring engine for one game.
#[derive(Debug)]
pub struct DartsGame {
    ledger: ScoreLedger,
    projection: Box<dyn ScoreProjection>,
}

impl DartsGame {
    /// Creates a game from a validated configuration.
    #[instrument(skip(config))]
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let projection = projection_for(&config);
        let ledger = ScoreLedger::new(config)?;
        Ok(Self { ledger, projection })
    }

    /// Creates a game and feeds it `notations`, stopping at the first
    /// status other than `ScoreAdded`.
    #[instrument(skip(config, notations))]
    pub fn replay<I, S>(config: GameConfig, notations: I) -> Result<(Self, Vec<StatusCode>), ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut game = Self::new(config)?;
        let mut statuses = Vec::new();
        for notation in notations {
            let status = game.add_score(notation.as_ref());
            statuses.push(status);
            if status != StatusCode::ScoreAdded {
                break;
            }
        }
        Ok((game, statuses))
    }

    /// Records a throw; ends the game if it reaches the hunter target.
    #[instrument(skip(self))]
    pub fn add_score(&mut self, notation: &str) -> StatusCode {
        let status = self.ledger.add_score(notation);
        if status != StatusCode::ScoreAdded {
            return status;
        }

        match self.standings() {
            Ok(standings) => match standings.winner() {
                Some(winner) => {
                    info!(winner, "Target reached");
                    self.ledger.declare_game_over();
                    StatusCode::GameOver
                }
                None => status,
            },
            Err(e) => {
                warn!(error = %e, "Failed to project standings, throw discarded");
                self.ledger.discard_last();
                StatusCode::UnexpectedError
            }
        }
    }

    /// Removes the last throw.
    #[instrument(skip(self))]
    pub fn remove_last_score(&mut self) -> StatusCode {
        self.ledger.remove_last_score()
    }

    /// Totals folded from the full history.
    pub fn standings(&self) -> Result<Standings, NotationError> {
        self.projection
            .project(self.ledger.history(), *self.ledger.config().players_count())
    }

    /// Registers a game-over handler.
    pub fn on_game_over(&self, handler: impl Fn() + 'static) -> Subscription {
        self.ledger.on_game_over(handler)
    }

    /// The underlying ledger.
    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    /// True once the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.ledger.is_game_over()
    }

    /// Serializable view of the current game.
    #[instrument(skip(self))]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }
}

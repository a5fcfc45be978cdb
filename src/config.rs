//! Game configuration for the darts engine.
//!
//! A [`GameConfig`] is built once by the caller (in code or from a TOML
//! file) and handed to the engine at construction. Nothing here is global.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Point values and magnitude bounds used to validate throw notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct ScoringRules {
    /// Smallest plain segment value (a miss is 0).
    score_min: u32,
    /// Largest segment value, for plain, double and triple throws.
    score_max: u32,
    /// Smallest segment value allowed behind a `D`/`T` multiplier.
    min_non_zero_score: u32,
    /// Points for the outer bull (`B`).
    bull: u32,
    /// Points for the inner bull (`DB`).
    double_bull: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            score_min: 0,
            score_max: 20,
            min_non_zero_score: 1,
            bull: 25,
            double_bull: 50,
        }
    }
}

/// Which totals the engine derives from the score history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ScoringMode {
    /// Plain cumulative totals; the game ends when the turns run out.
    #[default]
    Classic,
    /// Race to an exact target with overshoot bounce and hunting resets.
    Hunter {
        /// Total a player must reach exactly to end the game.
        target_score: u32,
    },
}

impl ScoringMode {
    /// Returns the hunter target, if this is hunter mode.
    pub fn target_score(&self) -> Option<u32> {
        match self {
            Self::Classic => None,
            Self::Hunter { target_score } => Some(*target_score),
        }
    }
}

/// Complete configuration for one game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct GameConfig {
    /// Number of players taking turns.
    #[serde(default = "default_players_count")]
    players_count: u32,

    /// Number of rounds before the game ends.
    #[serde(default = "default_rounds_count")]
    rounds_count: u32,

    /// Darts each player throws per turn.
    #[serde(default = "default_max_darts_per_turn")]
    max_darts_per_turn: u32,

    /// Total undo operations allowed per game.
    #[serde(default = "default_max_undo_steps")]
    max_undo_steps: u32,

    /// Notation bounds and bullseye values.
    #[serde(default)]
    scoring: ScoringRules,

    /// Scoring rule set.
    #[serde(default)]
    mode: ScoringMode,
}

#[instrument]
fn default_players_count() -> u32 {
    1
}

#[instrument]
fn default_rounds_count() -> u32 {
    10
}

#[instrument]
fn default_max_darts_per_turn() -> u32 {
    3
}

#[instrument]
fn default_max_undo_steps() -> u32 {
    9
}

impl GameConfig {
    /// Creates a classic configuration with default limits.
    #[instrument]
    pub fn new(players_count: u32, rounds_count: u32) -> Self {
        Self {
            players_count,
            rounds_count,
            ..Self::default()
        }
    }

    /// Creates a hunter configuration with default limits.
    #[instrument]
    pub fn hunter(players_count: u32, rounds_count: u32, target_score: u32) -> Self {
        Self::new(players_count, rounds_count).with_mode(ScoringMode::Hunter { target_score })
    }

    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            players = config.players_count,
            rounds = config.rounds_count,
            mode = ?config.mode,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration describes a playable game.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players_count == 0 {
            return Err(ConfigError::new("players_count must be at least 1".to_string()));
        }
        if self.rounds_count == 0 {
            return Err(ConfigError::new("rounds_count must be at least 1".to_string()));
        }
        if self.max_darts_per_turn == 0 {
            return Err(ConfigError::new(
                "max_darts_per_turn must be at least 1".to_string(),
            ));
        }

        let rules = &self.scoring;
        if rules.score_min > rules.score_max {
            return Err(ConfigError::new(format!(
                "score_min ({}) exceeds score_max ({})",
                rules.score_min, rules.score_max
            )));
        }
        if rules.min_non_zero_score == 0 || rules.min_non_zero_score > rules.score_max {
            return Err(ConfigError::new(format!(
                "min_non_zero_score must be in 1..={}, got {}",
                rules.score_max, rules.min_non_zero_score
            )));
        }

        if let ScoringMode::Hunter { target_score: 0 } = self.mode {
            return Err(ConfigError::new(
                "hunter target_score must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players_count: default_players_count(),
            rounds_count: default_rounds_count(),
            max_darts_per_turn: default_max_darts_per_turn(),
            max_undo_steps: default_max_undo_steps(),
            scoring: ScoringRules::default(),
            mode: ScoringMode::default(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

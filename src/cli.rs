//! Command-line interface for strictly_darts.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use strictly_darts::{GameConfig, ScoringMode};
use tracing::{debug, info, instrument};

/// Strictly Darts - turn-based darts scoring engine
#[derive(Parser, Debug)]
#[command(name = "strictly_darts")]
#[command(about = "Darts scoring with classic and hunter rules", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively: one notation, `undo`, `scores` or `quit` per line
    Play {
        /// Game settings
        #[command(flatten)]
        game: GameArgs,
    },

    /// Replay whitespace-separated notations from a file and print the
    /// final game as JSON
    Replay {
        /// File containing the notations
        file: PathBuf,

        /// Game settings
        #[command(flatten)]
        game: GameArgs,
    },
}

/// Settings shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GameArgs {
    /// TOML game configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of players (overrides the config file)
    #[arg(short, long)]
    pub players: Option<u32>,

    /// Number of rounds (overrides the config file)
    #[arg(short, long)]
    pub rounds: Option<u32>,

    /// Play hunter mode to this exact target score
    #[arg(short, long)]
    pub target: Option<u32>,
}

impl GameArgs {
    /// Builds the game configuration: file (or defaults), then overrides.
    #[instrument(skip(self))]
    pub fn resolve(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => {
                debug!("No config file given, using defaults");
                GameConfig::default()
            }
        };

        if let Some(players) = self.players {
            config = config.with_players_count(players);
        }
        if let Some(rounds) = self.rounds {
            config = config.with_rounds_count(rounds);
        }
        if let Some(target_score) = self.target {
            config = config.with_mode(ScoringMode::Hunter { target_score });
        }

        config.validate()?;
        info!(
            players = *config.players_count(),
            rounds = *config.rounds_count(),
            mode = ?config.mode(),
            "Game configured"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play_with_overrides() {
        let cli = Cli::try_parse_from(["strictly_darts", "play", "-p", "3", "--target", "301"])
            .expect("valid args");
        let Command::Play { game } = cli.command else {
            panic!("expected play");
        };
        let config = game.resolve().expect("valid config");
        assert_eq!(*config.players_count(), 3);
        assert_eq!(config.mode().target_score(), Some(301));
    }

    #[test]
    fn test_parse_replay() {
        let cli = Cli::try_parse_from(["strictly_darts", "replay", "throws.txt", "-r", "2"])
            .expect("valid args");
        let Command::Replay { file, game } = cli.command else {
            panic!("expected replay");
        };
        assert_eq!(file, PathBuf::from("throws.txt"));
        assert_eq!(*game.resolve().unwrap().rounds_count(), 2);
    }

    #[test]
    fn test_zero_players_rejected() {
        let cli = Cli::try_parse_from(["strictly_darts", "play", "-p", "0"]).unwrap();
        let Command::Play { game } = cli.command else {
            panic!("expected play");
        };
        assert!(game.resolve().is_err());
    }
}

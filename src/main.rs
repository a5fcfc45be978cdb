//! Strictly Darts - command-line scorer
//!
//! Plays or replays a darts game against the scoring engine.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, GameArgs};
use std::io::{BufRead, Write};
use std::path::Path;
use strictly_darts::{DartsGame, StatusCode};
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Play { game } => run_play(&game),
        Command::Replay { file, game } => run_replay(&file, &game),
    }
}

/// Logs go to stderr so stdout stays clean for scores and JSON.
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Interactive game on stdin/stdout.
#[instrument(skip_all)]
fn run_play(args: &GameArgs) -> Result<()> {
    let config = args.resolve()?;
    let mut game = DartsGame::new(config)?;
    game.on_game_over(|| info!("Game over signal received"));

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    print_turn(&mut stdout, &game)?;

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let input = line.trim();
        debug!(input, "Command received");

        let status = match input {
            "" => continue,
            "quit" | "exit" => break,
            "scores" => {
                for (player, scores) in game.ledger().player_round_scores() {
                    writeln!(stdout, "P{}: {}", player, scores.join(" "))?;
                }
                continue;
            }
            "undo" => game.remove_last_score(),
            notation => game.add_score(notation),
        };

        writeln!(stdout, "[{}] {}: {}", status.kind(), status.code(), status)?;
        print_standings(&mut stdout, &game)?;

        if status == StatusCode::GameOver {
            break;
        }
        print_turn(&mut stdout, &game)?;
    }

    Ok(())
}

/// Replays a file of notations and prints the resulting snapshot.
#[instrument(skip(args), fields(file = %file.display()))]
fn run_replay(file: &Path, args: &GameArgs) -> Result<()> {
    let config = args.resolve()?;
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let (game, statuses) = DartsGame::replay(config, content.split_whitespace())?;
    if let Some(last) = statuses.last() {
        info!(throws = statuses.len(), last = last.code(), "Replay finished");
    }

    println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    Ok(())
}

fn print_turn(out: &mut impl Write, game: &DartsGame) -> Result<()> {
    let position = game.ledger().turn().position;
    writeln!(out, "{} >", position)?;
    Ok(())
}

fn print_standings(out: &mut impl Write, game: &DartsGame) -> Result<()> {
    let standings = game.standings()?;
    let totals = standings
        .totals()
        .iter()
        .map(|(player, total)| format!("P{}={}", player, total))
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(out, "totals: {}", totals)?;

    if game.is_game_over() {
        match standings.winner().or_else(|| standings.leader()) {
            Some(player) => writeln!(out, "winner: P{}", player)?,
            None => writeln!(out, "no winner")?,
        }
    }
    Ok(())
}

//! Tests for hunter mode scoring through the public API.

use strictly_darts::{DartsGame, GameConfig, HunterScoring, ScoreProjection, ScoringRules, StatusCode};

#[test]
fn test_bounce_off_target() {
    // Player 1 alone: 4 x T20 + DB = 290, then T20 bounces 350 back to 252.
    let (game, statuses) = DartsGame::replay(
        GameConfig::hunter(1, 10, 301),
        ["T20", "T20", "T20", "T20", "DB", "T20"],
    )
    .unwrap();
    assert!(statuses.iter().all(|s| *s == StatusCode::ScoreAdded));
    assert_eq!(game.standings().unwrap().total(1), 252);
}

#[test]
fn test_hunted_player_reset_acting_player_kept() {
    // P1: 50, P2: 50 (catches P1), P3: 30.
    let throws = ["DB", "0", "0", "DB", "0", "0", "D15", "0", "0"];
    let (game, _) = DartsGame::replay(GameConfig::hunter(3, 10, 301), throws).unwrap();
    let standings = game.standings().unwrap();
    assert_eq!(standings.total(1), 0);
    assert_eq!(standings.total(2), 50);
    assert_eq!(standings.total(3), 30);
}

#[test]
fn test_reaching_target_ends_game_before_last_round() {
    let mut game = DartsGame::new(GameConfig::hunter(2, 10, 50)).unwrap();
    assert_eq!(game.add_score("T10"), StatusCode::ScoreAdded);
    assert_eq!(game.add_score("D10"), StatusCode::GameOver);
    assert!(game.is_game_over());
    assert_eq!(game.standings().unwrap().winner(), Some(1));
    assert_eq!(game.ledger().turn().position.round, 1);
}

#[test]
fn test_undo_recomputes_hunt() {
    let mut game = DartsGame::new(GameConfig::hunter(2, 10, 301)).unwrap();
    for n in ["DB", "0", "0", "DB"] {
        game.add_score(n);
    }
    assert_eq!(game.standings().unwrap().total(1), 0);

    assert_eq!(game.remove_last_score(), StatusCode::ScoreRemoved);
    let standings = game.standings().unwrap();
    assert_eq!(standings.total(1), 50);
    assert_eq!(standings.total(2), 0);
}

#[test]
fn test_projection_is_deterministic() {
    let (game, _) = DartsGame::replay(
        GameConfig::hunter(2, 10, 101),
        ["T20", "T20", "T20", "D20", "D20", "D20"],
    )
    .unwrap();
    let scoring = HunterScoring::new(ScoringRules::default(), 101);
    let again = scoring.project(game.ledger().history(), 2).unwrap();
    assert_eq!(game.standings().unwrap(), again);
}

#[test]
fn test_classic_mode_never_ends_early() {
    let throws = vec!["T20"; 6];
    let (game, statuses) = DartsGame::replay(GameConfig::new(1, 2), throws).unwrap();
    assert_eq!(statuses.last(), Some(&StatusCode::GameOver));
    assert_eq!(statuses.len(), 6);
    assert_eq!(game.standings().unwrap().total(1), 360);
}

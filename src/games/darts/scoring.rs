//! Per-player totals derived from the score history.
//!
//! Totals are never stored: every projection folds the full history from
//! the start, so an undo is reflected simply by folding the shorter history.

use super::notation::{NotationError, points};
use super::record::ScoreRecord;
use crate::config::{GameConfig, ScoringMode, ScoringRules};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Totals per player plus the player who reached the target, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Standings {
    totals: BTreeMap<u32, i64>,
    winner: Option<u32>,
}

impl Standings {
    /// Standings with every player `1..=players_count` at zero.
    pub fn empty(players_count: u32) -> Self {
        Self {
            totals: (1..=players_count).map(|p| (p, 0)).collect(),
            winner: None,
        }
    }

    /// Total per player.
    pub fn totals(&self) -> &BTreeMap<u32, i64> {
        &self.totals
    }

    /// Total for one player (zero if the player never threw).
    pub fn total(&self, player: u32) -> i64 {
        self.totals.get(&player).copied().unwrap_or(0)
    }

    /// Player who ended the game by reaching the target exactly.
    pub fn winner(&self) -> Option<u32> {
        self.winner
    }

    /// Highest total, lowest player index on ties.
    pub fn leader(&self) -> Option<u32> {
        self.totals
            .iter()
            .fold(None, |best: Option<(u32, i64)>, (&player, &total)| match best {
                Some((_, top)) if top >= total => best,
                _ => Some((player, total)),
            })
            .map(|(player, _)| player)
    }
}

/// A rule set that turns a history into standings.
pub trait ScoreProjection: std::fmt::Debug {
    /// Folds `history` in order.
    ///
    /// # Errors
    ///
    /// Returns [`NotationError`] if a record holds a notation the rules
    /// do not accept.
    fn project(
        &self,
        history: &[ScoreRecord],
        players_count: u32,
    ) -> Result<Standings, NotationError>;
}

/// Plain cumulative totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassicScoring {
    rules: ScoringRules,
}

impl ClassicScoring {
    /// Creates the classic rule set.
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }
}

impl ScoreProjection for ClassicScoring {
    #[instrument(skip(self, history), fields(throws = history.len()))]
    fn project(
        &self,
        history: &[ScoreRecord],
        players_count: u32,
    ) -> Result<Standings, NotationError> {
        let mut standings = Standings::empty(players_count);
        for record in history {
            let delta = i64::from(points(&record.notation, &self.rules)?);
            *standings.totals.entry(record.player).or_insert(0) += delta;
        }
        Ok(standings)
    }
}

/// Hunter rules: race to an exact target.
///
/// - A total that passes the target bounces back below it by the excess.
/// - Landing on another player's non-zero total resets that player to zero.
/// - Landing on the target exactly wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunterScoring {
    rules: ScoringRules,
    target_score: u32,
}

impl HunterScoring {
    /// Creates the hunter rule set.
    pub fn new(rules: ScoringRules, target_score: u32) -> Self {
        Self {
            rules,
            target_score,
        }
    }

    /// The target total.
    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    /// Adds `delta` to `total`, reflecting any overshoot off the target.
    pub fn bounce(&self, total: i64, delta: i64) -> i64 {
        let target = i64::from(self.target_score);
        let next = total + delta;
        if next > target { 2 * target - next } else { next }
    }

    /// The player caught by `acting` landing on `total`: the lowest-indexed
    /// other player holding the same non-zero total.
    pub fn hunted_player(totals: &BTreeMap<u32, i64>, acting: u32, total: i64) -> Option<u32> {
        if total == 0 {
            return None;
        }
        totals
            .iter()
            .find(|&(&player, &score)| player != acting && score == total)
            .map(|(&player, _)| player)
    }

    /// Applies one record to `standings`.
    #[instrument(skip(self, standings), fields(record = %record))]
    pub fn apply(&self, standings: &mut Standings, record: &ScoreRecord) -> Result<(), NotationError> {
        let delta = i64::from(points(&record.notation, &self.rules)?);
        let current = standings.total(record.player);
        let total = self.bounce(current, delta);
        standings.totals.insert(record.player, total);

        if let Some(hunted) = Self::hunted_player(&standings.totals, record.player, total) {
            debug!(hunter = record.player, hunted, total, "Player hunted");
            standings.totals.insert(hunted, 0);
        }

        if total == i64::from(self.target_score) && standings.winner.is_none() {
            debug!(player = record.player, "Target reached");
            standings.winner = Some(record.player);
        }
        Ok(())
    }
}

impl ScoreProjection for HunterScoring {
    #[instrument(skip(self, history), fields(throws = history.len(), target = self.target_score))]
    fn project(
        &self,
        history: &[ScoreRecord],
        players_count: u32,
    ) -> Result<Standings, NotationError> {
        let mut standings = Standings::empty(players_count);
        for record in history {
            self.apply(&mut standings, record)?;
        }
        Ok(standings)
    }
}

/// Builds the projection selected by `config`.
pub fn projection_for(config: &GameConfig) -> Box<dyn ScoreProjection> {
    let rules = *config.scoring();
    match config.mode() {
        ScoringMode::Classic => Box::new(ClassicScoring::new(rules)),
        ScoringMode::Hunter { target_score } => Box::new(HunterScoring::new(rules, *target_score)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(entries: &[(u32, &str)]) -> Vec<ScoreRecord> {
        entries
            .iter()
            .map(|(player, notation)| ScoreRecord::new(1, *player, 1, notation.to_string()))
            .collect()
    }

    fn hunter(target: u32) -> HunterScoring {
        HunterScoring::new(ScoringRules::default(), target)
    }

    #[test]
    fn test_classic_sums_per_player() {
        let history = records(&[(1, "T20"), (2, "D10"), (1, "5")]);
        let standings = ClassicScoring::new(ScoringRules::default())
            .project(&history, 2)
            .unwrap();
        assert_eq!(standings.total(1), 65);
        assert_eq!(standings.total(2), 20);
        assert_eq!(standings.winner(), None);
        assert_eq!(standings.leader(), Some(1));
    }

    #[test]
    fn test_every_player_listed() {
        let history = records(&[(2, "T20"), (4, "D10")]);
        let standings = ClassicScoring::new(ScoringRules::default())
            .project(&history, 4)
            .unwrap();
        let expected: BTreeMap<u32, i64> = [(1, 0), (2, 60), (3, 0), (4, 20)].into();
        assert_eq!(standings.totals(), &expected);
    }

    #[test]
    fn test_leader_ties_go_to_lowest_index() {
        let history = records(&[(1, "10"), (2, "10")]);
        let standings = ClassicScoring::new(ScoringRules::default())
            .project(&history, 2)
            .unwrap();
        assert_eq!(standings.leader(), Some(1));
    }

    #[test]
    fn test_hunter_bounce() {
        // 4 x T20 + DB = 290, then T20 overshoots 301 by 49.
        let history = records(&[(1, "T20"), (1, "T20"), (1, "T20"), (1, "T20"), (1, "DB")]);
        let scoring = hunter(301);
        let mut standings = scoring.project(&history, 1).unwrap();
        assert_eq!(standings.total(1), 290);

        scoring
            .apply(&mut standings, &ScoreRecord::new(2, 1, 3, "T20".to_string()))
            .unwrap();
        assert_eq!(standings.total(1), 252);
        assert_eq!(standings.winner(), None);
    }

    #[test]
    fn test_hunter_bounce_below_zero() {
        let standings = hunter(10).project(&records(&[(1, "T20")]), 1).unwrap();
        assert_eq!(standings.total(1), -40);
    }

    #[test]
    fn test_hunting_resets_other_player_not_acting() {
        let history = records(&[(1, "DB"), (3, "D15"), (2, "DB")]);
        let standings = hunter(301).project(&history, 3).unwrap();
        assert_eq!(standings.total(1), 0);
        assert_eq!(standings.total(2), 50);
        assert_eq!(standings.total(3), 30);
    }

    #[test]
    fn test_zero_totals_are_not_hunted() {
        let history = records(&[(1, "0"), (2, "0")]);
        let standings = hunter(301).project(&history, 2).unwrap();
        assert_eq!(standings.total(1), 0);
        assert_eq!(standings.total(2), 0);
    }

    #[test]
    fn test_only_lowest_matching_player_reset() {
        let mut totals: BTreeMap<u32, i64> = [(1, 40), (2, 40), (3, 10)].into();
        assert_eq!(HunterScoring::hunted_player(&totals, 3, 40), Some(1));
        totals.insert(1, 0);
        assert_eq!(HunterScoring::hunted_player(&totals, 3, 40), Some(2));
        assert_eq!(HunterScoring::hunted_player(&totals, 3, 0), None);
    }

    #[test]
    fn test_exact_target_wins() {
        let history = records(&[(1, "T20"), (2, "5"), (1, "T20")]);
        let standings = hunter(120).project(&history, 2).unwrap();
        assert_eq!(standings.total(1), 120);
        assert_eq!(standings.winner(), Some(1));
    }

    #[test]
    fn test_bounce_arithmetic() {
        let scoring = hunter(50);
        assert_eq!(scoring.bounce(40, 10), 50);
        assert_eq!(scoring.bounce(40, 20), 40);
    }

    #[test]
    fn test_projection_for_mode() {
        let history = records(&[(1, "T20"), (1, "T20")]);
        let classic = projection_for(&GameConfig::new(1, 1));
        let hunter = projection_for(&GameConfig::hunter(1, 1, 100));
        assert_eq!(classic.project(&history, 1).unwrap().total(1), 120);
        assert_eq!(hunter.project(&history, 1).unwrap().total(1), 80);
    }

    #[test]
    fn test_foreign_notation_is_an_error() {
        let history = records(&[(1, "T25")]);
        assert!(hunter(301).project(&history, 1).is_err());
    }
}

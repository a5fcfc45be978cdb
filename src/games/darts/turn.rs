//! Turn sequencing: which round, player and dart comes next.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A 1-based `(round, player, dart)` position in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TurnPosition {
    /// Current round.
    pub round: u32,
    /// Player to throw.
    pub player: u32,
    /// Dart within the player's turn.
    pub dart: u32,
}

impl TurnPosition {
    /// Creates a position.
    pub fn new(round: u32, player: u32, dart: u32) -> Self {
        Self {
            round,
            player,
            dart,
        }
    }

    /// The opening position, `(1, 1, 1)`.
    pub fn first() -> Self {
        Self::new(1, 1, 1)
    }
}

impl Default for TurnPosition {
    fn default() -> Self {
        Self::first()
    }
}

impl std::fmt::Display for TurnPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "round {}, player {}, dart {}", self.round, self.player, self.dart)
    }
}

/// Where the next throw lands, plus how many undos have been spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TurnState {
    /// Position the next recorded throw is labelled with.
    pub position: TurnPosition,
    /// Undo operations performed so far.
    pub undo_count: u32,
}

/// Outcome of advancing one dart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The game continues at this position.
    Next(TurnPosition),
    /// The last dart of the last player in the last round was thrown;
    /// the position is unchanged.
    Terminal(TurnPosition),
}

impl Advance {
    /// True if the game has no more throws.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal(_))
    }

    /// The resulting position.
    pub fn position(&self) -> TurnPosition {
        match self {
            Self::Next(p) | Self::Terminal(p) => *p,
        }
    }
}

/// Advances `current` by one dart, bounded by `max` component-wise.
#[instrument]
pub fn next(current: TurnPosition, max: TurnPosition) -> Advance {
    let last_player = current.player == max.player;
    let last_dart = current.dart == max.dart;

    if current == max {
        Advance::Terminal(current)
    } else if last_player && last_dart {
        Advance::Next(TurnPosition::new(current.round + 1, 1, 1))
    } else if last_dart {
        Advance::Next(TurnPosition::new(current.round, current.player + 1, 1))
    } else {
        Advance::Next(TurnPosition::new(current.round, current.player, current.dart + 1))
    }
}

//! Player and TurnRecord data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::match_state::GameType;

/// Unique identifier for a player.
pub type PlayerId = Uuid;

/// One submitted turn of three darts. Immutable once recorded.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Resolved points of each dart, in throw order.
    pub darts: [u32; 3],
    /// Sum of the three darts (the attempted total, even on a bust).
    pub total: u32,
    /// Remaining score right after the turn; equals the pre-turn score on a bust.
    pub score_after: u32,
    pub bust: bool,
}

impl TurnRecord {
    /// One-line summary for a scoreboard: `60, 60, 60 = -180` or `20, 20, 0 = BUST`.
    pub fn summary(&self) -> String {
        let darts = self
            .darts
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        if self.bust {
            format!("{darts} = BUST")
        } else {
            format!("{darts} = -{}", self.total)
        }
    }
}

/// A player in the match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub starting_score: GameType,
    /// Never negative; only changed by a non-bust turn.
    pub current_score: u32,
    /// Turns in play order.
    pub history: Vec<TurnRecord>,
}

impl Player {
    /// Create a player at the starting score with an empty history.
    pub fn new(name: impl Into<String>, starting_score: GameType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            starting_score,
            current_score: starting_score.points(),
            history: Vec::new(),
        }
    }

    pub fn last_turn(&self) -> Option<&TurnRecord> {
        self.history.last()
    }

    /// Append a turn and take its resulting score.
    pub fn record_turn(&mut self, turn: TurnRecord) {
        self.current_score = turn.score_after;
        self.history.push(turn);
    }

    /// Back to the starting score with no history.
    pub fn reset(&mut self) {
        self.current_score = self.starting_score.points();
        self.history.clear();
    }
}

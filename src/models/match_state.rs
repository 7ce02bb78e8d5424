//! MatchState, MatchPhase, GameType and the errors raised at the command boundary.

use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};

/// Fewest players a match can start with.
pub const MIN_PLAYERS: usize = 2;
/// Most players a match can start with.
pub const MAX_PLAYERS: usize = 10;

/// Errors that can occur during match operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MatchError {
    /// Match is not in a phase that allows this action.
    InvalidState,
    /// Fewer than 2 players given to start a match.
    TooFewPlayers { min: usize, got: usize },
    /// More than 10 players given to start a match.
    TooManyPlayers { max: usize, got: usize },
    /// Game type other than 301 or 501.
    InvalidGameType(u32),
    /// A player's starting score differs from the match game type.
    StartingScoreMismatch { expected: u32, got: u32 },
    /// Base value not on the board.
    InvalidDart { value: u32, multiplier: u8 },
    /// Multiplier other than 1, 2 or 3.
    InvalidMultiplier(u8),
    /// Match has no registered players.
    NoPlayers,
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchError::InvalidState => write!(f, "Invalid state for this action"),
            MatchError::TooFewPlayers { min, got } => {
                write!(f, "Need at least {} players to start (got {})", min, got)
            }
            MatchError::TooManyPlayers { max, got } => {
                write!(f, "At most {} players can play (got {})", max, got)
            }
            MatchError::InvalidGameType(points) => {
                write!(f, "Game type must be 301 or 501 (got {})", points)
            }
            MatchError::StartingScoreMismatch { expected, got } => {
                write!(f, "Starting score {} does not match game type {}", got, expected)
            }
            MatchError::InvalidDart { value, multiplier } => {
                write!(f, "Not a dart on the board: value {} x{}", value, multiplier)
            }
            MatchError::InvalidMultiplier(m) => write!(f, "Multiplier must be 1, 2 or 3 (got {})", m),
            MatchError::NoPlayers => write!(f, "Match has no players"),
        }
    }
}

impl std::error::Error for MatchError {}

/// Straight double-out 301 or 501.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum GameType {
    Three01,
    #[default]
    Five01,
}

impl GameType {
    pub fn points(self) -> u32 {
        match self {
            GameType::Three01 => 301,
            GameType::Five01 => 501,
        }
    }
}

impl TryFrom<u32> for GameType {
    type Error = MatchError;

    fn try_from(points: u32) -> Result<Self, Self::Error> {
        match points {
            301 => Ok(GameType::Three01),
            501 => Ok(GameType::Five01),
            other => Err(MatchError::InvalidGameType(other)),
        }
    }
}

impl From<GameType> for u32 {
    fn from(g: GameType) -> u32 {
        g.points()
    }
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.points())
    }
}

/// Current phase of the match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    /// Choosing players and game type; no match data yet.
    #[default]
    Setup,
    /// Players take turns in fixed rotation.
    Playing,
    /// Someone checked out; `winner` is set.
    Finished,
}

/// A player as entered on the setup screen.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewPlayer {
    #[serde(default)]
    pub name: String,
    /// Defaults to the match game type; if given it must equal it.
    #[serde(default)]
    pub starting_score: Option<GameType>,
}

impl NewPlayer {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            starting_score: None,
        }
    }
}

/// Full match state: players in rotation order, whose turn it is, and the phase.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub phase: MatchPhase,
    pub game_type: GameType,
    /// Order fixed at setup; defines turn rotation.
    pub players: Vec<Player>,
    pub active_player_index: usize,
    /// Set if and only if `phase` is `Finished`.
    pub winner: Option<PlayerId>,
}

impl MatchState {
    /// Empty match in Setup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Player whose turn it is (None in Setup or when there are no players).
    pub fn active_player(&self) -> Option<&Player> {
        if self.phase == MatchPhase::Setup {
            return None;
        }
        self.players.get(self.active_player_index)
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// The winning player once the match is finished.
    pub fn winner_player(&self) -> Option<&Player> {
        self.winner.and_then(|id| self.get_player(id))
    }

    /// Whether this is a state the commands could have produced: an empty roster in Setup,
    /// otherwise 2-10 players on the match game type with scores in range, a valid active index,
    /// and a winner at zero exactly when Finished.
    pub fn is_consistent(&self) -> bool {
        if self.phase == MatchPhase::Setup {
            return self.players.is_empty() && self.winner.is_none();
        }
        let roster_ok = (MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players.len())
            && self.active_player_index < self.players.len()
            && self.players.iter().all(|p| {
                p.starting_score == self.game_type
                    && p.current_score <= p.starting_score.points()
                    && p.current_score != 1
            });
        if !roster_ok {
            return false;
        }
        match (self.phase, self.winner_player()) {
            (MatchPhase::Playing, None) => self.winner.is_none(),
            (MatchPhase::Finished, Some(winner)) => winner.current_score == 0,
            _ => false,
        }
    }
}

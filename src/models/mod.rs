//! Data structures for a darts match: players, turns, dart selections, match state.

mod dart;
mod match_state;
mod player;

pub use dart::{DartSelection, Multiplier, BULL, BULLSEYE, MISS};
pub use match_state::{
    GameType, MatchError, MatchPhase, MatchState, NewPlayer, MAX_PLAYERS, MIN_PLAYERS,
};
pub use player::{Player, PlayerId, TurnRecord};

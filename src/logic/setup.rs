//! Match lifecycle: start (Setup -> Playing), rematch (back to starting scores), new game (-> Setup).

use crate::models::{
    GameType, MatchError, MatchPhase, MatchState, NewPlayer, Player, MAX_PLAYERS, MIN_PLAYERS,
};

/// Start a match with `players` in rotation order, everyone at `game_type` points.
///
/// Needs 2-10 players and the match in Setup. Blank names become `Player N`.
pub fn start_match(
    state: &mut MatchState,
    players: &[NewPlayer],
    game_type: GameType,
) -> Result<(), MatchError> {
    if state.phase != MatchPhase::Setup {
        return Err(MatchError::InvalidState);
    }
    if players.len() < MIN_PLAYERS {
        return Err(MatchError::TooFewPlayers {
            min: MIN_PLAYERS,
            got: players.len(),
        });
    }
    if players.len() > MAX_PLAYERS {
        return Err(MatchError::TooManyPlayers {
            max: MAX_PLAYERS,
            got: players.len(),
        });
    }
    if let Some(other) = players
        .iter()
        .filter_map(|p| p.starting_score)
        .find(|s| *s != game_type)
    {
        return Err(MatchError::StartingScoreMismatch {
            expected: game_type.points(),
            got: other.points(),
        });
    }

    let roster = players
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let name = p.name.trim();
            let name = if name.is_empty() {
                format!("Player {}", i + 1)
            } else {
                name.to_string()
            };
            Player::new(name, game_type)
        })
        .collect();

    *state = MatchState {
        phase: MatchPhase::Playing,
        game_type,
        players: roster,
        active_player_index: 0,
        winner: None,
    };
    Ok(())
}

/// Same players, same order, everyone back at their starting score with no history.
///
/// Valid while Playing (reset scores) or Finished (rematch).
pub fn rematch(state: &mut MatchState) -> Result<(), MatchError> {
    if state.phase == MatchPhase::Setup {
        return Err(MatchError::InvalidState);
    }
    if state.players.is_empty() {
        return Err(MatchError::NoPlayers);
    }
    for p in &mut state.players {
        p.reset();
    }
    state.phase = MatchPhase::Playing;
    state.active_player_index = 0;
    state.winner = None;
    Ok(())
}

/// Discard all match data and go back to Setup.
pub fn new_game(state: &mut MatchState) {
    *state = MatchState::new();
}

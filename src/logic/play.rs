//! Playing phase: apply a submitted turn to the active player and rotate.

use crate::logic::turn::{evaluate_turn, TurnOutcome};
use crate::models::{DartSelection, MatchError, MatchPhase, MatchState};

/// Resolve, evaluate and apply one turn for the active player.
///
/// On a win the match is Finished with the active player as winner. Otherwise (bust or not) the
/// turn passes to the next player in rotation. Nothing changes when this returns `Err`.
pub fn submit_turn(
    state: &mut MatchState,
    darts: &[DartSelection; 3],
) -> Result<TurnOutcome, MatchError> {
    if state.phase != MatchPhase::Playing {
        return Err(MatchError::InvalidState);
    }
    if state.players.is_empty() {
        return Err(MatchError::NoPlayers);
    }
    let player_count = state.players.len();
    let index = state.active_player_index;
    let player = state
        .players
        .get_mut(index)
        .ok_or(MatchError::InvalidState)?;

    let points = darts.map(|d| d.points());
    let outcome = evaluate_turn(player.current_score, points);
    player.record_turn(outcome.record.clone());

    if outcome.win {
        state.winner = Some(player.id);
        state.phase = MatchPhase::Finished;
    } else {
        state.active_player_index = (index + 1) % player_count;
    }
    Ok(outcome)
}

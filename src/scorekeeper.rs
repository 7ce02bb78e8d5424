//! Command surface for the presentation layer: one match plus its undo history.

use crate::logic::{self, TurnOutcome, TurnPreview, UndoHistory};
use crate::models::{
    DartSelection, GameType, MatchError, MatchPhase, MatchState, NewPlayer, PlayerId,
};
use serde::Serialize;

/// Owns a match and the snapshots needed to undo its turns.
///
/// Every command runs to completion synchronously. Callers only get shared references to the
/// state between commands.
#[derive(Clone, Debug, Default)]
pub struct Scorekeeper {
    state: MatchState,
    history: UndoHistory,
}

impl Scorekeeper {
    /// Fresh scorekeeper in Setup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a loaded snapshot. Undo history does not survive a reload.
    pub fn from_state(state: MatchState) -> Self {
        Self {
            state,
            history: UndoHistory::new(),
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn start_match(
        &mut self,
        players: &[NewPlayer],
        game_type: GameType,
    ) -> Result<&MatchState, MatchError> {
        logic::start_match(&mut self.state, players, game_type)?;
        self.history.clear();
        log::info!(
            "Started {} match with {} players",
            game_type,
            self.state.players.len()
        );
        Ok(&self.state)
    }

    /// Score one turn for the active player. The pre-turn state is kept for undo.
    pub fn submit_turn(&mut self, darts: &[DartSelection; 3]) -> Result<TurnOutcome, MatchError> {
        let before = self.state.clone();
        let outcome = logic::submit_turn(&mut self.state, darts)?;
        self.history.snapshot(&before);

        if let Some(player) = self.state.players.get(before.active_player_index) {
            log::debug!(
                "{} threw {:?} (total {}){}",
                player.name,
                outcome.record.darts,
                outcome.total,
                if outcome.bust { " - bust" } else { "" }
            );
        }
        if outcome.win {
            if let Some(winner) = self.state.winner_player() {
                log::info!("{} checked out and wins", winner.name);
            }
        }
        Ok(outcome)
    }

    /// Roll back the most recent turn. No-op when there is nothing to undo.
    pub fn undo(&mut self) -> &MatchState {
        self.history.undo(&mut self.state);
        &self.state
    }

    /// Same players back at their starting scores. Clears the undo history.
    pub fn rematch(&mut self) -> Result<&MatchState, MatchError> {
        logic::rematch(&mut self.state)?;
        self.history.clear();
        log::info!("Scores reset for {} players", self.state.players.len());
        Ok(&self.state)
    }

    /// Drop everything and return to Setup.
    pub fn new_game(&mut self) -> &MatchState {
        logic::new_game(&mut self.state);
        self.history.clear();
        &self.state
    }

    pub fn suggest_checkout(&self, score: u32) -> Option<&'static str> {
        logic::suggest_checkout(score)
    }

    /// Preview the active player's turn in progress. None outside Playing.
    pub fn preview_turn(&self, darts: &[DartSelection; 3]) -> Option<TurnPreview> {
        if self.state.phase != MatchPhase::Playing {
            return None;
        }
        self.state
            .active_player()
            .map(|p| logic::preview_turn(p.current_score, darts))
    }

    /// Read-only view for rendering.
    pub fn view(&self) -> MatchView<'_> {
        let active_checkout = match self.state.phase {
            MatchPhase::Playing => self
                .state
                .active_player()
                .and_then(|p| logic::suggest_checkout(p.current_score)),
            _ => None,
        };
        MatchView {
            state: &self.state,
            can_undo: self.can_undo(),
            active_checkout,
            last_turns: self
                .state
                .players
                .iter()
                .map(|p| LastTurn {
                    player_id: p.id,
                    summary: p.last_turn().map(|t| t.summary()),
                })
                .collect(),
        }
    }
}

/// Last turn of one player, summarised.
#[derive(Clone, Debug, Serialize)]
pub struct LastTurn {
    pub player_id: PlayerId,
    pub summary: Option<String>,
}

/// What the presentation layer renders after each command.
#[derive(Clone, Debug, Serialize)]
pub struct MatchView<'a> {
    #[serde(flatten)]
    pub state: &'a MatchState,
    pub can_undo: bool,
    /// Finish for the active player's current score.
    pub active_checkout: Option<&'static str>,
    pub last_turns: Vec<LastTurn>,
}

//! Turn evaluation: bust / win detection for three resolved darts.

use crate::logic::checkout::suggest_checkout;
use crate::models::{DartSelection, TurnRecord};
use serde::Serialize;

/// Result of evaluating one turn against a remaining score. Pure; applied by `submit_turn`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TurnOutcome {
    /// Score after the turn (unchanged on a bust).
    pub new_score: u32,
    /// Attempted total of the three darts.
    pub total: u32,
    pub bust: bool,
    pub win: bool,
    pub record: TurnRecord,
}

/// Evaluate three resolved darts against `current_score`.
///
/// Bust when the turn would leave less than zero or exactly one. Win when it leaves exactly zero;
/// the last dart is not checked for a double. Board darts are at most 60; larger inputs saturate
/// the total and bust.
pub fn evaluate_turn(current_score: u32, darts: [u32; 3]) -> TurnOutcome {
    let total = darts.iter().fold(0u32, |acc, d| acc.saturating_add(*d));
    let prospective = i64::from(current_score) - i64::from(total);
    let bust = prospective < 0 || prospective == 1;
    let win = prospective == 0;
    let new_score = if bust { current_score } else { prospective as u32 };
    TurnOutcome {
        new_score,
        total,
        bust,
        win,
        record: TurnRecord {
            darts,
            total,
            score_after: new_score,
            bust,
        },
    }
}

/// What a turn in progress would do, shown before it is submitted.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TurnPreview {
    pub total: u32,
    /// May be negative (that turn would bust).
    pub projected: i64,
    pub bust: bool,
    pub win: bool,
    /// Finish for the projected score; only when the turn neither busts nor wins.
    pub checkout: Option<&'static str>,
}

/// Preview three selections against `current_score` without touching any match state.
pub fn preview_turn(current_score: u32, darts: &[DartSelection; 3]) -> TurnPreview {
    let outcome = evaluate_turn(current_score, std::array::from_fn(|i| darts[i].points()));
    let checkout = if outcome.bust || outcome.win {
        None
    } else {
        suggest_checkout(outcome.new_score)
    };
    TurnPreview {
        total: outcome.total,
        projected: i64::from(current_score) - i64::from(outcome.total),
        bust: outcome.bust,
        win: outcome.win,
        checkout,
    }
}

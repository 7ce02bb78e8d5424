//! Scoring rules: dart resolution, turn evaluation, checkouts, match lifecycle, undo.

mod checkout;
mod export;
mod history;
mod play;
mod resolve;
mod setup;
mod turn;

pub use checkout::{suggest_checkout, MAX_CHECKOUT};
pub use export::write_history_csv;
pub use history::{UndoHistory, UNDO_DEPTH};
pub use play::submit_turn;
pub use resolve::resolve;
pub use setup::{new_game, rematch, start_match};
pub use turn::{evaluate_turn, preview_turn, TurnOutcome, TurnPreview};

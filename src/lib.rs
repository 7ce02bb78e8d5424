//! Darts scorekeeper for straight double-out 301/501: library with models and scoring rules.

pub mod config;
pub mod logic;
pub mod models;
pub mod persistence;
mod scorekeeper;

pub use config::ServerConfig;
pub use logic::{
    evaluate_turn, new_game, preview_turn, rematch, resolve, start_match, submit_turn,
    suggest_checkout, write_history_csv, TurnOutcome, TurnPreview, UndoHistory, MAX_CHECKOUT,
    UNDO_DEPTH,
};
pub use models::{
    DartSelection, GameType, MatchError, MatchPhase, MatchState, Multiplier, NewPlayer, Player,
    PlayerId, TurnRecord, MAX_PLAYERS, MIN_PLAYERS,
};
pub use persistence::{
    persist_after_transition, remove_stale_snapshots, FileStore, MemoryStore, PersistenceError,
    Snapshot, SnapshotOp, SnapshotStore, SnapshotWriter,
};
pub use scorekeeper::{LastTurn, MatchView, Scorekeeper};

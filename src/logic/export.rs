//! CSV export of the raw turn history.

use crate::models::MatchState;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct TurnRow<'a> {
    player: &'a str,
    turn: usize,
    dart_1: u32,
    dart_2: u32,
    dart_3: u32,
    total: u32,
    score_after: u32,
    bust: bool,
}

/// Write one row per recorded turn (players in rotation order, turns in play order), with a header.
pub fn write_history_csv<W: Write>(state: &MatchState, writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut wrote_any = false;
    for player in &state.players {
        for (i, turn) in player.history.iter().enumerate() {
            wtr.serialize(TurnRow {
                player: &player.name,
                turn: i + 1,
                dart_1: turn.darts[0],
                dart_2: turn.darts[1],
                dart_3: turn.darts[2],
                total: turn.total,
                score_after: turn.score_after,
                bust: turn.bust,
            })?;
            wrote_any = true;
        }
    }
    // serialize() only emits the header alongside the first row.
    if !wrote_any {
        wtr.write_record([
            "player",
            "turn",
            "dart_1",
            "dart_2",
            "dart_3",
            "total",
            "score_after",
            "bust",
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

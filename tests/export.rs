//! Integration tests for the CSV turn history export.

use darts_scorer::{
    write_history_csv, DartSelection, GameType, MatchState, NewPlayer, Scorekeeper,
};

#[test]
fn empty_match_writes_header_only() {
    let mut out = Vec::new();
    write_history_csv(&MatchState::new(), &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "player,turn,dart_1,dart_2,dart_3,total,score_after,bust\n"
    );
}

#[test]
fn rows_follow_rotation_then_play_order() {
    let mut sk = Scorekeeper::new();
    sk.start_match(
        &[NewPlayer::named("Ann"), NewPlayer::named("Bob")],
        GameType::Three01,
    )
    .unwrap();
    let t20 = DartSelection::treble(20).unwrap();
    let miss = DartSelection::miss();
    sk.submit_turn(&[t20, t20, t20]).unwrap();
    sk.submit_turn(&[DartSelection::single(5).unwrap(), miss, miss])
        .unwrap();
    // Ann on 121 throws 180: bust.
    sk.submit_turn(&[t20, t20, t20]).unwrap();

    let mut out = Vec::new();
    write_history_csv(sk.state(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "player,turn,dart_1,dart_2,dart_3,total,score_after,bust",
            "Ann,1,60,60,60,180,121,false",
            "Ann,2,60,60,60,180,121,true",
            "Bob,1,5,0,0,5,296,false",
        ]
    );
}

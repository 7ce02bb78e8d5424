//! Integration tests for the match lifecycle: start, turns, rotation, win, rematch, new game.

use darts_scorer::{
    rematch, start_match, submit_turn, DartSelection, GameType, MatchError, MatchPhase, MatchState,
    NewPlayer, Scorekeeper,
};

fn players(n: usize) -> Vec<NewPlayer> {
    (0..n).map(|i| NewPlayer::named(format!("P{i}"))).collect()
}

fn started(n: usize, game_type: GameType) -> MatchState {
    let mut state = MatchState::new();
    start_match(&mut state, &players(n), game_type).unwrap();
    state
}

fn darts(points: [(u32, u32); 3]) -> [DartSelection; 3] {
    points.map(|(value, mult)| match mult {
        2 => DartSelection::double(value).unwrap(),
        3 => DartSelection::treble(value).unwrap(),
        _ => DartSelection::single(value).unwrap(),
    })
}

fn t20x3() -> [DartSelection; 3] {
    darts([(20, 3), (20, 3), (20, 3)])
}

fn misses() -> [DartSelection; 3] {
    [DartSelection::miss(); 3]
}

#[test]
fn start_sets_everyone_at_game_type() {
    let state = started(3, GameType::Three01);
    assert_eq!(state.phase, MatchPhase::Playing);
    assert_eq!(state.active_player_index, 0);
    assert_eq!(state.winner, None);
    for p in &state.players {
        assert_eq!(p.current_score, 301);
        assert_eq!(p.starting_score, GameType::Three01);
        assert!(p.history.is_empty());
    }
}

#[test]
fn start_enforces_player_count() {
    let mut state = MatchState::new();
    assert_eq!(
        start_match(&mut state, &players(1), GameType::Five01),
        Err(MatchError::TooFewPlayers { min: 2, got: 1 })
    );
    assert_eq!(
        start_match(&mut state, &players(11), GameType::Five01),
        Err(MatchError::TooManyPlayers { max: 10, got: 11 })
    );
    assert_eq!(state, MatchState::new());
    assert!(start_match(&mut state, &players(10), GameType::Five01).is_ok());
}

#[test]
fn start_requires_setup() {
    let mut state = started(2, GameType::Five01);
    assert_eq!(
        start_match(&mut state, &players(2), GameType::Five01),
        Err(MatchError::InvalidState)
    );
}

#[test]
fn blank_names_default_to_position() {
    let mut state = MatchState::new();
    let entries = vec![NewPlayer::named("  "), NewPlayer::named(" Ann "), NewPlayer::default()];
    start_match(&mut state, &entries, GameType::Five01).unwrap();
    let names: Vec<_> = state.players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Player 1", "Ann", "Player 3"]);
}

#[test]
fn starting_score_must_match_game_type() {
    let mut state = MatchState::new();
    let entries = vec![
        NewPlayer {
            name: "A".into(),
            starting_score: Some(GameType::Five01),
        },
        NewPlayer {
            name: "B".into(),
            starting_score: Some(GameType::Three01),
        },
    ];
    assert_eq!(
        start_match(&mut state, &entries, GameType::Five01),
        Err(MatchError::StartingScoreMismatch {
            expected: 501,
            got: 301
        })
    );
}

#[test]
fn rotation_returns_after_n_turns() {
    for n in 2..=10 {
        let mut state = started(n, GameType::Five01);
        submit_turn(&mut state, &misses()).unwrap();
        let start = state.active_player_index;
        for _ in 0..n {
            submit_turn(&mut state, &misses()).unwrap();
        }
        assert_eq!(state.active_player_index, start, "{n} players");
    }
}

#[test]
fn two_player_scenario() {
    let mut state = started(2, GameType::Five01);
    let out = submit_turn(&mut state, &t20x3()).unwrap();
    assert_eq!(out.new_score, 321);
    assert!(!out.bust);
    assert_eq!(state.active_player_index, 1);

    let out = submit_turn(&mut state, &darts([(25, 1), (25, 1), (0, 1)])).unwrap();
    assert_eq!(out.total, 50);
    assert_eq!(out.new_score, 451);
    assert_eq!(state.players[1].current_score, 451);
    assert_eq!(state.active_player_index, 0);
}

#[test]
fn checkout_finishes_the_match() {
    let mut state = started(2, GameType::Five01);
    state.players[0].current_score = 40;
    let out = submit_turn(&mut state, &darts([(20, 1), (20, 1), (0, 1)])).unwrap();
    assert!(out.win);
    assert_eq!(out.new_score, 0);
    assert_eq!(state.phase, MatchPhase::Finished);
    assert_eq!(state.winner, Some(state.players[0].id));
    assert_eq!(state.winner_player().unwrap().name, "P0");
    // The winner keeps the turn; nobody else plays on.
    assert_eq!(state.active_player_index, 0);
    assert_eq!(
        submit_turn(&mut state, &misses()).map(|_| ()),
        Err(MatchError::InvalidState)
    );
}

#[test]
fn bust_keeps_score_but_passes_the_turn() {
    let mut state = started(2, GameType::Five01);
    state.players[0].current_score = 20;
    let out = submit_turn(&mut state, &darts([(20, 1), (20, 1), (0, 1)])).unwrap();
    assert!(out.bust);
    assert_eq!(state.players[0].current_score, 20);
    assert_eq!(state.players[0].history.len(), 1);
    assert!(state.players[0].history[0].bust);
    assert_eq!(state.active_player_index, 1);
}

#[test]
fn submit_outside_playing_changes_nothing() {
    let mut state = MatchState::new();
    assert_eq!(
        submit_turn(&mut state, &t20x3()).map(|_| ()),
        Err(MatchError::InvalidState)
    );
    assert_eq!(state, MatchState::new());

    let mut empty = MatchState {
        phase: MatchPhase::Playing,
        ..MatchState::new()
    };
    assert_eq!(
        submit_turn(&mut empty, &t20x3()).map(|_| ()),
        Err(MatchError::NoPlayers)
    );
}

#[test]
fn rematch_resets_scores_keeps_order() {
    let mut state = started(3, GameType::Five01);
    let ids: Vec<_> = state.players.iter().map(|p| p.id).collect();
    state.players[0].current_score = 40;
    submit_turn(&mut state, &darts([(20, 2), (0, 1), (0, 1)])).unwrap();
    assert_eq!(state.phase, MatchPhase::Finished);

    rematch(&mut state).unwrap();
    assert_eq!(state.phase, MatchPhase::Playing);
    assert_eq!(state.winner, None);
    assert_eq!(state.active_player_index, 0);
    assert_eq!(state.players.iter().map(|p| p.id).collect::<Vec<_>>(), ids);
    for p in &state.players {
        assert_eq!(p.current_score, 501);
        assert!(p.history.is_empty());
    }
}

#[test]
fn reset_is_allowed_mid_match_but_not_in_setup() {
    let mut state = started(2, GameType::Three01);
    submit_turn(&mut state, &t20x3()).unwrap();
    rematch(&mut state).unwrap();
    assert_eq!(state.phase, MatchPhase::Playing);
    assert_eq!(state.players[0].current_score, 301);

    let mut setup = MatchState::new();
    assert_eq!(rematch(&mut setup), Err(MatchError::InvalidState));
}

#[test]
fn new_game_discards_everything() {
    let mut sk = Scorekeeper::new();
    sk.start_match(&players(2), GameType::Five01).unwrap();
    sk.submit_turn(&t20x3()).unwrap();
    let state = sk.new_game();
    assert_eq!(state, &MatchState::new());
    assert!(!sk.can_undo());
}

#[test]
fn view_reports_checkout_and_last_turns() {
    let mut sk = Scorekeeper::new();
    sk.start_match(&players(2), GameType::Three01).unwrap();
    sk.submit_turn(&t20x3()).unwrap();
    sk.submit_turn(&darts([(20, 1), (5, 1), (1, 1)])).unwrap();
    // P0 on 121, P1 on 275
    let view = sk.view();
    assert!(view.can_undo);
    assert_eq!(view.active_checkout, Some("T20, 25, D18"));
    assert_eq!(view.last_turns[0].summary.as_deref(), Some("60, 60, 60 = -180"));
    assert_eq!(view.last_turns[1].summary.as_deref(), Some("20, 5, 1 = -26"));

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["phase"], "playing");
    assert_eq!(json["game_type"], 301);
    assert_eq!(json["can_undo"], true);
}

#[test]
fn preview_only_while_playing() {
    let mut sk = Scorekeeper::new();
    assert!(sk.preview_turn(&t20x3()).is_none());
    sk.start_match(&players(2), GameType::Five01).unwrap();
    let p = sk.preview_turn(&t20x3()).unwrap();
    assert_eq!(p.projected, 321);
    assert_eq!(sk.state().players[0].current_score, 501);
}

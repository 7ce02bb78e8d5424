//! Integration tests for dart value resolution and dart selections.

use darts_scorer::{resolve, DartSelection, MatchError, Multiplier};

const ALL_MULTIPLIERS: [Multiplier; 3] = [Multiplier::Single, Multiplier::Double, Multiplier::Triple];

#[test]
fn bullseye_is_always_fifty() {
    for m in ALL_MULTIPLIERS {
        assert_eq!(resolve(50, m), 50);
    }
}

#[test]
fn outer_bull_only_doubles() {
    assert_eq!(resolve(25, Multiplier::Single), 25);
    assert_eq!(resolve(25, Multiplier::Double), 50);
    assert_eq!(resolve(25, Multiplier::Triple), 25);
}

#[test]
fn miss_is_always_zero() {
    for m in ALL_MULTIPLIERS {
        assert_eq!(resolve(0, m), 0);
    }
}

#[test]
fn numbers_multiply() {
    for v in 1..=20 {
        assert_eq!(resolve(v, Multiplier::Single), v);
        assert_eq!(resolve(v, Multiplier::Double), 2 * v);
        assert_eq!(resolve(v, Multiplier::Triple), 3 * v);
    }
}

#[test]
fn selection_narrows_multiplier_like_the_input_pad() {
    let bull = DartSelection::new(25, Multiplier::Triple).unwrap();
    assert_eq!(bull.multiplier(), Multiplier::Double);
    assert_eq!(bull.points(), 50);

    let bullseye = DartSelection::new(50, Multiplier::Triple).unwrap();
    assert_eq!(bullseye.multiplier(), Multiplier::Single);
    assert_eq!(bullseye.points(), 50);

    let miss = DartSelection::new(0, Multiplier::Double).unwrap();
    assert_eq!(miss.multiplier(), Multiplier::Single);
    assert_eq!(miss.points(), 0);

    assert_eq!(DartSelection::treble(20).unwrap().points(), 60);
}

#[test]
fn selection_rejects_values_off_the_board() {
    for v in [21, 24, 26, 49, 51, 60] {
        assert!(matches!(
            DartSelection::new(v, Multiplier::Single),
            Err(MatchError::InvalidDart { value, .. }) if value == v
        ));
    }
}

#[test]
fn labels() {
    assert_eq!(DartSelection::miss().label(), "-");
    assert_eq!(DartSelection::single(50).unwrap().label(), "Bull");
    assert_eq!(DartSelection::double(25).unwrap().label(), "D25");
    assert_eq!(DartSelection::single(25).unwrap().label(), "25");
    assert_eq!(DartSelection::treble(20).unwrap().label(), "T20");
    assert_eq!(DartSelection::double(16).unwrap().label(), "D16");
    assert_eq!(DartSelection::single(7).unwrap().label(), "7");
}

#[test]
fn selection_deserializes_through_validation() {
    let d: DartSelection = serde_json::from_str(r#"{"value": 25, "multiplier": 3}"#).unwrap();
    assert_eq!(d.points(), 50);

    let d: DartSelection = serde_json::from_str(r#"{"value": 19}"#).unwrap();
    assert_eq!(d.multiplier(), Multiplier::Single);

    assert!(serde_json::from_str::<DartSelection>(r#"{"value": 21, "multiplier": 1}"#).is_err());
    assert!(serde_json::from_str::<DartSelection>(r#"{"value": 20, "multiplier": 4}"#).is_err());
}

//! Integration tests for checkout suggestions.

use darts_scorer::{suggest_checkout, Scorekeeper, MAX_CHECKOUT};

#[test]
fn nothing_below_two_or_above_max() {
    assert_eq!(suggest_checkout(0), None);
    assert_eq!(suggest_checkout(1), None);
    assert_eq!(suggest_checkout(MAX_CHECKOUT + 1), None);
    assert_eq!(suggest_checkout(501), None);
}

#[test]
fn known_finishes() {
    assert_eq!(suggest_checkout(170), Some("T20, T20, Bull"));
    assert_eq!(suggest_checkout(40), Some("D20"));
    assert_eq!(suggest_checkout(50), Some("Bull"));
    assert_eq!(suggest_checkout(2), Some("D1"));
    assert_eq!(suggest_checkout(100), Some("T20, D20"));
}

#[test]
fn bogey_numbers_have_no_finish() {
    for score in [159, 162, 163, 165, 166, 168, 169] {
        assert_eq!(suggest_checkout(score), None, "{score}");
    }
}

#[test]
fn scorekeeper_delegates_to_table() {
    let sk = Scorekeeper::new();
    assert_eq!(sk.suggest_checkout(170), Some("T20, T20, Bull"));
    assert_eq!(sk.suggest_checkout(1), None);
}

//! Dart value resolution: (base value, multiplier) to points.

use crate::models::{Multiplier, BULL, BULLSEYE, MISS};

/// Points for a dart at `value` with `multiplier` requested.
///
/// Bullseye is always 50 and a miss is always 0. The outer bull only doubles (to 50); any other
/// request scores 25. Every other value is `value * multiplier`.
pub fn resolve(value: u32, multiplier: Multiplier) -> u32 {
    match value {
        BULLSEYE => BULLSEYE,
        BULL if multiplier == Multiplier::Double => BULLSEYE,
        BULL => BULL,
        MISS => 0,
        v => v * multiplier.factor(),
    }
}

//! Dart selections: base value plus multiplier, as composed by the input pad.

use crate::models::match_state::MatchError;
use serde::{Deserialize, Serialize};

/// Outer bull.
pub const BULL: u32 = 25;
/// Inner bull (bullseye).
pub const BULLSEYE: u32 = 50;
/// A dart that missed the board.
pub const MISS: u32 = 0;

/// Single / double / triple ring.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Multiplier {
    #[default]
    Single,
    Double,
    Triple,
}

impl Multiplier {
    pub fn factor(self) -> u32 {
        match self {
            Multiplier::Single => 1,
            Multiplier::Double => 2,
            Multiplier::Triple => 3,
        }
    }
}

impl TryFrom<u8> for Multiplier {
    type Error = MatchError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Multiplier::Single),
            2 => Ok(Multiplier::Double),
            3 => Ok(Multiplier::Triple),
            other => Err(MatchError::InvalidMultiplier(other)),
        }
    }
}

impl From<Multiplier> for u8 {
    fn from(m: Multiplier) -> u8 {
        m.factor() as u8
    }
}

/// One dart as selected on the input pad: base value (0 = miss, 1-20, 25 = bull, 50 = bullseye)
/// and the multiplier mode that was active when the value was picked.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDartSelection")]
pub struct DartSelection {
    value: u32,
    multiplier: Multiplier,
}

/// Unvalidated wire form; only used to route deserialization through [`DartSelection::new`].
#[derive(Deserialize)]
struct RawDartSelection {
    value: u32,
    #[serde(default)]
    multiplier: Multiplier,
}

impl TryFrom<RawDartSelection> for DartSelection {
    type Error = MatchError;

    fn try_from(raw: RawDartSelection) -> Result<Self, Self::Error> {
        DartSelection::new(raw.value, raw.multiplier)
    }
}

impl DartSelection {
    /// Pick `value` while `mode` is the active multiplier.
    ///
    /// Rejects values that are not on the board. The multiplier is narrowed the way the pad does it:
    /// bullseye and miss are always single, and a triple bull becomes a double bull.
    pub fn new(value: u32, mode: Multiplier) -> Result<Self, MatchError> {
        let on_board = matches!(value, MISS..=20 | BULL | BULLSEYE);
        if !on_board {
            return Err(MatchError::InvalidDart {
                value,
                multiplier: mode.factor() as u8,
            });
        }
        let multiplier = match (value, mode) {
            (BULLSEYE, _) | (MISS, _) => Multiplier::Single,
            (BULL, Multiplier::Triple) => Multiplier::Double,
            (_, m) => m,
        };
        Ok(Self { value, multiplier })
    }

    pub fn single(value: u32) -> Result<Self, MatchError> {
        Self::new(value, Multiplier::Single)
    }

    pub fn double(value: u32) -> Result<Self, MatchError> {
        Self::new(value, Multiplier::Double)
    }

    pub fn treble(value: u32) -> Result<Self, MatchError> {
        Self::new(value, Multiplier::Triple)
    }

    pub fn miss() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    /// Points scored by this dart (see [`crate::logic::resolve`]).
    pub fn points(&self) -> u32 {
        crate::logic::resolve(self.value, self.multiplier)
    }

    /// Short label for display: `-`, `Bull`, `D25`, `T20`, `7`.
    pub fn label(&self) -> String {
        match (self.value, self.multiplier) {
            (MISS, _) => "-".to_string(),
            (BULLSEYE, _) => "Bull".to_string(),
            (BULL, Multiplier::Double) => "D25".to_string(),
            (BULL, _) => "25".to_string(),
            (v, Multiplier::Single) => v.to_string(),
            (v, Multiplier::Double) => format!("D{v}"),
            (v, Multiplier::Triple) => format!("T{v}"),
        }
    }
}

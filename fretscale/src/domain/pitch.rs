//! Pitch classes: the 12-note chromatic alphabet and its mod-12 arithmetic.
//!
//! Spelling is fixed to sharps (`C C# D ... B`); there is no enharmonic
//! distinction, so `Db` is rejected rather than mapped to `C#`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Number of pitch classes in an octave.
pub const OCTAVE: usize = 12;

/// One of the 12 equal-tempered pitch classes, in canonical cyclic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

const ALL: [PitchClass; OCTAVE] = [
    PitchClass::C,
    PitchClass::CSharp,
    PitchClass::D,
    PitchClass::DSharp,
    PitchClass::E,
    PitchClass::F,
    PitchClass::FSharp,
    PitchClass::G,
    PitchClass::GSharp,
    PitchClass::A,
    PitchClass::ASharp,
    PitchClass::B,
];

const SYMBOLS: [&str; OCTAVE] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

impl PitchClass {
    /// The canonical ordered list of all 12 pitch classes.
    pub fn all() -> [PitchClass; OCTAVE] {
        ALL
    }

    /// Position in the canonical order (C = 0 ... B = 11).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Pitch class at `index mod 12`; any integer is accepted.
    pub fn at(index: i64) -> PitchClass {
        ALL[index.rem_euclid(OCTAVE as i64) as usize]
    }

    /// Canonical symbol, e.g. `"F#"`.
    pub fn symbol(self) -> &'static str {
        SYMBOLS[self.index()]
    }

    /// Pitch class `semitones` above this one.
    pub fn transpose(self, semitones: i64) -> PitchClass {
        PitchClass::at(self.index() as i64 + semitones)
    }
}

/// Index 0-11 of a canonical note symbol.
pub fn index_of(note: &str) -> Result<usize, DomainError> {
    SYMBOLS
        .iter()
        .position(|s| *s == note)
        .ok_or_else(|| DomainError::InvalidNote(note.to_string()))
}

/// The 12 canonical note symbols in order.
pub fn symbols() -> &'static [&'static str; OCTAVE] {
    &SYMBOLS
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for PitchClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        index_of(s).map(|i| ALL[i])
    }
}

impl TryFrom<String> for PitchClass {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PitchClass> for String {
    fn from(pc: PitchClass) -> Self {
        pc.symbol().to_string()
    }
}

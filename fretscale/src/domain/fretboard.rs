//! Tunings and the fretboard grid derived from them.

use std::fmt;

use crate::domain::pitch::PitchClass;
use crate::domain::DomainError;

/// Strings on the instrument.
pub const STRING_COUNT: usize = 6;

/// Fret positions including the open string (frets 0..=22).
pub const MAX_FRET_COUNT: usize = 23;

/// Six open-string pitch classes, lowest-pitched string first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tuning([PitchClass; STRING_COUNT]);

impl Tuning {
    /// Standard tuning, E A D G B E.
    pub fn standard() -> Self {
        use PitchClass::*;
        Tuning([E, A, D, G, B, E])
    }

    /// Parse six note symbols, lowest string first.
    pub fn from_symbols(symbols: &[&str]) -> Result<Self, DomainError> {
        if symbols.len() != STRING_COUNT {
            return Err(DomainError::InvalidTuning {
                expected: STRING_COUNT,
                actual: symbols.len(),
            });
        }
        let mut strings = [PitchClass::C; STRING_COUNT];
        for (slot, symbol) in strings.iter_mut().zip(symbols) {
            *slot = symbol.parse()?;
        }
        Ok(Tuning(strings))
    }

    pub fn strings(&self) -> &[PitchClass; STRING_COUNT] {
        &self.0
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Tuning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pc in &self.0 {
            write!(f, "{pc}")?;
        }
        Ok(())
    }
}

/// Grid of (string, fret) -> pitch class. Row 0 is the lowest string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fretboard {
    tuning: Tuning,
    rows: Vec<Vec<PitchClass>>,
}

impl Fretboard {
    /// Map every string of `tuning` over frets `0..fret_count`.
    pub fn build(tuning: Tuning, fret_count: usize) -> Result<Self, DomainError> {
        if fret_count > MAX_FRET_COUNT {
            return Err(DomainError::FretRange {
                requested: fret_count,
                max: MAX_FRET_COUNT,
            });
        }
        Ok(Self::map_strings(tuning, fret_count))
    }

    /// Standard tuning over the full neck.
    pub fn standard() -> Self {
        Self::map_strings(Tuning::standard(), MAX_FRET_COUNT)
    }

    fn map_strings(tuning: Tuning, fret_count: usize) -> Self {
        let rows = tuning
            .strings()
            .iter()
            .map(|open| {
                (0..fret_count)
                    .map(|fret| open.transpose(fret as i64))
                    .collect()
            })
            .collect();
        Self { tuning, rows }
    }

    pub fn tuning(&self) -> Tuning {
        self.tuning
    }

    /// Number of fret positions per string, open string included.
    pub fn fret_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Pitch class at `string` (0 = lowest) and `fret`, if on the board.
    pub fn note(&self, string: usize, fret: usize) -> Option<PitchClass> {
        self.rows.get(string)?.get(fret).copied()
    }

    /// Rows, lowest string first.
    pub fn strings(&self) -> &[Vec<PitchClass>] {
        &self.rows
    }
}

//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent music-theory lookups that cannot be satisfied.
/// These are independent of rendering and I/O concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid note: {0:?} (expected one of C C# D D# E F F# G G# A A# B)")]
    InvalidNote(String),

    #[error("unknown scale: {0:?}")]
    UnknownScale(String),

    #[error("tuning must have {expected} strings, got {actual}")]
    InvalidTuning { expected: usize, actual: usize },

    #[error("fret count {requested} exceeds the {max} positions of the fretboard")]
    FretRange { requested: usize, max: usize },
}

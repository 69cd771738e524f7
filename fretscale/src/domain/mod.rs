//! Domain layer: pitch classes, scale formulas, fretboard and resolver
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod formula;
pub mod fretboard;
pub mod pitch;
pub mod resolver;

pub use error::DomainError;
pub use formula::{FormulaTable, IntervalSet, ScaleDefinition, ScaleOrigin};
pub use fretboard::{Fretboard, Tuning, MAX_FRET_COUNT, STRING_COUNT};
pub use pitch::{index_of, PitchClass};
pub use resolver::{resolve, ResolvedScale};

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
///
/// Unknown variables leave the input unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

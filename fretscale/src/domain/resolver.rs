//! Applying a scale formula to a root note.

use std::fmt;

use itertools::Itertools;

use crate::domain::formula::FormulaTable;
use crate::domain::pitch::PitchClass;
use crate::domain::DomainError;

/// Notes of one scale on one root, in scale-degree order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedScale {
    pub root: PitchClass,
    pub scale: String,
    pub notes: Vec<PitchClass>,
}

impl ResolvedScale {
    pub fn contains(&self, pc: PitchClass) -> bool {
        self.notes.contains(&pc)
    }

    pub fn is_root(&self, pc: PitchClass) -> bool {
        self.root == pc
    }

    /// Note symbols in degree order.
    pub fn symbols(&self) -> Vec<&'static str> {
        self.notes.iter().map(|pc| pc.symbol()).collect()
    }
}

impl fmt::Display for ResolvedScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notes.iter().join(" "))
    }
}

/// Resolve `scale_name` on the note symbol `root`.
///
/// The root is checked before the scale name, so a request that is wrong on
/// both counts reports `InvalidNote`.
pub fn resolve(
    table: &FormulaTable,
    root: &str,
    scale_name: &str,
) -> Result<ResolvedScale, DomainError> {
    let root: PitchClass = root.parse()?;
    let definition = table.get(scale_name)?;
    let notes = definition
        .intervals
        .offsets()
        .iter()
        .map(|&offset| root.transpose(offset as i64))
        .collect();
    Ok(ResolvedScale {
        root,
        scale: definition.name.clone(),
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a_blues() {
        let table = FormulaTable::build();
        let scale = resolve(&table, "A", "blues").unwrap();
        assert_eq!(scale.symbols(), vec!["A", "C", "D", "D#", "E", "G"]);
    }

    #[test]
    fn test_c_major_is_white_keys() {
        let table = FormulaTable::build();
        let scale = resolve(&table, "C", "major").unwrap();
        assert_eq!(scale.to_string(), "C D E F G A B");
    }

    #[test]
    fn test_errors() {
        let table = FormulaTable::build();
        assert_eq!(
            resolve(&table, "A", "nope"),
            Err(DomainError::UnknownScale("nope".into()))
        );
        assert_eq!(
            resolve(&table, "Bb", "major"),
            Err(DomainError::InvalidNote("Bb".into()))
        );
        assert_eq!(
            resolve(&table, "Bb", "nope"),
            Err(DomainError::InvalidNote("Bb".into()))
        );
    }
}

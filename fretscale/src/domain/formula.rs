//! Scale formulas: hand-authored base interval sets plus the modal families
//! derived from them by rotation.
//!
//! The table is built once by [`FormulaTable::build`] and never mutated
//! afterwards; consumers hold it behind an `Arc` and only read from it.

use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;

use crate::domain::pitch::OCTAVE;
use crate::domain::DomainError;

/// Semitone offsets from a root: strictly increasing, starting at 0, all < 12.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntervalSet(Vec<u8>);

impl IntervalSet {
    /// Normalize arbitrary offsets: reduce mod 12, dedupe, sort.
    ///
    /// Offset 0 is always included so the root is a member.
    pub fn from_offsets(offsets: &[u8]) -> Self {
        let offsets = std::iter::once(0)
            .chain(offsets.iter().map(|o| o % OCTAVE as u8))
            .sorted()
            .dedup()
            .collect();
        IntervalSet(offsets)
    }

    pub fn offsets(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Mode of this set starting on `degree`, re-expressed from its new root.
    ///
    /// Returns `None` when `degree` is out of range.
    pub fn rotate(&self, degree: usize) -> Option<IntervalSet> {
        let root = *self.0.get(degree)?;
        let rotated = self.0[degree..]
            .iter()
            .chain(&self.0[..degree])
            .map(|&o| (o + OCTAVE as u8 - root) % OCTAVE as u8)
            .sorted()
            .dedup()
            .collect();
        Some(IntervalSet(rotated))
    }
}

impl fmt::Display for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(","))
    }
}

/// Where a scale's formula comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaleOrigin {
    /// Hand-authored entry of the base table.
    Base,
    /// Rotation of `parent` starting at `degree` (0-based).
    Mode { parent: &'static str, degree: usize },
}

/// A named scale and its interval set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleDefinition {
    pub name: String,
    pub intervals: IntervalSet,
    pub origin: ScaleOrigin,
}

impl ScaleDefinition {
    /// Human-readable name: `"lydian_dominant"` -> `"Lydian Dominant"`.
    pub fn title(&self) -> String {
        title_case(&self.name)
    }
}

/// Hand-authored base scales.
pub static BASE_SCALES: [(&str, &[u8]); 10] = [
    ("major", &[0, 2, 4, 5, 7, 9, 11]),
    ("natural_minor", &[0, 2, 3, 5, 7, 8, 10]),
    ("harmonic_minor", &[0, 2, 3, 5, 7, 8, 11]),
    ("melodic_minor", &[0, 2, 3, 5, 7, 9, 11]),
    ("pentatonic_major", &[0, 2, 4, 7, 9]),
    ("pentatonic_minor", &[0, 3, 5, 7, 10]),
    ("blues", &[0, 3, 5, 6, 7, 10]),
    ("whole_tone", &[0, 2, 4, 6, 8, 10]),
    ("diminished_whole_half", &[0, 2, 3, 5, 6, 8, 9, 11]),
    ("diminished_half_whole", &[0, 1, 3, 4, 6, 7, 9, 10]),
];

/// Diatonic modes, by degree of the major scale.
pub const MAJOR_MODES: [&str; 7] = [
    "ionian",
    "dorian",
    "phrygian",
    "lydian",
    "mixolydian",
    "aeolian",
    "locrian",
];

/// Modes of harmonic minor, by degree.
pub const HARMONIC_MINOR_MODES: [&str; 7] = [
    "harmonic_minor",
    "locrian_nat6",
    "ionian_augmented",
    "dorian_augmented4",
    "phrygian_dominant",
    "lydian_augmented9",
    "ultralocrian",
];

/// Modes of melodic minor, by degree.
pub const MELODIC_MINOR_MODES: [&str; 7] = [
    "melodic_minor",
    "dorian_b2",
    "lydian_augmented",
    "lydian_dominant",
    "mixolydian_b6",
    "locrian_nat2",
    "altered_super_locrian",
];

/// Parent scale and mode names of each derived family.
pub static MODE_FAMILIES: [(&str, &[&str; 7]); 3] = [
    ("major", &MAJOR_MODES),
    ("harmonic_minor", &HARMONIC_MINOR_MODES),
    ("melodic_minor", &MELODIC_MINOR_MODES),
];

/// Immutable mapping from scale name to definition.
#[derive(Debug, Clone)]
pub struct FormulaTable {
    scales: BTreeMap<String, ScaleDefinition>,
}

impl FormulaTable {
    /// Build the full table: base scales united with every derived mode.
    pub fn build() -> Self {
        let base = BASE_SCALES.iter().map(|(name, offsets)| ScaleDefinition {
            name: name.to_string(),
            intervals: IntervalSet::from_offsets(offsets),
            origin: ScaleOrigin::Base,
        });

        let derived: Vec<ScaleDefinition> = MODE_FAMILIES
            .iter()
            .flat_map(|&(parent, names)| derive_family(parent, names))
            .collect();

        // derived entries come last so a degree-0 mode named like its parent
        // reports its modal origin
        let scales = base
            .chain(derived)
            .map(|def| (def.name.clone(), def))
            .collect();

        Self { scales }
    }

    /// Definition for `name`, or `UnknownScale`.
    pub fn get(&self, name: &str) -> Result<&ScaleDefinition, DomainError> {
        self.scales
            .get(name)
            .ok_or_else(|| DomainError::UnknownScale(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scales.contains_key(name)
    }

    /// Scale names, sorted alphabetically.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scales.keys().map(String::as_str)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &ScaleDefinition> {
        self.scales.values()
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }
}

impl Default for FormulaTable {
    fn default() -> Self {
        Self::build()
    }
}

/// Rotate `parent` at every degree, naming the results with `names`.
fn derive_family(parent: &'static str, names: &[&'static str]) -> Vec<ScaleDefinition> {
    let Some((_, offsets)) = BASE_SCALES.iter().find(|(name, _)| *name == parent) else {
        return Vec::new();
    };
    let parent_set = IntervalSet::from_offsets(offsets);

    names
        .iter()
        .enumerate()
        .filter_map(|(degree, name)| {
            parent_set.rotate(degree).map(|intervals| ScaleDefinition {
                name: name.to_string(),
                intervals,
                origin: ScaleOrigin::Mode { parent, degree },
            })
        })
        .collect()
}

fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .join(" ")
}

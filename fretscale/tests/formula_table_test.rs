//! Integration tests for the formula table and modal rotation

use std::collections::HashSet;

use rstest::rstest;

use fretscale::domain::formula::{BASE_SCALES, MODE_FAMILIES};
use fretscale::domain::{FormulaTable, IntervalSet, ScaleOrigin};

fn table() -> FormulaTable {
    FormulaTable::build()
}

#[test]
fn given_table_then_every_interval_set_is_normalized() {
    for def in table().definitions() {
        let offsets = def.intervals.offsets();
        assert_eq!(offsets.first(), Some(&0), "{} starts at root", def.name);
        assert!(
            offsets.windows(2).all(|w| w[0] < w[1]),
            "{} sorted and distinct",
            def.name
        );
        assert!(offsets.iter().all(|&o| o < 12), "{} within octave", def.name);
    }
}

#[test]
fn given_every_family_parent_when_rotating_at_degree_zero_then_returns_parent() {
    for (parent, _) in MODE_FAMILIES.iter() {
        let set = table().get(parent).unwrap().intervals.clone();
        assert_eq!(set.rotate(0), Some(set.clone()));
    }
}

#[test]
fn given_seven_note_parent_when_rotating_every_degree_then_rotations_are_distinct() {
    for (parent, offsets) in BASE_SCALES.iter() {
        let set = IntervalSet::from_offsets(offsets);
        if set.len() != 7 {
            continue;
        }
        let rotations: HashSet<IntervalSet> = (0..7).filter_map(|d| set.rotate(d)).collect();
        assert_eq!(rotations.len(), 7, "{parent} rotations");
        assert!(set.rotate(7).is_none());
    }
}

#[rstest]
#[case("ionian", &[0, 2, 4, 5, 7, 9, 11])]
#[case("dorian", &[0, 2, 3, 5, 7, 9, 10])]
#[case("phrygian", &[0, 1, 3, 5, 7, 8, 10])]
#[case("lydian", &[0, 2, 4, 6, 7, 9, 11])]
#[case("mixolydian", &[0, 2, 4, 5, 7, 9, 10])]
#[case("aeolian", &[0, 2, 3, 5, 7, 8, 10])]
#[case("locrian", &[0, 1, 3, 5, 6, 8, 10])]
#[case("locrian_nat6", &[0, 1, 3, 5, 6, 9, 10])]
#[case("phrygian_dominant", &[0, 1, 4, 5, 7, 8, 10])]
#[case("ultralocrian", &[0, 1, 3, 4, 6, 8, 9])]
#[case("lydian_augmented", &[0, 2, 4, 6, 8, 9, 11])]
#[case("lydian_dominant", &[0, 2, 4, 6, 7, 9, 10])]
#[case("altered_super_locrian", &[0, 1, 3, 4, 6, 8, 10])]
fn given_derived_mode_then_formula_matches_textbook(#[case] name: &str, #[case] expected: &[u8]) {
    assert_eq!(table().get(name).unwrap().intervals.offsets(), expected);
}

#[test]
fn given_aeolian_then_equals_natural_minor() {
    let table = table();
    assert_eq!(
        table.get("aeolian").unwrap().intervals,
        table.get("natural_minor").unwrap().intervals
    );
}

#[test]
fn given_shared_names_then_definition_reports_modal_origin() {
    let table = table();
    for name in ["harmonic_minor", "melodic_minor"] {
        assert_eq!(
            table.get(name).unwrap().origin,
            ScaleOrigin::Mode {
                parent: name,
                degree: 0
            }
        );
    }
    assert_eq!(table.len(), 29);
}

#[rstest]
#[case("blues")]
#[case("diminished_whole_half")]
#[case("diminished_half_whole")]
#[case("whole_tone")]
fn given_scale_without_family_then_no_mode_points_at_it(#[case] parent: &str) {
    let derived_from_parent = table()
        .definitions()
        .filter(|d| matches!(d.origin, ScaleOrigin::Mode { parent: p, .. } if p == parent))
        .count();
    assert_eq!(derived_from_parent, 0);
}

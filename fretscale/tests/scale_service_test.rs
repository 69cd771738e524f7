//! Integration tests for scale resolution and fretboard construction

use rstest::rstest;

use fretscale::application::services::ScaleService;
use fretscale::application::ApplicationError;
use fretscale::domain::{DomainError, PitchClass, MAX_FRET_COUNT};
use fretscale::util::testing;

const STANDARD: [&str; 6] = ["E", "A", "D", "G", "B", "E"];

fn service() -> ScaleService {
    testing::init_test_setup();
    ScaleService::default()
}

// ============================================================
// resolve() properties over every root and scale
// ============================================================

#[rstest]
fn given_any_root_and_scale_when_resolving_then_size_matches_formula_and_root_is_member(
    #[values("C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B")] root: &str,
) {
    let service = service();
    for name in service.list_scale_names() {
        let formula = service.describe(&name).unwrap();
        let resolved = service.resolve(root, &name).unwrap();

        assert!(!resolved.notes.is_empty(), "{root} {name}");
        assert_eq!(resolved.notes.len(), formula.intervals.len(), "{root} {name}");
        assert_eq!(resolved.notes[0].symbol(), root);
        assert!(resolved.contains(resolved.root));
    }
}

#[rstest]
#[case("A", "blues")]
#[case("F#", "lydian_dominant")]
#[case("C", "diminished_half_whole")]
fn given_same_inputs_when_resolving_twice_then_results_are_identical(
    #[case] root: &str,
    #[case] scale: &str,
) {
    let service = service();
    let first = service.resolve(root, scale).unwrap();
    let second = service.resolve(root, scale).unwrap();
    assert_eq!(first, second);
}

#[rstest]
#[case("A", "blues", &["A", "C", "D", "D#", "E", "G"])]
#[case("C", "major", &["C", "D", "E", "F", "G", "A", "B"])]
#[case("A", "natural_minor", &["A", "B", "C", "D", "E", "F", "G"])]
#[case("E", "phrygian_dominant", &["E", "F", "G#", "A", "B", "C", "D"])]
#[case("G", "pentatonic_major", &["G", "A", "B", "D", "E"])]
fn given_known_scale_when_resolving_then_returns_textbook_notes(
    #[case] root: &str,
    #[case] scale: &str,
    #[case] expected: &[&str],
) {
    let resolved = service().resolve(root, scale).unwrap();
    assert_eq!(resolved.symbols(), expected);
}

#[test]
fn given_unknown_scale_when_resolving_then_fails_with_unknown_scale() {
    let err = service().resolve("A", "bebop").unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::UnknownScale(ref name)) if name == "bebop"
    ));
}

#[rstest]
#[case("H")]
#[case("Bb")]
#[case("a")]
#[case("")]
fn given_invalid_root_when_resolving_then_fails_with_invalid_note(#[case] root: &str) {
    let err = service().resolve(root, "major").unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidNote(_))
    ));
}

#[test]
fn given_listings_then_notes_are_chromatic_and_scales_sorted() {
    let service = service();
    let notes = service.list_notes();
    assert_eq!(notes.len(), 12);
    assert_eq!(notes[0], "C");
    assert_eq!(notes[11], "B");

    let names = service.list_scale_names();
    assert_eq!(names.len(), 29);
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

// ============================================================
// build_fretboard()
// ============================================================

#[test]
fn given_standard_tuning_when_building_then_open_and_twelfth_fret_match() {
    let board = service().build_fretboard(&STANDARD, 22).unwrap();

    assert_eq!(board.note(0, 0), Some(PitchClass::E));
    assert_eq!(board.note(0, 12), Some(PitchClass::E));
    for (string, symbol) in STANDARD.iter().enumerate() {
        let open = board.note(string, 0).unwrap();
        assert_eq!(open.symbol(), *symbol);
        assert_eq!(board.note(string, 12), Some(open));
    }
}

#[test]
fn given_standard_tuning_when_building_then_fifth_fret_reaches_next_string() {
    let board = service().build_fretboard(&STANDARD, MAX_FRET_COUNT).unwrap();
    // every pair except G->B is a fourth apart
    for string in [0, 1, 2, 4] {
        assert_eq!(board.note(string, 5), board.note(string + 1, 0));
    }
    assert_eq!(board.note(3, 4), board.note(4, 0));
}

#[test]
fn given_fret_count_when_building_then_rows_cover_exactly_that_many_frets() {
    let board = service().build_fretboard(&STANDARD, 5).unwrap();
    assert_eq!(board.fret_count(), 5);
    assert!(board.note(0, 4).is_some());
    assert!(board.note(0, 5).is_none());
}

#[test]
fn given_too_many_frets_when_building_then_fails_with_fret_range() {
    let err = service()
        .build_fretboard(&STANDARD, MAX_FRET_COUNT + 1)
        .unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::FretRange { .. })
    ));
}

#[rstest]
#[case(&["E", "A", "D", "G", "B"])]
#[case(&["E", "A", "D", "G", "B", "E", "A"])]
fn given_wrong_string_count_when_building_then_fails_with_invalid_tuning(#[case] tuning: &[&str]) {
    let err = service().build_fretboard(tuning, 12).unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidTuning { .. })
    ));
}

#[test]
fn given_drop_d_tuning_when_building_then_low_string_starts_on_d() {
    let board = service()
        .build_fretboard(&["D", "A", "D", "G", "B", "E"], 13)
        .unwrap();
    assert_eq!(board.note(0, 0), Some(PitchClass::D));
    assert_eq!(board.note(0, 2), Some(PitchClass::E));
}

#[test]
fn given_invalid_root_and_unknown_scale_when_resolving_then_reports_the_note() {
    let err = service().resolve("Bb", "nope").unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidNote(ref note)) if note == "Bb"
    ));
}

//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Merge Semantics:
//! - Defaults → Global: REPLACE (global defines the real baseline)
//! - Global → Local: UNION with negation support (a directory adds formats)
//! - Any → Env vars: REPLACE (explicit user override)
//!
//! Note: These tests run without a global config (temp directories only),
//! so they effectively test local config merging with defaults.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use fretscale::application::{ApplicationError, ExportFormat};
use fretscale::config::{local_config_path, Settings};

fn write_local(dir: &TempDir, content: &str) {
    fs::write(local_config_path(dir.path()), content).unwrap();
}

#[test]
fn given_no_local_config_when_load_then_uses_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.root, "A");
    assert_eq!(settings.scale, "blues");
    assert!(settings.display.dark_mode);
}

#[test]
fn given_local_formats_when_load_then_unions_with_current() {
    // Arrange: current (defaults) formats are ["png"]
    let dir = TempDir::new().unwrap();
    write_local(
        &dir,
        r#"
[export]
formats = ["svg"]
"#,
    );

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert: union keeps png and adds svg
    assert!(settings.export.formats.contains(&ExportFormat::Png));
    assert!(settings.export.formats.contains(&ExportFormat::Svg));
}

#[test]
fn given_local_negation_when_load_then_removes_inherited_format() {
    let dir = TempDir::new().unwrap();
    write_local(
        &dir,
        r#"
[export]
formats = ["!png", "pdf"]
"#,
    );

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert!(!settings.export.formats.contains(&ExportFormat::Png));
    assert!(settings.export.formats.contains(&ExportFormat::Pdf));
}

#[test]
fn given_local_scalars_when_load_then_override_defaults() {
    let dir = TempDir::new().unwrap();
    write_local(
        &dir,
        r#"
root = "E"
scale = "dorian"

[display]
dark_mode = false
full_fretboard = false

[export]
output_dir = "/tmp/fretscale-out"
png_scale = 2.0
"#,
    );

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.root, "E");
    assert_eq!(settings.scale, "dorian");
    assert!(!settings.display.dark_mode);
    assert!(!settings.display.full_fretboard);
    assert!(settings.display.highlight_roots, "unspecified toggle keeps default");
    assert_eq!(settings.export.output_dir, PathBuf::from("/tmp/fretscale-out"));
    assert_eq!(settings.export.png_scale, 2.0);
}

#[test]
fn given_invalid_root_in_local_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    write_local(&dir, "root = \"Bb\"\n");

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_unknown_format_in_local_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    write_local(&dir, "[export]\nformats = [\"gif\"]\n");

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_malformed_toml_when_load_then_error_names_file() {
    let dir = TempDir::new().unwrap();
    write_local(&dir, "root = \n");

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(err.to_string().contains(".fretscale.toml"));
}

#[test]
fn given_template_as_local_config_when_load_then_equals_defaults() {
    let dir = TempDir::new().unwrap();
    write_local(&dir, &Settings::template());

    let with_template = Settings::load(Some(dir.path())).expect("load settings");
    let empty = TempDir::new().unwrap();
    let without = Settings::load(Some(empty.path())).expect("load settings");

    assert_eq!(with_template, without);
}

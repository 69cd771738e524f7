//! Command dispatch and handlers

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{DiagramRequest, DisplayOptions, ExportFormat};
use crate::cli::args::{Cli, Commands, ConfigCommands, DisplayArgs, OutputArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{
    expand_env_vars, Fretboard, PitchClass, ResolvedScale, ScaleOrigin, Tuning,
};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{FileSystem, RealFileSystem, SelectionItem};
use crate::infrastructure::InfraError;

/// Execute the parsed CLI command.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        Cli::command()
            .print_help()
            .map_err(|e| InfraError::io("print help", e))?;
        return Ok(());
    };

    let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;

    match command {
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Commands::Config { command } => cmd_config(command, &project_dir),
        _ => {
            let settings = Settings::load(Some(&project_dir))?;
            let container = ServiceContainer::new(settings);
            run(&container, command)
        }
    }
}

/// Run a command against an already wired container.
///
/// Config and completion commands are handled by [`execute_command`].
pub fn run(container: &ServiceContainer, command: &Commands) -> CliResult<()> {
    match command {
        Commands::Notes => cmd_notes(container),
        Commands::Scales { long } => cmd_scales(container, *long),
        Commands::Resolve { root, scale } => cmd_resolve(container, root, scale),
        Commands::Fretboard { frets, root, scale } => {
            cmd_fretboard(container, *frets, root.as_deref(), scale.as_deref())
        }
        Commands::Render {
            root,
            scale,
            output,
            display,
        } => cmd_render(container, root, scale, output, display).map(|_| ()),
        Commands::Select { output, display } => cmd_select(container, output, display),
        Commands::Config { .. } | Commands::Completion { .. } => Err(CliError::Usage(
            "config and completion do not run against a service container".into(),
        )),
    }
}

fn resolve_project_dir(dir: Option<&Path>) -> CliResult<PathBuf> {
    match dir {
        Some(d) => Ok(PathBuf::from(expand_env_vars(&d.to_string_lossy()))),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("get current directory", e).into()),
    }
}

// ============================================================
// Listing commands
// ============================================================

fn cmd_notes(container: &ServiceContainer) -> CliResult<()> {
    for note in container.scales.list_notes() {
        output::info(&note);
    }
    Ok(())
}

fn cmd_scales(container: &ServiceContainer, long: bool) -> CliResult<()> {
    if !long {
        for name in container.scales.list_scale_names() {
            output::info(&name);
        }
        return Ok(());
    }

    let table = container.scales.table();
    let width = table.names().map(str::len).max().unwrap_or(0);
    for def in table.definitions() {
        let origin = match &def.origin {
            ScaleOrigin::Base => String::new(),
            ScaleOrigin::Mode { parent, degree } => {
                format!("  (mode {} of {})", degree + 1, parent)
            }
        };
        output::info(&format!(
            "{:<width$}  {}{}",
            def.name,
            def.intervals,
            origin,
            width = width
        ));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_resolve(container: &ServiceContainer, root: &str, scale: &str) -> CliResult<()> {
    let resolved = container.scales.resolve(root, scale)?;
    debug!("resolved {} {} -> {}", root, scale, resolved);
    output::info(&resolved);
    Ok(())
}

// ============================================================
// Fretboard text view
// ============================================================

/// One position of the text fretboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Note(PitchClass),
    Root,
    Member,
    Other,
}

impl Cell {
    fn classify(note: PitchClass, scale: Option<&ResolvedScale>) -> Self {
        match scale {
            None => Cell::Note(note),
            Some(s) if s.is_root(note) => Cell::Root,
            Some(s) if s.contains(note) => Cell::Member,
            Some(_) => Cell::Other,
        }
    }

    fn paint(self) -> String {
        match self {
            Cell::Note(pc) => format!("{:<4}", pc.symbol()),
            Cell::Root => output::root_cell(&format!("{:<4}", "*")).to_string(),
            Cell::Member => output::member_cell(&format!("{:<4}", "o")).to_string(),
            Cell::Other => output::other_cell(&format!("{:<4}", "-")).to_string(),
        }
    }
}

/// Text rows of `board`, high E string first, each prefixed by its open note.
fn fretboard_rows(board: &Fretboard, scale: Option<&ResolvedScale>) -> Vec<(PitchClass, Vec<Cell>)> {
    board
        .strings()
        .iter()
        .rev()
        .filter_map(|row| {
            let open = *row.first()?;
            let cells = row.iter().map(|&pc| Cell::classify(pc, scale)).collect();
            Some((open, cells))
        })
        .collect()
}

#[instrument(skip(container))]
fn cmd_fretboard(
    container: &ServiceContainer,
    frets: usize,
    root: Option<&str>,
    scale: Option<&str>,
) -> CliResult<()> {
    let board = Fretboard::build(Tuning::standard(), frets)?;
    let resolved = match (root, scale) {
        (Some(r), Some(s)) => Some(container.scales.resolve(r, s)?),
        _ => None,
    };
    if let Some(r) = &resolved {
        output::header(&format!("{} {}: {}", r.root, r.scale, r));
    }

    output::detail(&format!("tuning: {}", board.tuning()));
    let numbers: String = (0..board.fret_count()).map(|f| format!("{:<4}", f)).collect();
    output::info(&format!("    {}", numbers.trim_end()));
    for (open, cells) in fretboard_rows(&board, resolved.as_ref()) {
        let line: String = cells.into_iter().map(Cell::paint).collect();
        output::info(&format!("{:<3} {}", open.symbol(), line.trim_end()));
    }
    Ok(())
}

// ============================================================
// Diagram commands
// ============================================================

/// Configured display options with command-line flags applied.
fn display_options(base: DisplayOptions, args: &DisplayArgs) -> DisplayOptions {
    DisplayOptions {
        full_fretboard: base.full_fretboard && !args.half,
        highlight_roots: base.highlight_roots && !args.no_highlight,
        dark_mode: base.dark_mode && !args.light,
    }
}

/// Formats and output directory: flags win over config.
fn export_target(settings: &Settings, args: &OutputArgs) -> (Vec<ExportFormat>, PathBuf) {
    let formats = if args.formats.is_empty() {
        settings.export.formats.clone()
    } else {
        args.formats.clone()
    };
    let dir = match &args.output_dir {
        Some(d) => PathBuf::from(expand_env_vars(&d.to_string_lossy())),
        None => settings.export.output_dir.clone(),
    };
    (formats, dir)
}

#[instrument(skip(container, out_args, display))]
fn cmd_render(
    container: &ServiceContainer,
    root: &str,
    scale: &str,
    out_args: &OutputArgs,
    display: &DisplayArgs,
) -> CliResult<Vec<PathBuf>> {
    let request = DiagramRequest {
        root: root.to_string(),
        scale: scale.to_string(),
        options: display_options(container.settings.display, display),
    };
    let (formats, dir) = export_target(&container.settings, out_args);
    debug!("render: formats={:?} dir={}", formats, dir.display());

    let diagram = container.diagrams.render(&request)?;
    let written = container.exporter.export(&diagram, &formats, &dir)?;
    for path in &written {
        output::success(&format!("Saved {}", path.display()));
    }
    Ok(written)
}

/// Notes for the root picker, starting at `first` and walking up chromatically.
fn root_items(first: PitchClass) -> Vec<SelectionItem> {
    (0..12)
        .map(|i| SelectionItem::plain(first.transpose(i).symbol()))
        .collect()
}

/// Scale names for the scale picker, `preferred` first when known.
fn scale_items(names: Vec<String>, preferred: &str) -> Vec<SelectionItem> {
    let (first, rest): (Vec<_>, Vec<_>) = names.into_iter().partition(|n| n == preferred);
    first
        .into_iter()
        .chain(rest)
        .map(SelectionItem::plain)
        .collect()
}

fn pick(
    container: &ServiceContainer,
    items: &[SelectionItem],
    prompt: &str,
) -> CliResult<Option<String>> {
    let picked = container
        .selector
        .select_one(items, prompt)
        .map_err(|message| InfraError::Selector { message })?;
    Ok(picked.map(|item| item.value))
}

#[instrument(skip(container, out_args, display))]
fn cmd_select(
    container: &ServiceContainer,
    out_args: &OutputArgs,
    display: &DisplayArgs,
) -> CliResult<()> {
    let first: PitchClass = container.settings.root.parse()?;
    let Some(root) = pick(container, &root_items(first), "Root> ")? else {
        output::warning("selection cancelled");
        return Ok(());
    };

    let names = container.scales.list_scale_names();
    let items = scale_items(names, &container.settings.scale);
    let Some(scale) = pick(container, &items, "Scale> ")? else {
        output::warning("selection cancelled");
        return Ok(());
    };

    let resolved = container.scales.resolve(&root, &scale)?;
    output::action("Notes", &resolved);
    cmd_render(container, &root, &scale, out_args, display)?;
    Ok(())
}

// ============================================================
// Config commands
// ============================================================

fn cmd_config(command: &ConfigCommands, project_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(project_dir))?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path()
                    .ok_or_else(|| CliError::Usage("cannot determine config directory".into()))?
            } else {
                local_config_path(project_dir)
            };
            let fs = RealFileSystem;
            if fs.exists(&path) {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            fs.ensure_parent(&path)
                .map_err(|e| InfraError::io(format!("create parent of {}", path.display()), e))?;
            fs.write(&path, &Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("Created {}", path.display()));
            Ok(())
        }
        ConfigCommands::Path => {
            output::header("Config files (lowest to highest precedence):");
            match global_config_path() {
                Some(p) => output::detail(&format!("global: {}{}", p.display(), exists_marker(&p))),
                None => output::detail("global: (no config directory)"),
            }
            let local = local_config_path(project_dir);
            output::detail(&format!("local:  {}{}", local.display(), exists_marker(&local)));
            output::detail("env:    FRETSCALE_*");
            Ok(())
        }
    }
}

fn exists_marker(path: &Path) -> &'static str {
    if path.exists() {
        ""
    } else {
        " (not found)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{resolve, FormulaTable};

    #[test]
    fn given_no_scale_when_classifying_then_cell_shows_note() {
        assert_eq!(Cell::classify(PitchClass::E, None), Cell::Note(PitchClass::E));
    }

    #[test]
    fn given_a_blues_when_classifying_then_marks_root_members_and_others() {
        let table = FormulaTable::build();
        let scale = resolve(&table, "A", "blues").unwrap();
        assert_eq!(Cell::classify(PitchClass::A, Some(&scale)), Cell::Root);
        assert_eq!(Cell::classify(PitchClass::DSharp, Some(&scale)), Cell::Member);
        assert_eq!(Cell::classify(PitchClass::F, Some(&scale)), Cell::Other);
    }

    #[test]
    fn given_standard_board_when_building_rows_then_high_e_first() {
        let board = Fretboard::standard();
        let rows = fretboard_rows(&board, None);
        let opens: Vec<_> = rows.iter().map(|(pc, _)| pc.symbol()).collect();
        assert_eq!(opens, vec!["E", "B", "G", "D", "A", "E"]);
        assert!(rows.iter().all(|(_, cells)| cells.len() == board.fret_count()));
    }

    #[test]
    fn given_flags_when_merging_display_then_flags_only_turn_off() {
        let base = DisplayOptions::default();
        let args = DisplayArgs {
            half: true,
            no_highlight: false,
            light: true,
        };
        let merged = display_options(base, &args);
        assert!(!merged.full_fretboard);
        assert!(merged.highlight_roots);
        assert!(!merged.dark_mode);
    }

    #[test]
    fn given_no_format_flags_when_resolving_target_then_uses_config() {
        let settings = Settings::default();
        let (formats, dir) = export_target(&settings, &OutputArgs::default());
        assert_eq!(formats, vec![ExportFormat::Png]);
        assert_eq!(dir, PathBuf::from("."));
    }

    #[test]
    fn given_format_flags_when_resolving_target_then_flags_win() {
        let settings = Settings::default();
        let args = OutputArgs {
            formats: vec![ExportFormat::Svg, ExportFormat::Pdf],
            output_dir: Some(PathBuf::from("/tmp/out")),
        };
        let (formats, dir) = export_target(&settings, &args);
        assert_eq!(formats, vec![ExportFormat::Svg, ExportFormat::Pdf]);
        assert_eq!(dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn given_root_a_when_listing_roots_then_starts_at_a_and_wraps() {
        let items = root_items(PitchClass::A);
        let values: Vec<_> = items.iter().map(|i| i.value.as_str()).collect();
        assert_eq!(values.len(), 12);
        assert_eq!(values[0], "A");
        assert_eq!(values[3], "C");
        assert_eq!(values[11], "G#");
    }

    #[test]
    fn given_preferred_scale_when_listing_scales_then_it_comes_first() {
        let names = vec!["aeolian".to_string(), "blues".to_string(), "major".to_string()];
        let items = scale_items(names, "blues");
        let values: Vec<_> = items.iter().map(|i| i.value.as_str()).collect();
        assert_eq!(values, vec!["blues", "aeolian", "major"]);
    }
}

//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::application::ExportFormat;

/// Guitar scale explorer: resolve scales and draw them on a six-string fretboard
#[derive(Parser, Debug)]
#[command(name = "fretscale")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Directory holding the local .fretscale.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the 12 note names
    Notes,

    /// List known scales
    Scales {
        /// Show interval formula and origin
        #[arg(short, long)]
        long: bool,
    },

    /// Print the notes of a scale
    Resolve {
        /// Root note (C, C#, D, ... B)
        root: String,
        /// Scale name (see `fretscale scales`)
        scale: String,
    },

    /// Print the standard-tuned fretboard as text
    Fretboard {
        /// Number of fret positions, open string included
        #[arg(long, default_value_t = crate::domain::MAX_FRET_COUNT)]
        frets: usize,
        /// Mark the notes of a scale on this root
        #[arg(long, requires = "scale")]
        root: Option<String>,
        /// Scale to mark
        #[arg(long, requires = "root")]
        scale: Option<String>,
    },

    /// Render a scale diagram to files
    Render {
        /// Root note (C, C#, D, ... B)
        root: String,
        /// Scale name (see `fretscale scales`)
        scale: String,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Pick root and scale interactively (fzf), then render
    Select {
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Where and how diagrams are written.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format, repeatable (default: export.formats from config)
    #[arg(short, long = "format", value_name = "FORMAT")]
    pub formats: Vec<ExportFormat>,

    /// Output directory (default: export.output_dir from config)
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,
}

/// Display toggles; each flag overrides the configured value.
#[derive(clap::Args, Debug, Clone, Copy, Default)]
pub struct DisplayArgs {
    /// Draw only the first 12 frets
    #[arg(long)]
    pub half: bool,

    /// Draw root notes like every other note
    #[arg(long)]
    pub no_highlight: bool,

    /// Use the light palette
    #[arg(long)]
    pub light: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}

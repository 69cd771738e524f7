//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/fretscale/fretscale.toml`
//! 3. Local config: `<dir>/.fretscale.toml` (usually the working directory)
//! 4. Environment variables: `FRETSCALE_*` prefix
//!
//! Command-line flags override all of these; that happens in the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, DisplayOptions, ExportFormat};
use crate::domain::{expand_env_vars, PitchClass};

/// Export configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory receiving `{root}_{scale}.{ext}` files
    pub output_dir: PathBuf,
    /// Formats written when none are given on the command line
    pub formats: Vec<ExportFormat>,
    /// Pixels per SVG unit for PNG output
    pub png_scale: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            formats: vec![ExportFormat::Png],
            png_scale: 1.5,
        }
    }
}

/// Raw display config for intermediate parsing (`None` = not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDisplayConfig {
    pub full_fretboard: Option<bool>,
    pub highlight_roots: Option<bool>,
    pub dark_mode: Option<bool>,
}

/// Raw export config for intermediate parsing.
///
/// Formats are kept as strings so `!fmt` negations survive until merging.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawExportConfig {
    pub output_dir: Option<PathBuf>,
    pub formats: Option<Vec<String>>,
    pub png_scale: Option<f32>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub root: Option<String>,
    pub scale: Option<String>,
    pub display: RawDisplayConfig,
    pub export: RawExportConfig,
}

impl ExportConfig {
    /// Merge format lists with union semantics and negation support.
    ///
    /// - Items from overlay are appended to base (base order is kept)
    /// - Items prefixed with `!` remove the corresponding item from the result
    /// - Duplicates are de-duplicated
    ///
    /// # Examples
    /// ```ignore
    /// merge_formats(&[Png], &["pdf"])          // → [Png, Pdf]
    /// merge_formats(&[Png, Svg], &["!png"])    // → [Svg]
    /// ```
    pub fn merge_formats(
        base: &[ExportFormat],
        overlay: &[String],
    ) -> Result<Vec<ExportFormat>, ApplicationError> {
        let mut result = base.to_vec();
        for pattern in overlay {
            if let Some(negated) = pattern.strip_prefix('!') {
                let format = parse_format(negated)?;
                result.retain(|f| *f != format);
            } else {
                let format = parse_format(pattern)?;
                if !result.contains(&format) {
                    result.push(format);
                }
            }
        }
        Ok(result)
    }

    /// Merge overlay config onto self (base).
    ///
    /// - Scalar options: overlay wins if Some, otherwise keep base
    /// - Formats: union merge with negation support (if overlay specified)
    pub fn merge(&self, overlay: &RawExportConfig) -> Result<Self, ApplicationError> {
        let formats = match &overlay.formats {
            Some(o) => Self::merge_formats(&self.formats, o)?,
            None => self.formats.clone(),
        };
        Ok(Self {
            output_dir: overlay
                .output_dir
                .clone()
                .unwrap_or_else(|| self.output_dir.clone()),
            formats,
            png_scale: overlay.png_scale.unwrap_or(self.png_scale),
        })
    }

    /// Apply global config onto defaults.
    ///
    /// Unlike `merge()` which uses union semantics for formats, this method
    /// uses REPLACE semantics: a format list in the global config completely
    /// replaces the default list.
    pub fn apply_global(&self, global: &RawExportConfig) -> Result<Self, ApplicationError> {
        let formats = match &global.formats {
            Some(g) => g
                .iter()
                .map(|f| parse_format(f.trim_start_matches('!')))
                .collect::<Result<Vec<_>, _>>()?,
            None => self.formats.clone(),
        };
        Ok(Self {
            output_dir: global
                .output_dir
                .clone()
                .unwrap_or_else(|| self.output_dir.clone()),
            formats,
            png_scale: global.png_scale.unwrap_or(self.png_scale),
        })
    }
}

fn merge_display(base: &DisplayOptions, overlay: &RawDisplayConfig) -> DisplayOptions {
    DisplayOptions {
        full_fretboard: overlay.full_fretboard.unwrap_or(base.full_fretboard),
        highlight_roots: overlay.highlight_roots.unwrap_or(base.highlight_roots),
        dark_mode: overlay.dark_mode.unwrap_or(base.dark_mode),
    }
}

fn parse_format(s: &str) -> Result<ExportFormat, ApplicationError> {
    s.parse()
        .map_err(|message| ApplicationError::Config { message })
}

/// Unified configuration for fretscale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Default root note (default: A)
    pub root: String,
    /// Default scale (default: blues)
    pub scale: String,
    /// Diagram display toggles
    pub display: DisplayOptions,
    /// Export settings
    pub export: ExportConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: "A".into(),
            scale: "blues".into(),
            display: DisplayOptions::default(),
            export: ExportConfig::default(),
        }
    }
}

/// Get the XDG config directory for fretscale.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "fretscale").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("fretscale.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".fretscale.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in the output directory.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.export.output_dir.to_string_lossy().as_ref());
        self.export.output_dir = PathBuf::from(expanded);
    }

    /// Merge overlay config onto self (base) with union semantics for formats.
    fn merge_with(&self, overlay: &RawSettings) -> Result<Self, ApplicationError> {
        Ok(Self {
            root: overlay.root.clone().unwrap_or_else(|| self.root.clone()),
            scale: overlay.scale.clone().unwrap_or_else(|| self.scale.clone()),
            display: merge_display(&self.display, &overlay.display),
            export: self.export.merge(&overlay.export)?,
        })
    }

    /// Apply global config onto defaults with REPLACE semantics for formats.
    fn apply_global(&self, global: &RawSettings) -> Result<Self, ApplicationError> {
        Ok(Self {
            root: global.root.clone().unwrap_or_else(|| self.root.clone()),
            scale: global.scale.clone().unwrap_or_else(|| self.scale.clone()),
            display: merge_display(&self.display, &global.display),
            export: self.export.apply_global(&global.export)?,
        })
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.fretscale.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/fretscale/fretscale.toml` (formats REPLACE defaults)
    /// 3. Local config: `<local_dir>/.fretscale.toml` (formats UNION with global)
    /// 4. Environment variables: `FRETSCALE_*` prefix (REPLACES - explicit override)
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.apply_global(&raw)?;
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw)?;
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Apply FRETSCALE_* environment variables as explicit overrides.
    ///
    /// Nested keys use `__`: `FRETSCALE_DISPLAY__DARK_MODE=false`,
    /// `FRETSCALE_EXPORT__FORMATS=png,pdf`.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("FRETSCALE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("export.formats"),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("root") {
            settings.root = val;
        }
        if let Ok(val) = config.get_string("scale") {
            settings.scale = val;
        }
        if let Ok(val) = config.get_bool("display.full_fretboard") {
            settings.display.full_fretboard = val;
        }
        if let Ok(val) = config.get_bool("display.highlight_roots") {
            settings.display.highlight_roots = val;
        }
        if let Ok(val) = config.get_bool("display.dark_mode") {
            settings.display.dark_mode = val;
        }
        if let Ok(val) = config.get_string("export.output_dir") {
            settings.export.output_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get::<Vec<String>>("export.formats") {
            settings.export.formats = val
                .iter()
                .map(|f| parse_format(f))
                .collect::<Result<_, _>>()?;
        }
        if let Ok(val) = config.get_float("export.png_scale") {
            settings.export.png_scale = val as f32;
        }

        Ok(settings)
    }

    /// Reject values that would only fail later, deep inside a command.
    fn validate(&self) -> Result<(), ApplicationError> {
        self.root
            .parse::<PitchClass>()
            .map_err(|e| ApplicationError::Config {
                message: format!("root: {e}"),
            })?;
        if !(self.export.png_scale > 0.0 && self.export.png_scale <= 8.0) {
            return Err(ApplicationError::Config {
                message: format!(
                    "export.png_scale must be in (0, 8], got {}",
                    self.export.png_scale
                ),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# fretscale configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/fretscale/fretscale.toml  (defines your baseline)
#   Local:  ./.fretscale.toml                   (per-directory additions)
#   Env:    FRETSCALE_* environment variables   (explicit overrides)
#
# Format Merge Semantics:
#   Global config REPLACES the compiled default format list.
#   Local config UNIONS with global.
#   Use "!fmt" in local config to REMOVE an inherited format:
#     formats = ["pdf", "!png"]  # adds pdf, removes png

# Root note preselected by `fretscale select` (C C# D D# E F F# G G# A A# B)
# root = "A"

# Scale preselected by `fretscale select`
# scale = "blues"

[display]
# Show all 22 frets (false: first 12 only)
# full_fretboard = true

# Draw root notes in red
# highlight_roots = true

# Dark palette (false: light parchment)
# dark_mode = true

[export]
# Directory for {root}_{scale}.{ext} files
# output_dir = "."

# Formats written when -f is not given: png, svg, pdf
# formats = ["png"]

# Pixels per SVG unit in PNG output
# png_scale = 1.5
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

//! Fretboard diagram layout and SVG output.
//!
//! The diagram is laid out in "board units": one unit per fret horizontally
//! and one per string vertically, with the high E string on top (y = 0) and
//! the low E string at the bottom (y = 5). Open-string markers sit left of the
//! nut, fretted markers are centred between fret wires.
//!
//! [`render_svg`] is pure; turning the SVG into PNG/PDF bytes is the job of
//! the exporter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{Fretboard, PitchClass, ResolvedScale, STRING_COUNT};

/// Frets shown when only the first octave is requested.
pub const HALF_NECK_FRETS: usize = 12;

/// Frets shown on the full neck.
pub const FULL_NECK_FRETS: usize = 22;

const INLAY_FRETS: [usize; 5] = [3, 5, 7, 9, 12];
const STRING_WIDTHS: [f64; STRING_COUNT] = [3.0, 2.5, 2.0, 1.5, 1.2, 1.0];

// pixels per board unit
const X_UNIT: f64 = 64.0;
const Y_UNIT: f64 = 44.0;

// visible board range, in board units
const X_MIN: f64 = -2.0;
const X_PAD: f64 = 0.5;
const Y_MIN: f64 = -1.5;
const Y_MAX: f64 = 6.5;

const OPEN_STRING_X: f64 = -0.8;
const MARKER_RADIUS: f64 = 0.28;
const FONT_FAMILY: &str = "DejaVu Sans, Arial, Helvetica, sans-serif";

/// Display toggles collected by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// Show 22 frets instead of 12
    pub full_fretboard: bool,
    /// Draw root-note markers in the accent colour
    pub highlight_roots: bool,
    /// Dark palette instead of the light one
    pub dark_mode: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            full_fretboard: true,
            highlight_roots: true,
            dark_mode: true,
        }
    }
}

impl DisplayOptions {
    /// Highest fret drawn.
    pub fn max_fret(&self) -> usize {
        if self.full_fretboard {
            FULL_NECK_FRETS
        } else {
            HALF_NECK_FRETS
        }
    }
}

/// Output file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Raster image
    Png,
    /// Vector image, written as rendered
    Svg,
    /// Print format
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "svg" => Ok(ExportFormat::Svg),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(format!("unsupported format {other:?} (expected png, svg or pdf)")),
        }
    }
}

/// What to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramRequest {
    pub root: String,
    pub scale: String,
    pub options: DisplayOptions,
}

/// A rendered diagram, ready for export.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    /// File name without extension: `{root}_{scale}`
    pub stem: String,
    pub title: String,
    pub svg: String,
    pub width: f64,
    pub height: f64,
}

impl Diagram {
    pub fn file_name(&self, format: ExportFormat) -> String {
        format!("{}.{}", self.stem, format.extension())
    }
}

/// File stem for a root/scale pair, e.g. `A_blues`.
pub fn file_stem(root: PitchClass, scale: &str) -> String {
    format!("{}_{}", root, scale)
}

/// Colours of one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
    pub nut: &'static str,
    pub fret: &'static str,
    pub string: &'static str,
    pub inlay: &'static str,
    pub root: &'static str,
    pub marker: &'static str,
    pub marker_edge: &'static str,
}

impl Palette {
    pub fn for_options(options: &DisplayOptions) -> Self {
        if options.dark_mode {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }

    pub const DARK: Palette = Palette {
        background: "#3b2f2f",
        text: "white",
        nut: "ivory",
        fret: "silver",
        string: "lightgray",
        inlay: "white",
        root: "red",
        marker: "white",
        marker_edge: "black",
    };

    pub const LIGHT: Palette = Palette {
        background: "#f4e9dc",
        text: "black",
        nut: "black",
        fret: "silver",
        string: "lightgray",
        inlay: "white",
        root: "red",
        marker: "white",
        marker_edge: "black",
    };
}

/// Title line: `"A Blues Scale"`.
pub fn title(root: PitchClass, scale_title: &str) -> String {
    format!("{} {} Scale", root, scale_title)
}

/// Draw `scale` over `board` as a standalone SVG document.
pub fn render_svg(
    scale: &ResolvedScale,
    board: &Fretboard,
    options: &DisplayOptions,
    title: &str,
) -> (String, f64, f64) {
    let palette = Palette::for_options(options);
    let max_fret = options.max_fret().min(board.fret_count().saturating_sub(1));
    let width = px_x(max_fret as f64 + X_PAD);
    let height = (Y_MAX - Y_MIN) * Y_UNIT;

    let mut svg = SvgBuilder::new(width, height);
    svg.rect(0.0, 0.0, width, height, palette.background);
    svg.text(
        width / 2.0,
        px_y(-0.9),
        title,
        26.0,
        palette.text,
        true,
    );

    for fret in 1..=max_fret {
        let x = px_x(fret as f64);
        svg.line(x, px_y(0.0), x, px_y(5.0), palette.fret, 1.2);
    }
    svg.line(px_x(0.0), px_y(0.0), px_x(0.0), px_y(5.0), palette.nut, 4.0);

    // row 0 of the board is the low E string, drawn at the bottom
    for (row, width_px) in STRING_WIDTHS.iter().enumerate() {
        let y = px_y(string_y(row));
        svg.line(px_x(0.0), y, px_x(max_fret as f64), y, palette.string, *width_px);
    }

    for fret in INLAY_FRETS.iter().copied().filter(|f| *f <= max_fret) {
        let x = px_x(fret as f64 - 0.5);
        if fret == 12 {
            svg.circle(x, px_y(1.5), 0.08 * Y_UNIT, palette.inlay, None);
            svg.circle(x, px_y(3.5), 0.08 * Y_UNIT, palette.inlay, None);
        } else {
            svg.circle(x, px_y(2.5), 0.1 * Y_UNIT, palette.inlay, None);
        }
    }

    for row in 0..STRING_COUNT {
        let y = string_y(row);
        for fret in 0..=max_fret {
            let Some(note) = board.note(row, fret) else {
                continue;
            };
            if !scale.contains(note) {
                continue;
            }
            let x = if fret == 0 {
                OPEN_STRING_X
            } else {
                fret as f64 - 0.5
            };
            draw_marker(&mut svg, x, y, note, scale, options, &palette);
        }
    }

    (svg.finish(), width, height)
}

/// Vertical board position of a fretboard row (row 0 = low E).
fn string_y(row: usize) -> f64 {
    (STRING_COUNT - 1 - row) as f64
}

fn px_x(x: f64) -> f64 {
    (x - X_MIN) * X_UNIT
}

fn px_y(y: f64) -> f64 {
    (y - Y_MIN) * Y_UNIT
}

fn draw_marker(
    svg: &mut SvgBuilder,
    x: f64,
    y: f64,
    note: PitchClass,
    scale: &ResolvedScale,
    options: &DisplayOptions,
    palette: &Palette,
) {
    let (fill, edge, label) = if options.highlight_roots && scale.is_root(note) {
        (palette.root, palette.root, palette.marker)
    } else {
        (palette.marker, palette.marker_edge, palette.marker_edge)
    };
    let (cx, cy) = (px_x(x), px_y(y));
    svg.circle(cx, cy, MARKER_RADIUS * Y_UNIT, fill, Some(edge));
    svg.text(cx, cy, note.symbol(), 13.0, label, true);
}

/// Minimal SVG writer.
struct SvgBuilder {
    out: String,
}

impl SvgBuilder {
    fn new(width: f64, height: f64) -> Self {
        let mut builder = Self { out: String::new() };
        builder.push(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        builder.push(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">"#,
            w = width,
            h = height
        ));
        builder
    }

    /// Append one line of markup.
    fn push(&mut self, markup: &str) {
        self.out.push_str(markup);
        self.out.push('\n');
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str) {
        self.push(&format!(
            r#"  <rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" fill="{fill}"/>"#
        ));
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str, width: f64) {
        self.push(&format!(
            r#"  <line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" stroke="{stroke}" stroke-width="{width:.1}"/>"#
        ));
    }

    fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str, stroke: Option<&str>) {
        let markup = match stroke {
            Some(stroke) => format!(
                r#"  <circle cx="{cx:.1}" cy="{cy:.1}" r="{r:.1}" fill="{fill}" stroke="{stroke}" stroke-width="1.0"/>"#
            ),
            None => format!(r#"  <circle cx="{cx:.1}" cy="{cy:.1}" r="{r:.1}" fill="{fill}"/>"#),
        };
        self.push(&markup);
    }

    fn text(&mut self, x: f64, y: f64, content: &str, size: f64, fill: &str, bold: bool) {
        let weight = if bold { "bold" } else { "normal" };
        self.push(&format!(
            r#"  <text x="{x:.1}" y="{y:.1}" font-family="{FONT_FAMILY}" font-size="{size:.0}" font-weight="{weight}" fill="{fill}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
            escape(content)
        ));
    }

    fn finish(mut self) -> String {
        self.push("</svg>");
        self.out
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

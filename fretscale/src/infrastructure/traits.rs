//! I/O boundary traits for testability
//!
//! These traits abstract file writes, image encoding and interactive
//! selection, allowing services and commands to be tested with mock
//! implementations.

use std::io;
use std::path::Path;

use tracing::debug;

use crate::application::ExportFormat;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Write raw bytes to file.
    fn write_bytes(&self, path: &Path, content: &[u8]) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

/// Turns an SVG document into raster or print bytes.
pub trait ImageEncoder: Send + Sync {
    /// Encode `svg` as `format` (PNG or PDF).
    fn encode(&self, svg: &str, format: ExportFormat) -> Result<Vec<u8>, String>;
}

/// Item for FZF-style selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionItem {
    /// Display text shown in selector
    pub display: String,
    /// Actual value (e.g., note symbol or scale name)
    pub value: String,
}

impl SelectionItem {
    /// Item whose display text is its value.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            display: value.clone(),
            value,
        }
    }
}

/// Interactive FZF-style selector abstraction.
pub trait Selector: Send + Sync {
    /// Present items to user and return selected one.
    /// Returns None if user cancels (Esc/Ctrl-C).
    fn select_one(
        &self,
        items: &[SelectionItem],
        prompt: &str,
    ) -> Result<Option<SelectionItem>, String>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn write_bytes(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// Real encoder: resvg rasterizes PNG, svg2pdf converts to PDF.
#[derive(Debug, Clone)]
pub struct SvgImageEncoder {
    /// Pixels per SVG user unit in PNG output
    pub png_scale: f32,
    /// Load installed fonts so note labels and titles are drawn
    pub system_fonts: bool,
}

impl Default for SvgImageEncoder {
    fn default() -> Self {
        Self {
            png_scale: 1.5,
            system_fonts: true,
        }
    }
}

impl SvgImageEncoder {
    pub fn new(png_scale: f32) -> Self {
        Self {
            png_scale,
            ..Self::default()
        }
    }

    fn encode_png(&self, svg: &str) -> Result<Vec<u8>, String> {
        use resvg::{tiny_skia, usvg};

        let mut options = usvg::Options::default();
        if self.system_fonts {
            options.fontdb_mut().load_system_fonts();
        }
        let tree = usvg::Tree::from_str(svg, &options).map_err(|e| format!("parse svg: {e}"))?;

        let size = tree.size().to_int_size();
        let width = (size.width() as f32 * self.png_scale).ceil() as u32;
        let height = (size.height() as f32 * self.png_scale).ceil() as u32;
        debug!("encode_png: {}x{} scale={}", width, height, self.png_scale);

        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| format!("cannot allocate {width}x{height} pixmap"))?;
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(self.png_scale, self.png_scale),
            &mut pixmap.as_mut(),
        );
        pixmap.encode_png().map_err(|e| format!("encode png: {e}"))
    }

    fn encode_pdf(&self, svg: &str) -> Result<Vec<u8>, String> {
        use svg2pdf::usvg;

        let mut options = usvg::Options::default();
        if self.system_fonts {
            options.fontdb_mut().load_system_fonts();
        }
        let tree = usvg::Tree::from_str(svg, &options).map_err(|e| format!("parse svg: {e}"))?;
        debug!("encode_pdf: {:?}", tree.size());

        svg2pdf::to_pdf(
            &tree,
            svg2pdf::ConversionOptions::default(),
            svg2pdf::PageOptions::default(),
        )
        .map_err(|e| format!("convert pdf: {e:?}"))
    }
}

impl ImageEncoder for SvgImageEncoder {
    fn encode(&self, svg: &str, format: ExportFormat) -> Result<Vec<u8>, String> {
        match format {
            ExportFormat::Png => self.encode_png(svg),
            ExportFormat::Pdf => self.encode_pdf(svg),
            ExportFormat::Svg => Ok(svg.as_bytes().to_vec()),
        }
    }
}

/// Real selector implementation using skim (FZF-like).
#[derive(Debug, Default)]
pub struct SkimSelector;

impl Selector for SkimSelector {
    fn select_one(
        &self,
        items: &[SelectionItem],
        prompt: &str,
    ) -> Result<Option<SelectionItem>, String> {
        use skim::prelude::*;
        use std::io::Cursor;

        if items.is_empty() {
            return Ok(None);
        }

        // Build input as newline-separated display strings
        let input = items
            .iter()
            .map(|i| i.display.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let options = SkimOptionsBuilder::default()
            .prompt(Some(prompt))
            .height(Some("50%"))
            .multi(false)
            .build()
            .map_err(|e| format!("failed to build skim options: {e}"))?;

        let item_reader = SkimItemReader::default();
        let items_arc = item_reader.of_bufread(Cursor::new(input));

        match Skim::run_with(&options, Some(items_arc)) {
            Some(out) if out.is_abort => Ok(None),
            Some(out) => Ok(out
                .selected_items
                .first()
                .and_then(|selected| {
                    let display = selected.output().to_string();
                    items.iter().find(|i| i.display == display).cloned()
                })),
            None => Ok(None),
        }
    }
}

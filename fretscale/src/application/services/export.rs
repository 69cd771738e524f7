//! Diagram export service
//!
//! Serializes a rendered diagram to one file per requested format,
//! named `{root}_{scale}.{ext}` inside the output directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, info, instrument};

use crate::application::diagram::{Diagram, ExportFormat};
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::infrastructure::traits::{FileSystem, ImageEncoder};

/// Service writing diagrams to disk.
pub struct ExportService {
    fs: Arc<dyn FileSystem>,
    encoder: Arc<dyn ImageEncoder>,
}

impl ExportService {
    /// Create a new export service.
    pub fn new(fs: Arc<dyn FileSystem>, encoder: Arc<dyn ImageEncoder>) -> Self {
        Self { fs, encoder }
    }

    /// Encode `diagram` in every format of `formats` and write the files.
    ///
    /// Duplicate formats are written once. Returns the written paths in the
    /// order the formats were requested.
    #[instrument(skip(self, diagram), fields(stem = %diagram.stem))]
    pub fn export(
        &self,
        diagram: &Diagram,
        formats: &[ExportFormat],
        out_dir: &Path,
    ) -> ApplicationResult<Vec<PathBuf>> {
        if formats.is_empty() {
            return Err(ApplicationError::Render {
                message: "no export format requested".to_string(),
            });
        }
        if !self.fs.exists(out_dir) {
            debug!("creating output dir {}", out_dir.display());
            self.fs
                .create_dir_all(out_dir)
                .with_path_context("create output dir", out_dir)?;
        }

        let mut written = Vec::new();
        for format in formats.iter().copied().unique() {
            let target = out_dir.join(diagram.file_name(format));
            let bytes = self.encode(diagram, format)?;
            self.fs
                .write_bytes(&target, &bytes)
                .with_path_context("write diagram", &target)?;
            info!("wrote {} ({} bytes)", target.display(), bytes.len());
            written.push(target);
        }
        Ok(written)
    }

    /// Bytes of `diagram` in `format`.
    pub fn encode(&self, diagram: &Diagram, format: ExportFormat) -> ApplicationResult<Vec<u8>> {
        match format {
            ExportFormat::Svg => Ok(diagram.svg.clone().into_bytes()),
            ExportFormat::Png | ExportFormat::Pdf => self
                .encoder
                .encode(&diagram.svg, format)
                .map_err(|message| ApplicationError::Render {
                    message: format!("{} {}: {}", diagram.stem, format, message),
                }),
        }
    }
}

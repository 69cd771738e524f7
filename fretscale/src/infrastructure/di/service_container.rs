//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::{DiagramService, ExportService, ScaleService};
use crate::config::Settings;
use crate::domain::FormulaTable;
use crate::infrastructure::traits::{
    FileSystem, ImageEncoder, RealFileSystem, Selector, SkimSelector, SvgImageEncoder,
};

/// Container holding all application services.
///
/// The formula table is built once here and shared read-only by every service.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Interactive selector
    pub selector: Arc<dyn Selector>,

    pub scales: ScaleService,
    pub diagrams: DiagramService,
    pub exporter: ExportService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let encoder = SvgImageEncoder::new(settings.export.png_scale);
        Self::with_deps(
            settings,
            Arc::new(RealFileSystem),
            Arc::new(encoder),
            Arc::new(SkimSelector),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        encoder: Arc<dyn ImageEncoder>,
        selector: Arc<dyn Selector>,
    ) -> Self {
        let settings = Arc::new(settings);
        let table = Arc::new(FormulaTable::build());
        debug!("formula table: {} scales", table.len());

        let scales = ScaleService::new(table);
        let diagrams = DiagramService::new(scales.clone());
        let exporter = ExportService::new(fs.clone(), encoder);

        Self {
            settings,
            fs,
            selector,
            scales,
            diagrams,
            exporter,
        }
    }
}

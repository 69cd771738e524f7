//! Scale lookup service
//!
//! The small pure API the UI and renderer consume: note and scale listings,
//! scale resolution and fretboard construction.

use std::sync::Arc;

use tracing::debug;

use crate::application::ApplicationResult;
use crate::domain::{
    pitch, resolve, FormulaTable, Fretboard, ResolvedScale, ScaleDefinition, Tuning,
};

/// Service answering music-theory queries against a shared formula table.
#[derive(Debug, Clone)]
pub struct ScaleService {
    table: Arc<FormulaTable>,
}

impl ScaleService {
    /// Create a new scale service over an already built table.
    pub fn new(table: Arc<FormulaTable>) -> Self {
        Self { table }
    }

    /// Scale names, sorted alphabetically for display.
    pub fn list_scale_names(&self) -> Vec<String> {
        self.table.names().map(str::to_string).collect()
    }

    /// The 12 canonical note symbols in chromatic order.
    pub fn list_notes(&self) -> Vec<String> {
        pitch::symbols().iter().map(|s| s.to_string()).collect()
    }

    /// Notes of `scale` on `root`, in scale-degree order.
    pub fn resolve(&self, root: &str, scale: &str) -> ApplicationResult<ResolvedScale> {
        debug!("resolve: root={} scale={}", root, scale);
        Ok(resolve(&self.table, root, scale)?)
    }

    /// Formula and origin of `scale`.
    pub fn describe(&self, scale: &str) -> ApplicationResult<ScaleDefinition> {
        Ok(self.table.get(scale)?.clone())
    }

    /// Fretboard for six note symbols (lowest string first) over `fret_count` positions.
    pub fn build_fretboard(&self, tuning: &[&str], fret_count: usize) -> ApplicationResult<Fretboard> {
        debug!("build_fretboard: tuning={:?} frets={}", tuning, fret_count);
        let tuning = Tuning::from_symbols(tuning)?;
        Ok(Fretboard::build(tuning, fret_count)?)
    }

    pub fn table(&self) -> &FormulaTable {
        &self.table
    }
}

impl Default for ScaleService {
    fn default() -> Self {
        Self::new(Arc::new(FormulaTable::build()))
    }
}

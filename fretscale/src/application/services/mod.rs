//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, ImageEncoder)
//! but are themselves concrete structs, not traits.

mod diagram;
mod export;
mod scale;

pub use diagram::DiagramService;
pub use export::ExportService;
pub use scale::ScaleService;

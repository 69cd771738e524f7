//! Diagram rendering service
//!
//! Resolves the requested scale and draws it over the standard-tuned neck.

use tracing::{debug, info};

use crate::application::diagram::{self, Diagram, DiagramRequest};
use crate::application::services::ScaleService;
use crate::application::ApplicationResult;
use crate::domain::Fretboard;

/// Service producing SVG diagrams for root/scale requests.
#[derive(Debug, Clone)]
pub struct DiagramService {
    scales: ScaleService,
    board: Fretboard,
}

impl DiagramService {
    /// Create a diagram service drawing on the standard-tuned fretboard.
    pub fn new(scales: ScaleService) -> Self {
        Self {
            scales,
            board: Fretboard::standard(),
        }
    }

    /// Render `request` to an SVG diagram named `{root}_{scale}`.
    pub fn render(&self, request: &DiagramRequest) -> ApplicationResult<Diagram> {
        let scale = self.scales.resolve(&request.root, &request.scale)?;
        let definition = self.scales.describe(&request.scale)?;
        let title = diagram::title(scale.root, &definition.title());
        debug!(
            "render: {} notes={} options={:?}",
            title, scale, request.options
        );

        let (svg, width, height) =
            diagram::render_svg(&scale, &self.board, &request.options, &title);
        let stem = diagram::file_stem(scale.root, &scale.scale);
        info!("rendered {} ({:.0}x{:.0})", stem, width, height);

        Ok(Diagram {
            stem,
            title,
            svg,
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationError, DisplayOptions};
    use crate::domain::DomainError;

    fn request(root: &str, scale: &str) -> DiagramRequest {
        DiagramRequest {
            root: root.to_string(),
            scale: scale.to_string(),
            options: DisplayOptions::default(),
        }
    }

    #[test]
    fn given_valid_request_when_rendering_then_names_file_after_root_and_scale() {
        let service = DiagramService::new(ScaleService::default());
        let diagram = service.render(&request("A", "blues")).unwrap();
        assert_eq!(diagram.stem, "A_blues");
        assert_eq!(diagram.title, "A Blues Scale");
        assert!(diagram.svg.starts_with("<?xml"));
        assert!(diagram.svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn given_unknown_scale_when_rendering_then_fails_with_domain_error() {
        let service = DiagramService::new(ScaleService::default());
        let err = service.render(&request("A", "bebop")).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::UnknownScale(_))
        ));
    }
}

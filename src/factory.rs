use std::path::PathBuf;

use crate::error::VisualizeError;
use crate::export::EmbeddingExportScheme;
use crate::projection::Projection;
use crate::scatter::{PlottersRenderer, ScatterPlotScheme};
use crate::scheme::VisualizeScheme;

/// Identifier of the scatter-plot scheme.
pub const PLOT_IDENTIFIER: &str = "plot";
/// Identifier of the embedding-export scheme.
pub const TENSORBOARD_IDENTIFIER: &str = "tensorboard";

/// All scheme identifiers accepted by [`create_scheme`].
pub const IDENTIFIERS: [&str; 2] = [PLOT_IDENTIFIER, TENSORBOARD_IDENTIFIER];

pub const DEFAULT_IDENTIFIER: &str = PLOT_IDENTIFIER;

/// File name of the scatter image, resolved against the output path.
const SCATTER_IMAGE_FILE: &str = "features_scatter.png";

/// Configuration shared by all schemes; which pieces are mandatory depends on
/// the variant being constructed.
#[derive(Default)]
pub struct SchemeConfig {
    pub projection: Option<Box<dyn Projection>>,
    pub output_path: Option<PathBuf>,
}

/// Constructs the scheme registered under `identifier`.
///
/// The scatter variant writes its image into the output path when one is
/// supplied, and into the current directory otherwise.
pub fn create_scheme(
    identifier: &str,
    config: SchemeConfig,
) -> Result<Box<dyn VisualizeScheme>, VisualizeError> {
    match identifier {
        PLOT_IDENTIFIER => {
            let image_path = match config.output_path {
                Some(dir) => dir.join(SCATTER_IMAGE_FILE),
                None => PathBuf::from(SCATTER_IMAGE_FILE),
            };
            let renderer = Box::new(PlottersRenderer::new(image_path));
            let scheme = ScatterPlotScheme::new(config.projection, renderer)?;
            Ok(Box::new(scheme))
        }
        TENSORBOARD_IDENTIFIER => {
            let scheme = EmbeddingExportScheme::new(config.projection, config.output_path)?;
            Ok(Box::new(scheme))
        }
        other => Err(VisualizeError::Configuration(format!(
            "unknown visualization scheme '{}', expected one of {:?}",
            other, IDENTIFIERS
        ))),
    }
}

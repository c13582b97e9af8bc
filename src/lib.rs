//! Schemes for visualizing labelled feature vectors.
//!
//! Two strategies are provided behind the [`VisualizeScheme`] capability:
//! [`scatter::ScatterPlotScheme`] projects features onto two dimensions and
//! renders a scatter plot, while [`export::EmbeddingExportScheme`] writes the
//! (optionally projected) embedding plus labels in a layout an external
//! embedding-visualization tool can load.
//!
//! Dimensionality reduction itself is an external collaborator supplied via
//! the [`projection::Projection`] trait; this crate only consumes it.

pub mod error;
pub mod export;
pub mod factory;
pub mod features;
pub mod projection;
pub mod scatter;
pub mod scheme;

pub use error::VisualizeError;
pub use factory::{create_scheme, SchemeConfig, DEFAULT_IDENTIFIER, IDENTIFIERS};
pub use features::{FeatureTable, LabelSeries, LabelledFeatures};
pub use projection::Projection;
pub use scheme::VisualizeScheme;

use crate::error::VisualizeError;
use crate::features::FeatureTable;

/// Dimensionality reduction supplied by the caller.
///
/// Implementations reduce the number of columns while preserving the row
/// index, so projected rows stay addressable by the original identifiers.
pub trait Projection {
    fn project(&self, table: &FeatureTable) -> Result<FeatureTable, VisualizeError>;
}

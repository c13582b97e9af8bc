use crate::error::VisualizeError;
use crate::features::LabelledFeatures;

/// A strategy for visualizing labelled features.
///
/// Each call consumes the full feature table plus the optional label series
/// and produces a side effect only: a plot image or a set of export files.
/// Implementations hold configuration fixed at construction and no mutable
/// state between invocations.
pub trait VisualizeScheme {
    fn visualize(&self, features: &LabelledFeatures) -> Result<(), VisualizeError>;
}

use std::collections::HashSet;

use crate::error::VisualizeError;

/// A table of numeric feature vectors indexed by identifier.
///
/// Rows and identifiers are parallel: `rows[i]` is the feature vector for
/// `identifiers[i]`. The table is immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    identifiers: Vec<String>,
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FeatureTable {
    /// Build a table, validating that every identifier has exactly one row,
    /// every row has one value per column, and identifiers are unique.
    pub fn new(
        identifiers: Vec<String>,
        columns: Vec<String>,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self, VisualizeError> {
        if identifiers.len() != rows.len() {
            return Err(VisualizeError::DataShape(format!(
                "{} identifiers but {} rows",
                identifiers.len(),
                rows.len()
            )));
        }

        for (id, row) in identifiers.iter().zip(&rows) {
            if row.len() != columns.len() {
                return Err(VisualizeError::DataShape(format!(
                    "row '{}' has {} values but the table has {} columns",
                    id,
                    row.len(),
                    columns.len()
                )));
            }
        }

        let mut seen = HashSet::new();
        for id in &identifiers {
            if !seen.insert(id.as_str()) {
                return Err(VisualizeError::DataShape(format!(
                    "duplicate identifier '{}'",
                    id
                )));
            }
        }

        Ok(Self {
            identifiers,
            columns,
            rows,
        })
    }

    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.identifiers.iter().any(|id| id == identifier)
    }
}

/// Labels paired with identifiers, preserving input order.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSeries {
    identifiers: Vec<String>,
    values: Vec<String>,
}

impl LabelSeries {
    pub fn new(identifiers: Vec<String>, values: Vec<String>) -> Result<Self, VisualizeError> {
        if identifiers.len() != values.len() {
            return Err(VisualizeError::DataShape(format!(
                "{} label identifiers but {} label values",
                identifiers.len(),
                values.len()
            )));
        }

        Ok(Self {
            identifiers,
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Iterate (identifier, label) pairs in series order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.identifiers
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    pub fn label_for(&self, identifier: &str) -> Option<&str> {
        self.identifiers
            .iter()
            .position(|id| id == identifier)
            .map(|i| self.values[i].as_str())
    }
}

/// A feature table paired with an optional label series.
///
/// Invariant: every label identifier must be present in the feature table
/// index. Enforced strictly at construction rather than silently aligned.
#[derive(Debug, Clone)]
pub struct LabelledFeatures {
    features: FeatureTable,
    labels: Option<LabelSeries>,
}

impl LabelledFeatures {
    pub fn new(
        features: FeatureTable,
        labels: Option<LabelSeries>,
    ) -> Result<Self, VisualizeError> {
        if let Some(series) = &labels {
            for (id, _) in series.iter() {
                if !features.contains(id) {
                    return Err(VisualizeError::DataShape(format!(
                        "label identifier '{}' is not in the feature table",
                        id
                    )));
                }
            }
        }

        Ok(Self { features, labels })
    }

    /// Convenience constructor for a table without labels.
    pub fn unlabelled(features: FeatureTable) -> Self {
        Self {
            features,
            labels: None,
        }
    }

    pub fn features(&self) -> &FeatureTable {
        &self.features
    }

    pub fn labels(&self) -> Option<&LabelSeries> {
        self.labels.as_ref()
    }
}

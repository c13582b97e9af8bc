use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::VisualizeError;
use crate::features::{FeatureTable, LabelledFeatures};
use crate::projection::Projection;
use crate::scheme::VisualizeScheme;

/// Variable name the downstream projector tool looks up in the checkpoint.
pub const EMBEDDING_TENSOR_NAME: &str = "embedding/.ATTRIBUTES/VARIABLE_VALUE";

/// File names resolved inside the output directory.
pub const METADATA_FILE: &str = "metadata.tsv";
pub const CHECKPOINT_FILE: &str = "features.ckpt";
pub const CONFIG_FILE: &str = "projector_config.pbtxt";

/// A checkpointed embedding tensor: named, shaped, row-major values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensorCheckpoint {
    pub tensor_name: String,
    /// [rows, cols]
    pub shape: Vec<usize>,
    pub values: Vec<f64>,
}

impl TensorCheckpoint {
    pub fn from_table(tensor_name: &str, table: &FeatureTable) -> Self {
        Self {
            tensor_name: tensor_name.to_string(),
            shape: vec![table.num_rows(), table.num_columns()],
            values: table.rows().iter().flatten().copied().collect(),
        }
    }

    /// Save the checkpoint to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), VisualizeError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Load a checkpoint from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, VisualizeError> {
        let json = fs::read_to_string(path.as_ref())?;
        let checkpoint = serde_json::from_str(&json)?;
        Ok(checkpoint)
    }
}

/// Exports features (and labels) in a layout an external embedding
/// visualization tool can load: a metadata file, a checkpointed embedding
/// tensor, and a projector configuration pointing at both.
pub struct EmbeddingExportScheme {
    projection: Option<Box<dyn Projection>>,
    output_path: PathBuf,
}

impl EmbeddingExportScheme {
    /// The projection is optional (raw features export fine); the output path
    /// is not. The directory is created here, parents included, and reused if
    /// it already exists.
    pub fn new(
        projection: Option<Box<dyn Projection>>,
        output_path: Option<PathBuf>,
    ) -> Result<Self, VisualizeError> {
        let output_path = output_path.ok_or_else(|| {
            VisualizeError::Configuration(
                "an output path is required for the embedding-export scheme".to_string(),
            )
        })?;

        fs::create_dir_all(&output_path)?;

        Ok(Self {
            projection,
            output_path,
        })
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn resolved_path(&self, file_name: &str) -> PathBuf {
        self.output_path.join(file_name)
    }

    fn maybe_project(&self, table: &FeatureTable) -> Result<FeatureTable, VisualizeError> {
        match &self.projection {
            Some(projection) => projection.project(table),
            None => Ok(table.clone()),
        }
    }
}

impl VisualizeScheme for EmbeddingExportScheme {
    fn visualize(&self, features: &LabelledFeatures) -> Result<(), VisualizeError> {
        println!(
            "📤 Exporting embedding artifacts to: {}",
            self.output_path.display()
        );

        let path_metadata = self.resolved_path(METADATA_FILE);
        let path_checkpoint = self.resolved_path(CHECKPOINT_FILE);
        let path_config = self.resolved_path(CONFIG_FILE);

        // Metadata and checkpoint go first: an interrupted run must never
        // leave a config pointing at files that were not written.
        write_metadata(features, &path_metadata)?;

        let embedding = self.maybe_project(features.features())?;
        TensorCheckpoint::from_table(EMBEDDING_TENSOR_NAME, &embedding).save(&path_checkpoint)?;

        write_projector_config(&path_config)?;

        println!("💾 Embedding checkpoint saved to: {}", path_checkpoint.display());
        Ok(())
    }
}

/// Writes one tab-separated line per identifier, header included.
///
/// With labels the columns are `Identifier` and `Label`, in label-series
/// order. Without labels only the `Identifier` column is written, in feature
/// table order.
fn write_metadata(features: &LabelledFeatures, path: &Path) -> Result<(), VisualizeError> {
    let mut contents = String::new();

    match features.labels() {
        Some(series) => {
            contents.push_str("Identifier\tLabel\n");
            for (id, label) in series.iter() {
                contents.push_str(id);
                contents.push('\t');
                contents.push_str(label);
                contents.push('\n');
            }
        }
        None => {
            contents.push_str("Identifier\n");
            for id in features.features().identifiers() {
                contents.push_str(id);
                contents.push('\n');
            }
        }
    }

    fs::write(path, contents)?;
    Ok(())
}

/// Writes the projector configuration the downstream tool reads, declaring
/// the tensor name and the metadata file relative to the output directory.
fn write_projector_config(path: &Path) -> Result<(), VisualizeError> {
    let contents = format!(
        "embeddings {{\n  tensor_name: \"{}\"\n  metadata_path: \"{}\"\n}}\n",
        EMBEDDING_TENSOR_NAME, METADATA_FILE
    );
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::LabelSeries;
    use tempfile::TempDir;

    /// Projection test double keeping the first two columns.
    struct TwoDimProjection;

    impl Projection for TwoDimProjection {
        fn project(&self, table: &FeatureTable) -> Result<FeatureTable, VisualizeError> {
            let rows = table.rows().iter().map(|row| row[..2].to_vec()).collect();
            FeatureTable::new(
                table.identifiers().to_vec(),
                vec!["dim0".into(), "dim1".into()],
                rows,
            )
        }
    }

    fn labelled_abc() -> LabelledFeatures {
        let table = FeatureTable::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec!["f0".into(), "f1".into()],
            vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
        )
        .unwrap();
        let labels = LabelSeries::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec!["x".into(), "y".into(), "x".into()],
        )
        .unwrap();
        LabelledFeatures::new(table, Some(labels)).unwrap()
    }

    #[test]
    fn test_missing_output_path_is_configuration_error() {
        let result = EmbeddingExportScheme::new(None, None);
        assert!(matches!(result, Err(VisualizeError::Configuration(_))));
    }

    #[test]
    fn test_output_directory_created_and_reusable() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("logs").join("run1");

        let scheme = EmbeddingExportScheme::new(None, Some(output.clone())).unwrap();
        assert!(output.is_dir());

        // Same path a second time must not fail
        let again = EmbeddingExportScheme::new(None, Some(output.clone()));
        assert!(again.is_ok());

        scheme.visualize(&labelled_abc()).unwrap();
        scheme.visualize(&labelled_abc()).unwrap();
    }

    #[test]
    fn test_metadata_file_preserves_order_and_format() {
        let temp_dir = TempDir::new().unwrap();
        let scheme =
            EmbeddingExportScheme::new(None, Some(temp_dir.path().to_path_buf())).unwrap();

        scheme.visualize(&labelled_abc()).unwrap();

        let contents = fs::read_to_string(temp_dir.path().join(METADATA_FILE)).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Identifier\tLabel");
        assert_eq!(lines[1], "a\tx");
        assert_eq!(lines[2], "b\ty");
        assert_eq!(lines[3], "c\tx");
    }

    #[test]
    fn test_metadata_without_labels_has_identifier_column_only() {
        let temp_dir = TempDir::new().unwrap();
        let scheme =
            EmbeddingExportScheme::new(None, Some(temp_dir.path().to_path_buf())).unwrap();

        let table = labelled_abc().features().clone();
        scheme
            .visualize(&LabelledFeatures::unlabelled(table))
            .unwrap();

        let contents = fs::read_to_string(temp_dir.path().join(METADATA_FILE)).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec!["Identifier", "a", "b", "c"]);
    }

    #[test]
    fn test_metadata_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let scheme =
            EmbeddingExportScheme::new(None, Some(temp_dir.path().to_path_buf())).unwrap();

        scheme.visualize(&labelled_abc()).unwrap();

        let contents = fs::read_to_string(temp_dir.path().join(METADATA_FILE)).unwrap();
        let mapping: Vec<(String, String)> = contents
            .lines()
            .skip(1)
            .map(|line| {
                let (id, label) = line.split_once('\t').unwrap();
                (id.to_string(), label.to_string())
            })
            .collect();

        assert_eq!(
            mapping,
            vec![
                ("a".to_string(), "x".to_string()),
                ("b".to_string(), "y".to_string()),
                ("c".to_string(), "x".to_string())
            ]
        );
    }

    #[test]
    fn test_checkpoint_shape_after_projection() {
        let temp_dir = TempDir::new().unwrap();
        let scheme = EmbeddingExportScheme::new(
            Some(Box::new(TwoDimProjection)),
            Some(temp_dir.path().to_path_buf()),
        )
        .unwrap();

        let table = FeatureTable::new(
            (0..5).map(|i| format!("id{}", i)).collect(),
            vec!["f0".into(), "f1".into(), "f2".into(), "f3".into()],
            (0..5)
                .map(|i| vec![i as f64, i as f64 + 0.5, 0.0, 0.0])
                .collect(),
        )
        .unwrap();
        scheme
            .visualize(&LabelledFeatures::unlabelled(table))
            .unwrap();

        let checkpoint = TensorCheckpoint::load(temp_dir.path().join(CHECKPOINT_FILE)).unwrap();
        assert_eq!(checkpoint.shape, vec![5, 2]);
        assert_eq!(checkpoint.values.len(), 10);
        assert_eq!(checkpoint.tensor_name, EMBEDDING_TENSOR_NAME);
    }

    #[test]
    fn test_checkpoint_uses_raw_table_without_projection() {
        let temp_dir = TempDir::new().unwrap();
        let scheme =
            EmbeddingExportScheme::new(None, Some(temp_dir.path().to_path_buf())).unwrap();

        scheme.visualize(&labelled_abc()).unwrap();

        let checkpoint = TensorCheckpoint::load(temp_dir.path().join(CHECKPOINT_FILE)).unwrap();
        assert_eq!(checkpoint.shape, vec![3, 2]);
        assert_eq!(checkpoint.values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_checkpoint_save_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("roundtrip.ckpt");

        let original = TensorCheckpoint {
            tensor_name: EMBEDDING_TENSOR_NAME.to_string(),
            shape: vec![2, 2],
            values: vec![0.1, 0.2, 0.3, 0.4],
        };
        original.save(&path).unwrap();
        let loaded = TensorCheckpoint::load(&path).unwrap();

        assert_eq!(loaded, original);
    }

    #[test]
    fn test_projector_config_references_tensor_and_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let scheme =
            EmbeddingExportScheme::new(None, Some(temp_dir.path().to_path_buf())).unwrap();

        scheme.visualize(&labelled_abc()).unwrap();

        let contents = fs::read_to_string(temp_dir.path().join(CONFIG_FILE)).unwrap();
        assert!(contents.contains(&format!("tensor_name: \"{}\"", EMBEDDING_TENSOR_NAME)));
        assert!(contents.contains(&format!("metadata_path: \"{}\"", METADATA_FILE)));
    }
}

use plotters::prelude::*;
use std::path::PathBuf;

use crate::error::VisualizeError;
use crate::features::LabelledFeatures;
use crate::projection::Projection;
use crate::scheme::VisualizeScheme;

/// A single point of a prepared scatter figure.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub identifier: String,
    pub x: f64,
    pub y: f64,
    pub label: Option<String>,
}

/// A fully prepared 2D scatter figure, ready for a rendering backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterFigure {
    pub x_axis: String,
    pub y_axis: String,
    pub points: Vec<ScatterPoint>,
}

impl ScatterFigure {
    /// Distinct labels in order of first appearance.
    pub fn distinct_labels(&self) -> Vec<&str> {
        let mut labels = Vec::new();
        for point in &self.points {
            if let Some(label) = point.label.as_deref() {
                if !labels.contains(&label) {
                    labels.push(label);
                }
            }
        }
        labels
    }
}

/// Rendering backend for scatter figures.
///
/// Kept narrow so column selection and label attachment can be tested
/// without a drawing backend.
pub trait ScatterRenderer {
    fn render(&self, figure: &ScatterFigure) -> Result<(), VisualizeError>;
}

/// Projects the feature space onto two dimensions and renders a scatter plot.
pub struct ScatterPlotScheme {
    projection: Box<dyn Projection>,
    renderer: Box<dyn ScatterRenderer>,
}

impl ScatterPlotScheme {
    /// A projection is mandatory: raw feature spaces are assumed to have more
    /// than two dimensions, so a missing projection is a configuration error
    /// caught here rather than at call time.
    pub fn new(
        projection: Option<Box<dyn Projection>>,
        renderer: Box<dyn ScatterRenderer>,
    ) -> Result<Self, VisualizeError> {
        let projection = projection.ok_or_else(|| {
            VisualizeError::Configuration(
                "a projection is required for the scatter-plot scheme".to_string(),
            )
        })?;

        Ok(Self {
            projection,
            renderer,
        })
    }

    fn build_figure(&self, features: &LabelledFeatures) -> Result<ScatterFigure, VisualizeError> {
        let projected = self.projection.project(features.features())?;

        if projected.num_columns() < 2 {
            return Err(VisualizeError::DataShape(format!(
                "projection must yield at least 2 dimensions, got {}",
                projected.num_columns()
            )));
        }

        let points = projected
            .identifiers()
            .iter()
            .zip(projected.rows())
            .map(|(id, row)| ScatterPoint {
                identifier: id.clone(),
                x: row[0],
                y: row[1],
                label: features
                    .labels()
                    .and_then(|series| series.label_for(id))
                    .map(str::to_string),
            })
            .collect();

        Ok(ScatterFigure {
            x_axis: projected.columns()[0].clone(),
            y_axis: projected.columns()[1].clone(),
            points,
        })
    }
}

impl VisualizeScheme for ScatterPlotScheme {
    fn visualize(&self, features: &LabelledFeatures) -> Result<(), VisualizeError> {
        let figure = self.build_figure(features)?;
        self.renderer.render(&figure)
    }
}

/// Renders scatter figures as PNG images via plotters.
///
/// Identifiers are drawn beside each point and points are colored per label,
/// with a legend mapping colors back to labels.
pub struct PlottersRenderer {
    output_path: PathBuf,
    width: u32,
    height: u32,
}

impl PlottersRenderer {
    pub fn new(output_path: PathBuf) -> Self {
        Self {
            output_path,
            width: 1200,
            height: 800,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

fn axis_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }

    // Pad so border points stay visible
    let pad = ((max - min) * 0.05).max(1e-6);
    (min - pad, max + pad)
}

impl ScatterRenderer for PlottersRenderer {
    fn render(&self, figure: &ScatterFigure) -> Result<(), VisualizeError> {
        let root = BitMapBackend::new(&self.output_path, (self.width, self.height))
            .into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| VisualizeError::Render(e.to_string()))?;

        let (x_min, x_max) = axis_range(figure.points.iter().map(|p| p.x));
        let (y_min, y_max) = axis_range(figure.points.iter().map(|p| p.y));

        let mut chart = ChartBuilder::on(&root)
            .caption("Feature Projection", ("sans-serif", 40).into_font())
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| VisualizeError::Render(e.to_string()))?;

        chart
            .configure_mesh()
            .x_desc(figure.x_axis.as_str())
            .y_desc(figure.y_axis.as_str())
            .draw()
            .map_err(|e| VisualizeError::Render(e.to_string()))?;

        let labels = figure.distinct_labels();

        if labels.is_empty() {
            chart
                .draw_series(
                    figure
                        .points
                        .iter()
                        .map(|p| Circle::new((p.x, p.y), 4, BLUE.filled())),
                )
                .map_err(|e| VisualizeError::Render(e.to_string()))?;
        } else {
            let colors = [&BLUE, &RED, &GREEN, &MAGENTA, &CYAN, &YELLOW];

            for (idx, label) in labels.iter().enumerate() {
                let color = colors[idx % colors.len()];
                chart
                    .draw_series(
                        figure
                            .points
                            .iter()
                            .filter(|p| p.label.as_deref() == Some(*label))
                            .map(|p| Circle::new((p.x, p.y), 4, color.filled())),
                    )
                    .map_err(|e| VisualizeError::Render(e.to_string()))?
                    .label(*label)
                    .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
            }

            // Points without a label stay uncolored
            chart
                .draw_series(
                    figure
                        .points
                        .iter()
                        .filter(|p| p.label.is_none())
                        .map(|p| Circle::new((p.x, p.y), 4, BLACK.filled())),
                )
                .map_err(|e| VisualizeError::Render(e.to_string()))?;

            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(|e| VisualizeError::Render(e.to_string()))?;
        }

        // Identifier annotations next to each point
        chart
            .draw_series(figure.points.iter().map(|p| {
                Text::new(
                    p.identifier.clone(),
                    (p.x, p.y),
                    ("sans-serif", 14).into_font().color(&BLACK.mix(0.7)),
                )
            }))
            .map_err(|e| VisualizeError::Render(e.to_string()))?;

        root.present()
            .map_err(|e| VisualizeError::Render(e.to_string()))?;
        println!("📊 Scatter plot saved to: {}", self.output_path.display());
        Ok(())
    }
}

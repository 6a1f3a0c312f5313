//! Chart descriptions and the backends that turn them into images
//!
//! Exporters build a [`LineChart`] or [`Heatmap`] and hand it to a
//! [`Renderer`] together with the destination path. [`PngRenderer`] draws
//! with `plotters`; tests can swap in their own renderer.

pub mod png;

use std::path::Path;

use ndarray::Array2;

use crate::error::Result;

pub use png::PngRenderer;

/// Corner of the plotting area holding the legend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

/// One named polyline
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: Option<String>,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { label: None, points }
    }

    pub fn labeled<S: Into<String>>(label: S, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: Some(label.into()),
            points,
        }
    }

    /// Points `(index, value)` for a per-epoch sequence
    pub fn from_values<S: Into<String>>(label: S, values: &[f32]) -> Self {
        let points = values.iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v as f64))
            .collect();
        Self::labeled(label, points)
    }
}

/// A 2-D line plot
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    pub legend: LegendPosition,
    /// Fixed axis ranges; fitted to the data when `None`
    pub x_range: Option<(f64, f64)>,
    pub y_range: Option<(f64, f64)>,
}

impl LineChart {
    pub fn new<S: Into<String>>(title: S, x_label: S, y_label: S) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            series: Vec::new(),
            legend: LegendPosition::UpperLeft,
            x_range: None,
            y_range: None,
        }
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_legend(mut self, legend: LegendPosition) -> Self {
        self.legend = legend;
        self
    }

    /// Pin both axes to the unit square
    pub fn unit_square(mut self) -> Self {
        self.x_range = Some((0.0, 1.0));
        self.y_range = Some((0.0, 1.0));
        self
    }

    /// Axis ranges to draw, widened when the data is flat
    pub fn bounds(&self) -> ((f64, f64), (f64, f64)) {
        let points = self.series.iter().flat_map(|s| s.points.iter());
        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for &(x, y) in points.filter(|(x, y)| x.is_finite() && y.is_finite()) {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }

        let x = self.x_range.unwrap_or_else(|| padded(x_min, x_max, 0.0));
        let y = self.y_range.unwrap_or_else(|| padded(y_min, y_max, 0.05));
        (x, y)
    }
}

fn padded(min: f64, max: f64, margin: f64) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let span = max - min;
    if span.abs() < f64::EPSILON {
        let half = if min.abs() > f64::EPSILON { min.abs() * 0.1 } else { 0.5 };
        return (min - half, max + half);
    }
    (min - span * margin, max + span * margin)
}

/// A matrix drawn as coloured cells on a fixed scale
#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Column names, left to right
    pub x_ticks: Vec<String>,
    /// Row names, top to bottom
    pub y_ticks: Vec<String>,
    pub values: Array2<f64>,
    pub v_min: f64,
    pub v_max: f64,
}

/// Backend writing chart descriptions to image files
pub trait Renderer {
    fn line_chart(&self, chart: &LineChart, path: &Path) -> Result<()>;

    fn heatmap(&self, heatmap: &Heatmap, path: &Path) -> Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    fn line_chart(&self, chart: &LineChart, path: &Path) -> Result<()> {
        (**self).line_chart(chart, path)
    }

    fn heatmap(&self, heatmap: &Heatmap, path: &Path) -> Result<()> {
        (**self).heatmap(heatmap, path)
    }
}

/// Title-case a metric name: the first letter of every alphabetic run is
/// upper-cased, all other letters lower-cased
///
/// ```
/// assert_eq!(argus::render::title_case("binary_accuracy"), "Binary_Accuracy");
/// assert_eq!(argus::render::title_case("AUC"), "Auc");
/// ```
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_alpha = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

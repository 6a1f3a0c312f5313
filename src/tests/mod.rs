pub mod test_metrics;
pub mod test_trainer;

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use ndarray::{Array1, ArrayView2};

use crate::error::Result;
use crate::model::Predictor;
use crate::render::{Heatmap, LineChart, Renderer};

/// Renderer that keeps every chart it receives and writes a stub file
#[derive(Default)]
pub struct RecordingRenderer {
    pub lines: RefCell<Vec<(PathBuf, LineChart)>>,
    pub heatmaps: RefCell<Vec<(PathBuf, Heatmap)>>,
}

impl Renderer for RecordingRenderer {
    fn line_chart(&self, chart: &LineChart, path: &Path) -> Result<()> {
        std::fs::write(path, b"line")?;
        self.lines.borrow_mut().push((path.to_path_buf(), chart.clone()));
        Ok(())
    }

    fn heatmap(&self, heatmap: &Heatmap, path: &Path) -> Result<()> {
        std::fs::write(path, b"heatmap")?;
        self.heatmaps.borrow_mut().push((path.to_path_buf(), heatmap.clone()));
        Ok(())
    }
}

/// Predictor returning the first input column as the score
pub struct FirstColumn;

impl Predictor for FirstColumn {
    fn predict(&self, inputs: ArrayView2<f32>) -> Result<Array1<f32>> {
        Ok(inputs.column(0).to_owned())
    }
}

/// Sorted file names inside `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

//! Training vs. validation curves for every logged metric

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::callbacks::{ensure_dir, fires, Callback, EpochContext};
use crate::config::PlotConfig;
use crate::error::Result;
use crate::history::TrainingHistory;
use crate::render::{title_case, LegendPosition, LineChart, PngRenderer, Renderer, Series};

/// Every `period` epochs, replaces all PNG files in the output directory
/// with one `<Metric>.png` line chart per training metric
pub struct MetricPlotter<R = PngRenderer> {
    config: PlotConfig,
    renderer: R,
}

impl MetricPlotter<PngRenderer> {
    pub fn new(config: PlotConfig) -> Result<Self> {
        let renderer = PngRenderer::from_config(&config);
        Self::with_renderer(config, renderer)
    }
}

impl<R: Renderer> MetricPlotter<R> {
    pub fn with_renderer(config: PlotConfig, renderer: R) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, renderer })
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// Build the chart for one metric; fails if its validation series is missing
    pub fn chart(&self, history: &TrainingHistory, metric: &str) -> Result<LineChart> {
        let (train, val) = history.paired(metric)?;
        let title = title_case(metric);

        Ok(LineChart::new(format!("Model {}", title), "Epochs".to_string(), title)
            .with_series(Series::from_values("Training", train))
            .with_series(Series::from_values("Validation", val))
            .with_legend(LegendPosition::UpperLeft))
    }

    /// Clear old images and render every training metric now
    ///
    /// Returns the paths written, in metric name order.
    pub fn export(&self, history: &TrainingHistory) -> Result<Vec<PathBuf>> {
        let dir = self.config.output_dir.as_path();
        ensure_dir(dir)?;
        let removed = clear_png_files(dir)?;
        debug!(dir = %dir.display(), removed, "cleared previous plots");

        let mut written = Vec::new();
        for metric in history.training_metrics() {
            let chart = self.chart(history, metric)?;
            let path = dir.join(format!("{}.png", title_case(metric)));
            self.renderer.line_chart(&chart, &path)?;
            debug!(path = %path.display(), "saved metric plot");
            written.push(path);
        }

        info!(count = written.len(), dir = %dir.display(), "exported metric plots");
        Ok(written)
    }
}

impl<R: Renderer> Callback for MetricPlotter<R> {
    fn name(&self) -> &str {
        "metric_plotter"
    }

    fn on_epoch_end(&mut self, ctx: &EpochContext<'_>) -> Result<()> {
        if fires(ctx.epoch, self.config.period) {
            self.export(ctx.history)?;
        }
        Ok(())
    }
}

/// Delete every `*.png` file directly inside `dir`, returning how many were removed
fn clear_png_files(dir: &Path) -> Result<usize> {
    let mut removed = 0;
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_png = path.extension().map_or(false, |ext| ext == "png");
        if is_png && path.is_file() {
            std::fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}

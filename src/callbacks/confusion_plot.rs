use std::path::PathBuf;

use tracing::{debug, info};

use crate::callbacks::{collect_predictions, ensure_dir, fires, Callback, EpochContext};
use crate::config::PlotConfig;
use crate::data::{Dataset, Split};
use crate::error::Result;
use crate::metrics::ConfusionMatrix;
use crate::model::Predictor;
use crate::render::{Heatmap, PngRenderer, Renderer};

/// Every `period` epochs, renders `<Split> Confusion Matrix.png` for the
/// train and validation splits
pub struct ConfusionMatrixPlotter<D, R = PngRenderer> {
    config: PlotConfig,
    train: D,
    val: D,
    renderer: R,
}

impl<D: Dataset> ConfusionMatrixPlotter<D, PngRenderer> {
    pub fn new(config: PlotConfig, train: D, val: D) -> Result<Self> {
        let renderer = PngRenderer::from_config(&config);
        Self::with_renderer(config, train, val, renderer)
    }
}

impl<D: Dataset, R: Renderer> ConfusionMatrixPlotter<D, R> {
    pub fn with_renderer(config: PlotConfig, train: D, val: D, renderer: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            train,
            val,
            renderer,
        })
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    fn dataset(&self, split: Split) -> &D {
        match split {
            Split::Train => &self.train,
            Split::Val => &self.val,
        }
    }

    /// Confusion matrix of `model` on one split at the configured threshold
    pub fn compute(&self, model: &dyn Predictor, split: Split) -> Result<ConfusionMatrix> {
        let (labels, scores) = collect_predictions(model, self.dataset(split))?;
        ConfusionMatrix::from_scores(scores.view(), labels.view(), self.config.threshold)
    }

    /// Heat map description for a computed matrix
    pub fn heatmap(&self, matrix: &ConfusionMatrix, split: Split) -> Heatmap {
        let [negative, positive] = &self.config.class_names;
        let [negative_acc, positive_acc] = matrix.class_accuracy_percent();

        Heatmap {
            title: format!(
                "{} - {} Acc: {}% - {} Acc: {}%",
                split, negative, negative_acc, positive, positive_acc
            ),
            x_label: "Prediction".to_string(),
            y_label: "Ground Truth".to_string(),
            x_ticks: self.config.class_names.to_vec(),
            y_ticks: self.config.class_names.to_vec(),
            values: matrix.normalized(),
            v_min: 0.0,
            v_max: 1.0,
        }
    }

    /// Render both splits now
    pub fn export(&self, model: &dyn Predictor) -> Result<Vec<PathBuf>> {
        let dir = self.config.output_dir.as_path();
        let mut written = Vec::new();

        for split in Split::ALL {
            let matrix = self.compute(model, split)?;
            debug!(%split, counts = ?matrix.counts(), "computed confusion matrix");

            ensure_dir(dir)?;
            let path = dir.join(format!("{} Confusion Matrix.png", split));
            self.renderer.heatmap(&self.heatmap(&matrix, split), &path)?;
            debug!(path = %path.display(), "saved confusion matrix");
            written.push(path);
        }

        info!(count = written.len(), dir = %dir.display(), "exported confusion matrices");
        Ok(written)
    }
}

impl<D: Dataset, R: Renderer> Callback for ConfusionMatrixPlotter<D, R> {
    fn name(&self) -> &str {
        "confusion_matrix_plotter"
    }

    fn on_epoch_end(&mut self, ctx: &EpochContext<'_>) -> Result<()> {
        if fires(ctx.epoch, self.config.period) {
            self.export(ctx.model)?;
        }
        Ok(())
    }
}

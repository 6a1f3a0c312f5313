use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::callbacks::{collect_predictions, ensure_dir, fires, Callback, EpochContext};
use crate::config::PlotConfig;
use crate::data::{Dataset, Split};
use crate::error::{Result, VizError};
use crate::metrics::{precision_recall_curve, roc_curve, PrecisionRecallCurve, RocCurve};
use crate::model::Predictor;
use crate::render::{LegendPosition, LineChart, PngRenderer, Renderer, Series};

pub const ROC_CURVE: &str = "Roc Curve";
pub const PR_CURVE: &str = "Precision-Recall Curve";

/// ROC and precision-recall curves of one split
#[derive(Debug, Clone, PartialEq)]
pub struct SplitCurves {
    pub roc: RocCurve,
    pub pr: PrecisionRecallCurve,
}

/// Every `period` epochs, renders `Roc Curve <Split>.png` and
/// `Precision-Recall Curve <Split>.png` for the train and validation splits
///
/// A split containing a single class is skipped with a warning.
pub struct CurvePlotter<D, R = PngRenderer> {
    config: PlotConfig,
    train: D,
    val: D,
    renderer: R,
}

impl<D: Dataset> CurvePlotter<D, PngRenderer> {
    pub fn new(config: PlotConfig, train: D, val: D) -> Result<Self> {
        let renderer = PngRenderer::from_config(&config);
        Self::with_renderer(config, train, val, renderer)
    }
}

impl<D: Dataset, R: Renderer> CurvePlotter<D, R> {
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

    pub fn compute(&self, model: &dyn Predictor, split: Split) -> Result<SplitCurves> {
        let (labels, scores) = collect_predictions(model, self.dataset(split))?;
        Ok(SplitCurves {
            roc: roc_curve(scores.view(), labels.view())?,
            pr: precision_recall_curve(scores.view(), labels.view())?,
        })
    }

    pub fn roc_chart(&self, roc: &RocCurve, split: Split) -> LineChart {
        let legend = format!("Area Under the Curve : {:.3}", roc.auc());
        LineChart::new(
            format!("{} {}", split, ROC_CURVE),
            "False Positive Rate".to_string(),
            "True Positive Rate".to_string(),
        )
        .with_series(Series::labeled(legend, roc.points()))
        .with_legend(LegendPosition::LowerRight)
        .unit_square()
    }

    pub fn pr_chart(&self, pr: &PrecisionRecallCurve, split: Split) -> LineChart {
        let legend = format!("Average Precision : {:.3}", pr.average_precision());
        LineChart::new(
            format!("{} {}", split, PR_CURVE),
            "Recall".to_string(),
            "Precision".to_string(),
        )
        .with_series(Series::labeled(legend, pr.points()))
        .with_legend(LegendPosition::LowerLeft)
        .unit_square()
    }

    /// Render both curves for both splits now
    pub fn export(&self, model: &dyn Predictor) -> Result<Vec<PathBuf>> {
        let dir = self.config.output_dir.as_path();
        let mut written = Vec::new();

        for split in Split::ALL {
            let curves = match self.compute(model, split) {
                Ok(curves) => curves,
                Err(VizError::DegenerateLabels(reason)) => {
                    warn!(%split, %reason, "skipping ROC/PR curves");
                    continue;
                }
                Err(e) => return Err(e),
            };
            debug!(%split, auc = curves.roc.auc(), "computed curves");

            ensure_dir(dir)?;
            let charts = [
                (ROC_CURVE, self.roc_chart(&curves.roc, split)),
                (PR_CURVE, self.pr_chart(&curves.pr, split)),
            ];
            for (curve_name, chart) in charts {
                let path = dir.join(format!("{} {}.png", curve_name, split));
                self.renderer.line_chart(&chart, &path)?;
                debug!(path = %path.display(), "saved curve plot");
                written.push(path);
            }
        }

        info!(count = written.len(), dir = %dir.display(), "exported ROC/PR curves");
        Ok(written)
    }
}

impl<D: Dataset, R: Renderer> Callback for CurvePlotter<D, R> {
    fn name(&self) -> &str {
        "curve_plotter"
    }

    fn on_epoch_end(&mut self, ctx: &EpochContext<'_>) -> Result<()> {
        if fires(ctx.epoch, self.config.period) {
            self.export(ctx.model)?;
        }
        Ok(())
    }
}

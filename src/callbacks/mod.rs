//! Epoch-end hooks
//!
//! A training loop calls [`Callback::on_epoch_end`] after every epoch. The
//! plot exporters in this module only act on epochs selected by [`fires`].

pub mod confusion_plot;
pub mod curve_plot;
pub mod metric_plot;

use std::path::Path;

use ndarray::Array1;
use tracing::debug;

use crate::data::Dataset;
use crate::error::{Result, VizError};
use crate::history::TrainingHistory;
use crate::model::Predictor;

pub use confusion_plot::ConfusionMatrixPlotter;
pub use curve_plot::CurvePlotter;
pub use metric_plot::MetricPlotter;

/// Whether a hook with the given period acts at the end of `epoch`
///
/// `epoch` is the zero-based index of the epoch that just finished. Epoch 0
/// never fires.
///
/// ```
/// use argus::callbacks::fires;
///
/// assert!(!fires(0, 2));
/// assert!(!fires(1, 2));
/// assert!(fires(2, 2));
/// ```
pub fn fires(epoch: usize, period: usize) -> bool {
    period != 0 && epoch != 0 && epoch % period == 0
}

/// What a hook sees at the end of an epoch
pub struct EpochContext<'a> {
    pub epoch: usize,
    pub history: &'a TrainingHistory,
    pub model: &'a dyn Predictor,
}

impl<'a> EpochContext<'a> {
    pub fn new(epoch: usize, history: &'a TrainingHistory, model: &'a dyn Predictor) -> Self {
        Self { epoch, history, model }
    }
}

/// Trait for epoch-end hooks
pub trait Callback {
    fn name(&self) -> &str;

    /// Called at the end of each epoch; errors abort the training loop
    fn on_epoch_end(&mut self, ctx: &EpochContext<'_>) -> Result<()>;
}

/// Ordered collection of callbacks
#[derive(Default)]
pub struct CallbackList<'a> {
    callbacks: Vec<Box<dyn Callback + 'a>>,
}

impl<'a> CallbackList<'a> {
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    pub fn push<C: Callback + 'a>(&mut self, callback: C) {
        self.callbacks.push(Box::new(callback));
    }

    pub fn with<C: Callback + 'a>(mut self, callback: C) -> Self {
        self.push(callback);
        self
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Run every callback in registration order, stopping at the first error
    pub fn on_epoch_end(&mut self, ctx: &EpochContext<'_>) -> Result<()> {
        for callback in self.callbacks.iter_mut() {
            debug!(callback = callback.name(), epoch = ctx.epoch, "running callback");
            callback.on_epoch_end(ctx)?;
        }
        Ok(())
    }
}

/// Labels and raw scores for every sample of a split, in iteration order
pub fn collect_predictions<D: Dataset + ?Sized>(
    model: &dyn Predictor,
    dataset: &D,
) -> Result<(Array1<f32>, Array1<f32>)> {
    let mut labels = Vec::new();
    let mut scores = Vec::new();

    for (inputs, batch_labels) in dataset.batches() {
        let predictions = model.predict(inputs)?;
        if predictions.len() != batch_labels.len() {
            return Err(VizError::dimension_mismatch(
                format!("{} predictions", batch_labels.len()),
                format!("{} predictions", predictions.len()),
            ));
        }
        labels.extend(batch_labels.iter().copied());
        scores.extend(predictions.iter().copied());
    }

    if labels.is_empty() {
        return Err(VizError::EmptySplit("dataset yielded no samples".to_string()));
    }

    Ok((Array1::from_vec(labels), Array1::from_vec(scores)))
}

/// Create the output directory if it does not exist yet
pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        debug!(dir = %dir.display(), "creating output directory");
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

//! Minimal epoch loop driving epoch-end callbacks

use tracing::info;

use crate::callbacks::{collect_predictions, Callback, CallbackList, EpochContext};
use crate::data::Dataset;
use crate::error::{Result, VizError};
use crate::history::{validation_key, EpochLogs, TrainingHistory};
use crate::metrics::{binary_accuracy, binary_cross_entropy};
use crate::model::{Predictor, Trainable};

/// Runs a fixed number of epochs, records `loss`/`accuracy` for both splits
/// and hands each finished epoch to the registered callbacks
pub struct Trainer<'a> {
    epochs: usize,
    threshold: f32,
    history: TrainingHistory,
    callbacks: CallbackList<'a>,
}

impl<'a> Trainer<'a> {
    pub fn new(epochs: usize) -> Self {
        Self {
            epochs,
            threshold: 0.5,
            history: TrainingHistory::new(),
            callbacks: CallbackList::new(),
        }
    }

    /// Threshold used for the `accuracy` metric
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_callback<C: Callback + 'a>(mut self, callback: C) -> Self {
        self.callbacks.push(callback);
        self
    }

    pub fn history(&self) -> &TrainingHistory {
        &self.history
    }

    pub fn into_history(self) -> TrainingHistory {
        self.history
    }

    /// Train `model` on `train`, evaluating on `val` after every epoch
    ///
    /// A callback error stops training and is returned as is.
    pub fn fit<M, D>(&mut self, model: &mut M, train: &D, val: &D) -> Result<&TrainingHistory>
    where
        M: Trainable,
        D: Dataset + ?Sized,
    {
        if self.epochs == 0 {
            return Err(VizError::invalid_parameter("epochs", "must be at least 1"));
        }

        for epoch in 0..self.epochs {
            let mut batches = 0usize;
            for (inputs, labels) in train.batches() {
                model.train_batch(inputs, labels)?;
                batches += 1;
            }
            if batches == 0 {
                return Err(VizError::EmptySplit("training split yielded no batches".to_string()));
            }

            let (loss, accuracy) = self.evaluate(&*model, train)?;
            let (val_loss, val_accuracy) = self.evaluate(&*model, val)?;

            let mut logs = EpochLogs::new();
            logs.insert("loss".to_string(), loss);
            logs.insert("accuracy".to_string(), accuracy);
            logs.insert(validation_key("loss"), val_loss);
            logs.insert(validation_key("accuracy"), val_accuracy);

            info!(
                epoch = epoch + 1,
                epochs = self.epochs,
                loss,
                accuracy,
                val_loss,
                val_accuracy,
                "epoch finished"
            );

            self.history.record_epoch(&logs);
            let ctx = EpochContext::new(epoch, &self.history, &*model);
            self.callbacks.on_epoch_end(&ctx)?;
        }

        Ok(&self.history)
    }

    /// Loss and accuracy of `model` over a whole split
    fn evaluate<D: Dataset + ?Sized>(&self, model: &dyn Predictor, dataset: &D) -> Result<(f32, f32)> {
        let (labels, scores) = collect_predictions(model, dataset)?;
        let loss = binary_cross_entropy(scores.view(), labels.view())?;
        let accuracy = binary_accuracy(scores.view(), labels.view(), self.threshold)?;
        Ok((loss, accuracy))
    }
}

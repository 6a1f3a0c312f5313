//! Per-epoch metric history
//!
//! Metrics are keyed by name. Values computed on the validation split are
//! stored under the same name with a `val_` prefix, so `loss` pairs with
//! `val_loss`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VizError};

/// Prefix marking a metric computed on the validation split
pub const VALIDATION_PREFIX: &str = "val_";

/// Metric values logged at the end of a single epoch
pub type EpochLogs = BTreeMap<String, f32>;

/// Name of the validation counterpart of `metric`
pub fn validation_key(metric: &str) -> String {
    format!("{}{}", VALIDATION_PREFIX, metric)
}

/// Append-only record of every metric over the epochs seen so far
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    metrics: BTreeMap<String, Vec<f32>>,
}

impl TrainingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one value to a metric
    pub fn record(&mut self, name: &str, value: f32) {
        self.metrics.entry(name.to_string())
            .or_default()
            .push(value);
    }

    /// Append every value logged for one epoch
    pub fn record_epoch(&mut self, logs: &EpochLogs) {
        for (name, &value) in logs {
            self.record(name, value);
        }
    }

    /// Get all values for a metric
    pub fn get(&self, name: &str) -> Option<&[f32]> {
        self.metrics.get(name).map(Vec::as_slice)
    }

    /// Get the latest value for a metric
    pub fn latest(&self, name: &str) -> Option<f32> {
        self.metrics.get(name)?.last().copied()
    }

    /// All metric names, validation ones included, in sorted order
    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        self.metrics.keys().map(String::as_str)
    }

    /// Metric names that are not themselves validation metrics
    pub fn training_metrics(&self) -> impl Iterator<Item = &str> {
        self.metric_names()
            .filter(|name| !name.starts_with(VALIDATION_PREFIX))
    }

    /// Training and validation values for `metric`
    ///
    /// Fails with [`VizError::MissingMetric`] if either series is absent.
    pub fn paired(&self, metric: &str) -> Result<(&[f32], &[f32])> {
        let train = self.get(metric)
            .ok_or_else(|| VizError::missing_metric(metric))?;
        let val_key = validation_key(metric);
        let val = self.get(&val_key)
            .ok_or_else(|| VizError::missing_metric(val_key))?;
        Ok((train, val))
    }

    /// Number of epochs recorded (longest series)
    pub fn epochs(&self) -> usize {
        self.metrics.values().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Save history to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    /// Load history from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

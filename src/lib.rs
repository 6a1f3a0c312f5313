//! # Argus - Epoch-End Plot Exporters
//!
//! Argus watches a binary classifier while it trains. Hooks registered with
//! the training loop write PNG images every `period` epochs:
//!
//! - **Metric curves**: training vs. validation value of every logged metric
//! - **Confusion matrices**: row-normalised 2x2 heat maps for both splits
//! - **ROC / precision-recall curves**: with area under the curve and
//!   average precision
//!
//! Hooks never fire at epoch 0. Errors (missing metrics, I/O, empty splits)
//! propagate and stop training.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use argus::callbacks::{ConfusionMatrixPlotter, CurvePlotter, MetricPlotter};
//! use argus::config::PlotConfig;
//! use argus::data::ArrayDataset;
//! use argus::model::LogisticModel;
//! use argus::trainer::Trainer;
//! use ndarray::{array, Array1};
//!
//! let inputs = array![[0.1, 0.9], [0.8, 0.2], [0.2, 0.7], [0.9, 0.1]];
//! let labels = Array1::from_vec(vec![0.0, 1.0, 0.0, 1.0]);
//! let train = ArrayDataset::new(inputs.clone(), labels.clone(), 2).unwrap();
//! let val = ArrayDataset::new(inputs, labels, 2).unwrap();
//!
//! let config = PlotConfig::new("plots").with_period(5);
//! let mut trainer = Trainer::new(20)
//!     .with_callback(MetricPlotter::new(config.clone()).unwrap())
//!     .with_callback(ConfusionMatrixPlotter::new(config.clone(), &train, &val).unwrap())
//!     .with_callback(CurvePlotter::new(config, &train, &val).unwrap());
//!
//! let mut model = LogisticModel::new(2, 0.5);
//! trainer.fit(&mut model, &train, &val).unwrap();
//! ```
//!
//! ## Module Organization
//!
//! - [`callbacks`] - Epoch-end hooks and the three plot exporters
//! - [`config`] - Output directory, period, threshold and image settings
//! - [`data`] - Batched dataset splits
//! - [`error`] - Error types and result handling
//! - [`history`] - Per-epoch metric history
//! - [`metrics`] - Confusion matrix, ROC, precision-recall and AUC
//! - [`model`] - Predictor traits and a logistic regression model
//! - [`render`] - Chart descriptions and the PNG backend
//! - [`trainer`] - Epoch loop dispatching the callbacks

pub mod callbacks;
pub mod config;
pub mod data;
pub mod error;
pub mod history;
pub mod metrics;
pub mod model;
pub mod render;
pub mod trainer;

pub use error::{Result, VizError};

#[cfg(test)]
mod tests;

/***
# Binary Classifier Demo

* Trains a logistic model on two Gaussian blobs and writes plots every few epochs:
  - loss and accuracy curves under `<output>/metrics`
  - confusion matrices, ROC and precision-recall curves under `<output>/evaluation`

Run with an optional JSON config path:

    RUST_LOG=info cargo run --example binary_classifier -- plot_config.json
***/

use std::sync::Arc;

use argus::{
    callbacks::{ConfusionMatrixPlotter, CurvePlotter, MetricPlotter},
    config::PlotConfig,
    data::ArrayDataset,
    model::LogisticModel,
    trainer::Trainer,
    VizError,
};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tracing_subscriber::EnvFilter;

fn blobs(samples: usize, features: usize, seed: u64) -> argus::Result<ArrayDataset> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0f32, 1.2).map_err(|e| VizError::invalid_parameter("noise".to_string(), e.to_string()))?;

    let labels = Array1::from_shape_fn(samples, |i| (i % 2) as f32);
    let inputs = Array2::from_shape_fn((samples, features), |(i, _)| {
        let center = if i % 2 == 1 { 1.0 } else { -1.0 };
        center + noise.sample(&mut rng)
    });
    ArrayDataset::new(inputs, labels, 32)
}

fn main() -> argus::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => PlotConfig::from_json_file(path)?,
        None => PlotConfig::new("plots").with_period(5),
    };
    let root = config.output_dir.clone();

    // The metric plotter clears its directory, so it gets its own
    let mut metric_config = config.clone();
    metric_config.output_dir = root.join("metrics");
    let mut eval_config = config;
    eval_config.output_dir = root.join("evaluation");

    let features = 4;
    let train = Arc::new(blobs(1_000, features, 1)?);
    let val = Arc::new(blobs(300, features, 2)?);

    let mut trainer = Trainer::new(20)
        .with_threshold(eval_config.threshold)
        .with_callback(MetricPlotter::new(metric_config)?)
        .with_callback(ConfusionMatrixPlotter::new(eval_config.clone(), Arc::clone(&train), Arc::clone(&val))?)
        .with_callback(CurvePlotter::new(eval_config, Arc::clone(&train), Arc::clone(&val))?);

    let mut model = LogisticModel::new(features, 0.1);
    let history = trainer.fit(&mut model, train.as_ref(), val.as_ref())?;

    if let (Some(loss), Some(accuracy)) = (history.latest("val_loss"), history.latest("val_accuracy")) {
        println!("Final validation loss {:.4}, accuracy {:.2}%", loss, accuracy * 100.0);
    }
    trainer.history().save(root.join("history.json"))?;
    println!("Plots written under {}", root.display());

    Ok(())
}

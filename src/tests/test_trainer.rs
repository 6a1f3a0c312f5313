use ndarray::{array, Array1, Array2};

use super::{file_names, RecordingRenderer};
use crate::callbacks::MetricPlotter;
use crate::config::PlotConfig;
use crate::data::ArrayDataset;
use crate::error::VizError;
use crate::model::{LogisticModel, Predictor, Trainable};
use crate::trainer::Trainer;

/// Two well separated clusters along the first feature
fn separable(samples: usize, batch_size: usize) -> ArrayDataset {
    let inputs = Array2::from_shape_fn((samples, 2), |(i, j)| {
        let class = (i % 2) as f32;
        if j == 0 { class * 2.0 - 1.0 + (i as f32 * 0.01) } else { 0.5 }
    });
    let labels = Array1::from_shape_fn(samples, |i| (i % 2) as f32);
    ArrayDataset::new(inputs, labels, batch_size).unwrap()
}

#[test]
fn test_logistic_model_predict_shape_and_range() {
    let model = LogisticModel::new(3, 0.1);
    let inputs = Array2::from_elem((4, 3), 0.5);
    let scores = model.predict(inputs.view()).unwrap();

    assert_eq!(scores.len(), 4);
    assert!(scores.iter().all(|&s| s > 0.0 && s < 1.0));
    assert!(model.weights.iter().all(|w| w.abs() <= 0.1));
}

#[test]
fn test_logistic_model_rejects_wrong_width() {
    let model = LogisticModel::new(3, 0.1);
    let err = model.predict(Array2::zeros((2, 4)).view()).unwrap_err();
    assert!(matches!(err, VizError::DimensionMismatch { .. }));
}

#[test]
fn test_logistic_model_with_weights() {
    let model = LogisticModel::new(2, 0.1).with_weights(array![0.0, 0.0], 0.0);
    let scores = model.predict(array![[1.0, 2.0]].view()).unwrap();
    assert!((scores[0] - 0.5).abs() < 1e-6);
}

#[test]
fn test_train_batch_reduces_loss() {
    let data = separable(20, 20);
    let mut model = LogisticModel::new(2, 1.0);

    let first = model.train_batch(data.inputs(), data.labels()).unwrap();
    let mut last = first;
    for _ in 0..50 {
        last = model.train_batch(data.inputs(), data.labels()).unwrap();
    }
    assert!(last < first, "loss did not drop: {} -> {}", first, last);
}

#[test]
fn test_fit_records_history() {
    let train = separable(16, 4);
    let val = separable(8, 4);
    let mut model = LogisticModel::new(2, 0.5);
    let mut trainer = Trainer::new(5);

    let history = trainer.fit(&mut model, &train, &val).unwrap();

    for metric in ["loss", "accuracy", "val_loss", "val_accuracy"] {
        assert_eq!(history.get(metric).map(|v| v.len()), Some(5), "{}", metric);
    }
    let losses = history.get("loss").unwrap();
    assert!(losses[4] < losses[0]);
    assert_eq!(history.latest("accuracy"), Some(1.0));
}

#[test]
fn test_fit_dispatches_callbacks_on_period() {
    let dir = tempfile::tempdir().unwrap();
    let recorder = RecordingRenderer::default();
    let train = separable(8, 4);
    let val = separable(4, 4);

    let plotter = MetricPlotter::with_renderer(PlotConfig::new(dir.path()).with_period(2), &recorder).unwrap();
    let mut trainer = Trainer::new(5).with_callback(plotter);
    let mut model = LogisticModel::new(2, 0.5);
    trainer.fit(&mut model, &train, &val).unwrap();

    // Epochs 2 and 4 fire, two metrics each
    assert_eq!(recorder.lines.borrow().len(), 4);
    assert_eq!(file_names(dir.path()), vec!["Accuracy.png", "Loss.png"]);

    let lines = recorder.lines.borrow();
    let (_, last) = lines.last().unwrap();
    assert_eq!(last.series[0].points.len(), 5);
}

#[test]
fn test_fit_rejects_zero_epochs_and_empty_training_split() {
    let data = separable(4, 2);
    let mut model = LogisticModel::new(2, 0.5);
    assert!(matches!(
        Trainer::new(0).fit(&mut model, &data, &data),
        Err(VizError::InvalidParameter { .. })
    ));

    let empty = ArrayDataset::new(Array2::zeros((0, 2)), Array1::zeros(0), 2).unwrap();
    assert!(matches!(
        Trainer::new(1).fit(&mut model, &empty, &data),
        Err(VizError::EmptySplit(_))
    ));
}

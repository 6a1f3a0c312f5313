use ndarray::array;

use crate::error::VizError;
use crate::metrics::{
    auc, binary_accuracy, binary_cross_entropy, precision_recall_curve, roc_curve, ConfusionMatrix,
};

const EPS: f64 = 1e-9;

#[test]
fn test_confusion_matrix_counts() {
    let scores = array![0.9, 0.2, 0.7, 0.4, 0.6, 0.1];
    let labels = array![1.0, 1.0, 0.0, 0.0, 1.0, 0.0];
    let matrix = ConfusionMatrix::from_scores(scores.view(), labels.view(), 0.5).unwrap();

    // rows: truth, cols: prediction
    assert_eq!(matrix.counts(), [[2, 1], [1, 2]]);
    assert_eq!(matrix.total(), 6);
}

#[test]
fn test_confusion_matrix_threshold_is_strict() {
    let scores = array![0.5, 0.5];
    let labels = array![0.0, 1.0];
    let matrix = ConfusionMatrix::from_scores(scores.view(), labels.view(), 0.5).unwrap();
    assert_eq!(matrix.counts(), [[1, 0], [1, 0]]);
}

#[test]
fn test_confusion_matrix_normalized_rows() {
    let scores = array![0.9, 0.8, 0.1, 0.2, 0.7];
    let labels = array![1.0, 1.0, 1.0, 0.0, 0.0];
    let matrix = ConfusionMatrix::from_scores(scores.view(), labels.view(), 0.5).unwrap();
    let normalized = matrix.normalized();

    for row in normalized.rows() {
        assert!((row.sum() - 1.0).abs() < 1e-12);
    }
    assert!((normalized[[1, 1]] - 2.0 / 3.0).abs() < EPS);
    assert!((normalized[[0, 0]] - 0.5).abs() < EPS);
    assert_eq!(matrix.class_accuracy_percent(), [50.0, 66.67]);
}

#[test]
fn test_confusion_matrix_missing_class_row_is_zero() {
    let scores = array![0.9, 0.1];
    let labels = array![1.0, 1.0];
    let matrix = ConfusionMatrix::from_scores(scores.view(), labels.view(), 0.5).unwrap();
    let normalized = matrix.normalized();

    assert_eq!(normalized.row(0).sum(), 0.0);
    assert!((normalized.row(1).sum() - 1.0).abs() < EPS);
}

#[test]
fn test_length_mismatch_is_rejected() {
    let scores = array![0.9, 0.1];
    let labels = array![1.0];
    let err = ConfusionMatrix::from_scores(scores.view(), labels.view(), 0.5).unwrap_err();
    assert!(matches!(err, VizError::DimensionMismatch { .. }));
}

#[test]
fn test_accuracy_and_cross_entropy() {
    let scores = array![0.9, 0.1, 0.8, 0.3];
    let labels = array![1.0, 0.0, 0.0, 0.0];

    let accuracy = binary_accuracy(scores.view(), labels.view(), 0.5).unwrap();
    assert!((accuracy - 0.75).abs() < 1e-6);

    let perfect = binary_cross_entropy(array![1.0, 0.0].view(), array![1.0, 0.0].view()).unwrap();
    assert!(perfect < 1e-5);

    let uniform = binary_cross_entropy(array![0.5, 0.5].view(), array![1.0, 0.0].view()).unwrap();
    assert!((uniform - std::f32::consts::LN_2).abs() < 1e-5);
}

#[test]
fn test_roc_perfect_separation() {
    let scores = array![0.1, 0.2, 0.8, 0.9];
    let labels = array![0.0, 0.0, 1.0, 1.0];
    let roc = roc_curve(scores.view(), labels.view()).unwrap();

    assert_eq!(roc.fpr, vec![0.0, 0.0, 0.0, 1.0]);
    assert_eq!(roc.tpr, vec![0.0, 0.5, 1.0, 1.0]);
    assert!(roc.thresholds[0].is_infinite());
    assert!((roc.auc() - 1.0).abs() < EPS);
}

#[test]
fn test_roc_known_auc() {
    // Classic example: AUC = 0.75
    let scores = array![0.1, 0.4, 0.35, 0.8];
    let labels = array![0.0, 0.0, 1.0, 1.0];
    let roc = roc_curve(scores.view(), labels.view()).unwrap();

    assert_eq!(roc.fpr, vec![0.0, 0.0, 0.5, 0.5, 1.0]);
    assert_eq!(roc.tpr, vec![0.0, 0.5, 0.5, 1.0, 1.0]);
    assert!((roc.auc() - 0.75).abs() < EPS);
}

#[test]
fn test_roc_drops_collinear_points() {
    let scores = array![0.9, 0.8, 0.7, 0.1];
    let labels = array![1.0, 1.0, 1.0, 0.0];
    let roc = roc_curve(scores.view(), labels.view()).unwrap();

    // The 0.8 threshold lies on the segment between 0.9 and 0.7
    assert_eq!(roc.tpr.len(), 4);
    assert_eq!(roc.tpr, vec![0.0, 1.0 / 3.0, 1.0, 1.0]);
}

#[test]
fn test_roc_ties_share_a_threshold() {
    let scores = array![0.5, 0.5, 0.5, 0.5];
    let labels = array![0.0, 1.0, 0.0, 1.0];
    let roc = roc_curve(scores.view(), labels.view()).unwrap();

    assert_eq!(roc.fpr, vec![0.0, 1.0]);
    assert_eq!(roc.tpr, vec![0.0, 1.0]);
    assert!((roc.auc() - 0.5).abs() < EPS);
}

#[test]
fn test_curves_reject_single_class() {
    let scores = array![0.3, 0.6];
    let labels = array![1.0, 1.0];

    let err = roc_curve(scores.view(), labels.view()).unwrap_err();
    assert!(matches!(err, VizError::DegenerateLabels(_)));

    let err = precision_recall_curve(scores.view(), labels.view()).unwrap_err();
    assert!(matches!(err, VizError::DegenerateLabels(_)));
}

#[test]
fn test_curves_reject_empty_and_non_finite() {
    let empty = ndarray::Array1::<f32>::zeros(0);
    assert!(matches!(
        roc_curve(empty.view(), empty.view()).unwrap_err(),
        VizError::EmptySplit(_)
    ));

    let scores = array![0.3, f32::NAN];
    let labels = array![0.0, 1.0];
    assert!(matches!(
        roc_curve(scores.view(), labels.view()).unwrap_err(),
        VizError::InvalidParameter { .. }
    ));
}

#[test]
fn test_precision_recall_curve() {
    let scores = array![0.1, 0.4, 0.35, 0.8];
    let labels = array![0.0, 0.0, 1.0, 1.0];
    let pr = precision_recall_curve(scores.view(), labels.view()).unwrap();

    let expected_precision = [0.5, 2.0 / 3.0, 0.5, 1.0, 1.0];
    let expected_recall = [1.0, 1.0, 0.5, 0.5, 0.0];
    assert_eq!(pr.precision.len(), expected_precision.len());
    for (got, want) in pr.precision.iter().zip(expected_precision.iter()) {
        assert!((got - want).abs() < EPS, "precision {} != {}", got, want);
    }
    assert_eq!(pr.recall, expected_recall.to_vec());
    assert_eq!(pr.thresholds.len(), 4);
    assert!((pr.thresholds[0] - 0.1).abs() < 1e-6);

    // (1 - 1) * 0.5 + (1 - 0.5) * 2/3 + (0.5 - 0.5) * 0.5 + (0.5 - 0) * 1
    assert!((pr.average_precision() - (0.5 * 2.0 / 3.0 + 0.5)).abs() < EPS);
}

#[test]
fn test_trapezoid_auc() {
    assert!((auc(&[0.0, 1.0], &[0.0, 1.0]) - 0.5).abs() < EPS);
    assert!((auc(&[0.0, 0.5, 1.0], &[1.0, 1.0, 1.0]) - 1.0).abs() < EPS);
    // Decreasing x gives the same area
    assert!((auc(&[1.0, 0.0], &[1.0, 0.0]) - 0.5).abs() < EPS);
    assert_eq!(auc(&[0.3], &[0.7]), 0.0);
}
